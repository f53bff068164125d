//! Error type shared by every constructor and operation in the crate.
//!
//! All validation happens at construction time: invalid data is rejected
//! before it can reach the aggregator, the mud resolver or a frog.

use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, MudborneError>;

/// Every way Mudborne data or a mud application can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MudborneError {
    /// Trait letter outside ANOURES.
    #[error("invalid trait code {0:?}: expected one of A, N, O, U, R, E, S")]
    InvalidTraitCode(String),

    /// Genetic code string is not seven digits in 1..=7.
    #[error("invalid genetic code {code:?}: {reason}")]
    InvalidGeneticCode { code: String, reason: String },

    /// Preferred flavors empty, more than two, repeated or unknown.
    #[error("invalid flavor set {0:?}: a frog prefers one or two distinct flavors")]
    InvalidFlavorSet(String),

    /// Domain, tile, temperature, humidity, weather etc. not in the registry.
    #[error("invalid {kind} {value:?}")]
    InvalidEnvironmentValue { kind: &'static str, value: String },

    /// Effect token that does not parse as `(operation, scalar, trait)`.
    #[error("invalid mushroom effect {0:?}")]
    InvalidEffect(String),

    /// A frog can only ever receive one batch of mud.
    #[error("frog has already received mud")]
    AlreadyMudded,

    /// Species name not present in the registry.
    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    /// Catalog data is malformed or internally inconsistent.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl MudborneError {
    pub(crate) fn environment(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnvironmentValue {
            kind,
            value: value.into(),
        }
    }

    pub(crate) fn genetic_code(code: &str, reason: impl Into<String>) -> Self {
        Self::InvalidGeneticCode {
            code: code.to_string(),
            reason: reason.into(),
        }
    }
}
