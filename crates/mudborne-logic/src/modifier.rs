//! Trait modifiers — the per-trait operations mushrooms contribute to mud.
//!
//! Waking fungi only ever add or subtract. Dream fungi can multiply other
//! fungi's additive effects, clamp a trait straight to 1 or 7, or suppress
//! every other effect on the same trait in a batch.
//!
//! A [`MultiTraitModifier`] only collects modifiers per trait. It never
//! simplifies them: `-1` and `x-1` stay two entries until the mud is mixed,
//! otherwise adding a third source later could give a different result
//! depending on how the first two were grouped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MudborneError, Result};
use crate::genetics::{TraitCode, TRAIT_COUNT};

/// What a modifier does to its trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Add the scalar (negative subtracts).
    Add,
    /// Multiply. When mixing, scales the summed additive effects.
    Mult,
    /// Set the trait to 1. Scalar ignored.
    Min,
    /// Set the trait to 7. Scalar ignored.
    Max,
    /// Cancel every other modifier on this trait in the batch.
    Suppress,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Mult => "mult",
            Self::Min => "min",
            Self::Max => "max",
            Self::Suppress => "suppress",
        }
    }

    pub fn is_clamp(&self) -> bool {
        matches!(self, Self::Min | Self::Max)
    }
}

impl FromStr for Operation {
    type Err = MudborneError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "mult" => Ok(Self::Mult),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "suppress" => Ok(Self::Suppress),
            _ => Err(MudborneError::InvalidEffect(s.to_string())),
        }
    }
}

// ============================================================================
// SINGLE-TRAIT MODIFIER
// ============================================================================

/// One operation on one trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleTraitModifier {
    pub code: TraitCode,
    pub operation: Operation,
    pub scalar: i32,
}

impl SingleTraitModifier {
    pub fn new(code: TraitCode, operation: Operation, scalar: i32) -> Self {
        Self {
            code,
            operation,
            scalar,
        }
    }

    pub fn add(code: TraitCode, scalar: i32) -> Self {
        Self::new(code, Operation::Add, scalar)
    }

    pub fn mult(code: TraitCode, scalar: i32) -> Self {
        Self::new(code, Operation::Mult, scalar)
    }

    pub fn min(code: TraitCode) -> Self {
        Self::new(code, Operation::Min, 0)
    }

    pub fn max(code: TraitCode) -> Self {
        Self::new(code, Operation::Max, 0)
    }

    pub fn suppress(code: TraitCode) -> Self {
        Self::new(code, Operation::Suppress, 0)
    }

    /// Build from raw parts, validating the trait letter.
    pub fn from_parts(trait_code: &str, operation: Operation, scalar: i32) -> Result<Self> {
        Ok(Self::new(trait_code.parse()?, operation, scalar))
    }
}

impl FromStr for SingleTraitModifier {
    type Err = MudborneError;

    /// Parse one effect token as written in the fungi catalog.
    ///
    /// Spaced forms: `+1 A`, `-1 S`, `x2 N`, `x-1 A`, `min N`, `MAX S`,
    /// `suppress U`. Compact forms drop the space: `+1A`, `x-1N`, `x0O`,
    /// with `mN` for min and `MS` for max. The trait letter is always last.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let invalid = || MudborneError::InvalidEffect(token.to_string());

        let (op_part, trait_part) = match token.rsplit_once(char::is_whitespace) {
            Some((op, letter)) => (op.trim_end(), letter),
            None => {
                let (split, _) = token.char_indices().last().ok_or_else(invalid)?;
                token.split_at(split)
            }
        };
        let code: TraitCode = trait_part.parse()?;

        let parse_scalar = |digits: &str| digits.parse::<i32>().map_err(|_| invalid());

        // single-letter clamps are case sensitive: m is min, M is max
        let modifier = match op_part {
            "m" => Self::min(code),
            "M" => Self::max(code),
            _ => match op_part.to_ascii_lowercase().as_str() {
                "min" => Self::min(code),
                "max" => Self::max(code),
                "suppress" => Self::suppress(code),
                lower => {
                    if let Some(factor) = lower.strip_prefix('x') {
                        Self::mult(code, parse_scalar(factor)?)
                    } else if lower.starts_with('+') || lower.starts_with('-') {
                        Self::add(code, parse_scalar(lower)?)
                    } else {
                        return Err(invalid());
                    }
                }
            },
        };
        Ok(modifier)
    }
}

impl fmt::Display for SingleTraitModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            Operation::Add => write!(f, "{:+} {}", self.scalar, self.code),
            Operation::Mult => write!(f, "x{} {}", self.scalar, self.code),
            Operation::Min => write!(f, "min {}", self.code),
            Operation::Max => write!(f, "MAX {}", self.code),
            Operation::Suppress => write!(f, "suppress {}", self.code),
        }
    }
}

/// Parse a comma-separated effect list such as `"suppress A, -1 S"`.
pub fn parse_effects(effects: &str) -> Result<Vec<SingleTraitModifier>> {
    effects
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

// ============================================================================
// MULTI-TRAIT MODIFIER (aggregator)
// ============================================================================

/// Modifiers collected per trait, in the order they were contributed.
///
/// Insertion order matters: it breaks ties between conflicting clamps when
/// the mud is mixed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiTraitModifier {
    buckets: [Vec<SingleTraitModifier>; TRAIT_COUNT],
}

impl MultiTraitModifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect modifiers into their trait buckets, preserving order.
    pub fn from_modifiers<I>(modifiers: I) -> Self
    where
        I: IntoIterator<Item = SingleTraitModifier>,
    {
        let mut aggregate = Self::new();
        for modifier in modifiers {
            aggregate.push(modifier);
        }
        aggregate
    }

    pub fn push(&mut self, modifier: SingleTraitModifier) {
        self.buckets[modifier.code.index()].push(modifier);
    }

    /// Append another aggregate's modifiers after this one's, trait by trait.
    pub fn combine(&mut self, other: &MultiTraitModifier) {
        for (mine, theirs) in self.buckets.iter_mut().zip(&other.buckets) {
            mine.extend_from_slice(theirs);
        }
    }

    /// Modifiers contributed to one trait so far.
    pub fn bucket(&self, code: TraitCode) -> &[SingleTraitModifier] {
        &self.buckets[code.index()]
    }

    /// `(trait, modifiers)` pairs in ANOURES order.
    pub fn buckets(&self) -> impl Iterator<Item = (TraitCode, &[SingleTraitModifier])> {
        TraitCode::ALL
            .into_iter()
            .zip(self.buckets.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

impl FromIterator<SingleTraitModifier> for MultiTraitModifier {
    fn from_iter<I: IntoIterator<Item = SingleTraitModifier>>(iter: I) -> Self {
        Self::from_modifiers(iter)
    }
}
