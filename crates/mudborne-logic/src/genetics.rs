//! Frog genetics — the seven ANOURES traits and the genetic code that holds them.
//!
//! Every catchable frog carries seven heritable traits, each a value from
//! 1 to 7: Amplitude (size), Nobility (affinity for the Dream), Odour,
//! Umbrage (attitude, heat for machines), Ribbit (noise), Edacity (appetite)
//! and Saturation (water absorption). A genetic code is written as seven
//! digits in ANOURES order, e.g. `4444444` for a Common Green.
//!
//! Values are clamped into `[1, 7]` after every adjustment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MudborneError, Result};
use crate::modifier::Operation;

/// Lowest value any trait can hold.
pub const TRAIT_MIN: u8 = 1;
/// Highest value any trait can hold.
pub const TRAIT_MAX: u8 = 7;
/// Number of traits in a genetic code.
pub const TRAIT_COUNT: usize = 7;

// ============================================================================
// TRAIT CODES
// ============================================================================

/// One letter of ANOURES.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TraitCode {
    A = 0,
    N = 1,
    O = 2,
    U = 3,
    R = 4,
    E = 5,
    S = 6,
}

impl TraitCode {
    /// All trait codes in ANOURES order.
    pub const ALL: [TraitCode; TRAIT_COUNT] = [
        Self::A,
        Self::N,
        Self::O,
        Self::U,
        Self::R,
        Self::E,
        Self::S,
    ];

    /// Position of this trait within a genetic code.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::N => 'N',
            Self::O => 'O',
            Self::U => 'U',
            Self::R => 'R',
            Self::E => 'E',
            Self::S => 'S',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "Amplitude",
            Self::N => "Nobility",
            Self::O => "Odour",
            Self::U => "Umbrage",
            Self::R => "Ribbit",
            Self::E => "Edacity",
            Self::S => "Saturation",
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::A),
            'N' => Some(Self::N),
            'O' => Some(Self::O),
            'U' => Some(Self::U),
            'R' => Some(Self::R),
            'E' => Some(Self::E),
            'S' => Some(Self::S),
            _ => None,
        }
    }
}

impl FromStr for TraitCode {
    type Err = MudborneError;

    /// Parses a single ANOURES letter.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => None,
        }
        .ok_or_else(|| MudborneError::InvalidTraitCode(s.to_string()))
    }
}

impl fmt::Display for TraitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ============================================================================
// TRAITS
// ============================================================================

/// A single trait value. Always within `[TRAIT_MIN, TRAIT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneticTrait {
    pub code: TraitCode,
    value: u8,
}

impl GeneticTrait {
    pub fn new(code: TraitCode, value: u8) -> Result<Self> {
        if !(TRAIT_MIN..=TRAIT_MAX).contains(&value) {
            return Err(MudborneError::genetic_code(
                &value.to_string(),
                format!("{} value {value} outside 1-7", code.name()),
            ));
        }
        Ok(Self { code, value })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Apply one operation, then clamp into `[1, 7]`.
    ///
    /// `min`/`max` ignore the scalar. `suppress` is a no-op here; it only
    /// has meaning while mixing mud.
    pub fn adjust(&mut self, operation: Operation, scalar: i32) {
        let current = i64::from(self.value);
        let raw = match operation {
            Operation::Add => current.saturating_add(i64::from(scalar)),
            Operation::Mult => current.saturating_mul(i64::from(scalar)),
            Operation::Min => i64::from(TRAIT_MIN),
            Operation::Max => i64::from(TRAIT_MAX),
            Operation::Suppress => current,
        };
        self.value = raw.clamp(i64::from(TRAIT_MIN), i64::from(TRAIT_MAX)) as u8;
    }
}

// ============================================================================
// GENETIC CODE
// ============================================================================

/// A complete genome: exactly one trait per ANOURES letter.
///
/// Serialized as its seven-digit string so that deserialized codes go
/// through the same validation as parsed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeneticCode {
    traits: [GeneticTrait; TRAIT_COUNT],
}

impl GeneticCode {
    /// Build from raw values in ANOURES order.
    pub fn from_values(values: [u8; TRAIT_COUNT]) -> Result<Self> {
        let mut traits = [GeneticTrait {
            code: TraitCode::A,
            value: TRAIT_MIN,
        }; TRAIT_COUNT];
        for (slot, (code, value)) in traits
            .iter_mut()
            .zip(TraitCode::ALL.into_iter().zip(values))
        {
            *slot = GeneticTrait::new(code, value)?;
        }
        Ok(Self { traits })
    }

    pub fn get(&self, code: TraitCode) -> &GeneticTrait {
        &self.traits[code.index()]
    }

    /// Trait values in ANOURES order.
    pub fn values(&self) -> [u8; TRAIT_COUNT] {
        self.traits.map(|t| t.value)
    }

    pub fn traits(&self) -> impl Iterator<Item = &GeneticTrait> {
        self.traits.iter()
    }

    /// Mutate one trait. The result is always clamped into `[1, 7]`.
    pub fn adjust(&mut self, code: TraitCode, operation: Operation, scalar: i32) {
        self.traits[code.index()].adjust(operation, scalar);
    }
}

impl FromStr for GeneticCode {
    type Err = MudborneError;

    fn from_str(s: &str) -> Result<Self> {
        let digits: Vec<char> = s.chars().collect();
        if digits.len() != TRAIT_COUNT {
            return Err(MudborneError::genetic_code(
                s,
                format!("expected {TRAIT_COUNT} digits, found {}", digits.len()),
            ));
        }
        let mut values = [0u8; TRAIT_COUNT];
        for (slot, ch) in values.iter_mut().zip(&digits) {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| MudborneError::genetic_code(s, format!("{ch:?} is not a digit")))?;
            if !(u32::from(TRAIT_MIN)..=u32::from(TRAIT_MAX)).contains(&digit) {
                return Err(MudborneError::genetic_code(
                    s,
                    format!("digit {digit} outside 1-7"),
                ));
            }
            *slot = digit as u8;
        }
        Self::from_values(values)
    }
}

impl TryFrom<String> for GeneticCode {
    type Error = MudborneError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GeneticCode> for String {
    fn from(code: GeneticCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in &self.traits {
            write!(f, "{}", t.value)?;
        }
        Ok(())
    }
}
