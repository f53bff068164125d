//! Magic mud — mixing many mushroom effects into one modifier per trait.
//!
//! Mixing happens only once every contributing effect has been aggregated
//! (see [`MultiTraitModifier`]). Each trait's bucket is then reduced on its
//! own:
//!
//! | Bucket | Effective modifier |
//! |--------|--------------------|
//! | empty | none |
//! | one entry | that entry, unchanged |
//! | contains `suppress` | none |
//! | contains `min`/`max` | first clamp in insertion order |
//! | adds and mults | `add (product of mults × sum of adds)` |
//! | mults only | none, with a diagnostic |
//!
//! ```
//! use mudborne_logic::genetics::TraitCode;
//! use mudborne_logic::modifier::{parse_effects, MultiTraitModifier};
//! use mudborne_logic::mud::resolve;
//!
//! let a: MultiTraitModifier = parse_effects("+2 N").unwrap().into_iter().collect();
//! let b: MultiTraitModifier = parse_effects("x-1 N").unwrap().into_iter().collect();
//! let mud = resolve(&[a, b]);
//! assert_eq!(mud.effective(TraitCode::N).unwrap().scalar, -2);
//! ```

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::fungi::Mushroom;
use crate::genetics::{GeneticCode, TraitCode, TRAIT_COUNT};
use crate::modifier::{MultiTraitModifier, Operation, SingleTraitModifier};

/// Something questionable noticed while mixing. Mixing still completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixDiagnostic {
    /// Both `min` and `max` landed on one trait; the first one seen won.
    AmbiguousClampConflict { code: TraitCode, chosen: Operation },
    /// Multipliers with no additive term to scale; the trait is left alone.
    MultiplierWithoutAdditive { code: TraitCode },
}

impl fmt::Display for MixDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousClampConflict { code, chosen } => write!(
                f,
                "both min and max applied to {} ({}); keeping first seen: {}",
                code.name(),
                code,
                chosen.name()
            ),
            Self::MultiplierWithoutAdditive { code } => write!(
                f,
                "multipliers on {} ({}) have no additive effect to scale",
                code.name(),
                code
            ),
        }
    }
}

/// Fully mixed mud: at most one modifier per trait.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mud {
    effective: [Option<SingleTraitModifier>; TRAIT_COUNT],
    diagnostics: Vec<MixDiagnostic>,
}

impl Mud {
    /// Mix an already aggregated set of modifiers.
    pub fn mix(aggregate: &MultiTraitModifier) -> Self {
        let mut mud = Mud::default();
        for (code, bucket) in aggregate.buckets() {
            let effective = mix_bucket(code, bucket, &mut mud.diagnostics);
            debug!(
                "mixed {} modifier(s) on {code}: {}",
                bucket.len(),
                effective.map_or_else(|| "no effect".to_string(), |m| m.to_string())
            );
            mud.effective[code.index()] = effective;
        }
        mud
    }

    /// Aggregate every mushroom's effects in order, then mix.
    pub fn from_mushrooms(mushrooms: &[&Mushroom]) -> Self {
        let sources: Vec<MultiTraitModifier> = mushrooms.iter().map(|m| m.modifier()).collect();
        resolve(&sources)
    }

    pub fn effective(&self, code: TraitCode) -> Option<&SingleTraitModifier> {
        self.effective[code.index()].as_ref()
    }

    /// Effective modifiers in ANOURES order, skipping untouched traits.
    pub fn effects(&self) -> impl Iterator<Item = &SingleTraitModifier> {
        self.effective.iter().flatten()
    }

    pub fn diagnostics(&self) -> &[MixDiagnostic] {
        &self.diagnostics
    }

    /// True when applying this mud cannot change any trait: every effective
    /// modifier is a suppress, `+0` or `x1`.
    pub fn is_inert(&self) -> bool {
        self.effects().all(|m| {
            matches!(
                (m.operation, m.scalar),
                (Operation::Suppress, _) | (Operation::Add, 0) | (Operation::Mult, 1)
            )
        })
    }

    /// Apply every effective modifier to a genetic code in place.
    pub fn apply_to(&self, genetics: &mut GeneticCode) {
        for m in self.effects() {
            genetics.adjust(m.code, m.operation, m.scalar);
        }
    }
}

/// Combine any number of sources into one batch and mix it.
pub fn resolve(sources: &[MultiTraitModifier]) -> Mud {
    let mut aggregate = MultiTraitModifier::new();
    for source in sources {
        aggregate.combine(source);
    }
    Mud::mix(&aggregate)
}

/// Reduce one trait's bucket to its effective modifier.
fn mix_bucket(
    code: TraitCode,
    bucket: &[SingleTraitModifier],
    diagnostics: &mut Vec<MixDiagnostic>,
) -> Option<SingleTraitModifier> {
    match bucket {
        [] => return None,
        [only] => return Some(*only),
        _ => {}
    }

    if bucket.iter().any(|m| m.operation == Operation::Suppress) {
        return None;
    }

    let mut clamps = bucket.iter().filter(|m| m.operation.is_clamp());
    if let Some(first) = clamps.next() {
        if clamps.any(|m| m.operation != first.operation) {
            let diagnostic = MixDiagnostic::AmbiguousClampConflict {
                code,
                chosen: first.operation,
            };
            warn!("{diagnostic}");
            diagnostics.push(diagnostic);
        }
        return Some(*first);
    }

    let mut additive_total: i64 = 0;
    let mut multiplicative_total: i64 = 1;
    let mut has_additive = false;
    for m in bucket {
        match m.operation {
            Operation::Add => {
                has_additive = true;
                additive_total = additive_total.saturating_add(i64::from(m.scalar));
            }
            Operation::Mult => {
                multiplicative_total = multiplicative_total.saturating_mul(i64::from(m.scalar));
            }
            _ => {}
        }
    }

    if !has_additive {
        let diagnostic = MixDiagnostic::MultiplierWithoutAdditive { code };
        warn!("{diagnostic}");
        diagnostics.push(diagnostic);
        return None;
    }

    let net = multiplicative_total
        .saturating_mul(additive_total)
        .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some(SingleTraitModifier::add(code, net))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::parse_effects;

    fn source(effects: &str) -> MultiTraitModifier {
        parse_effects(effects).unwrap().into_iter().collect()
    }

    fn mixed(effects: &str) -> Mud {
        Mud::mix(&source(effects))
    }

    #[test]
    fn empty_bucket_has_no_effect() {
        let mud = mixed("+1 A");
        assert!(mud.effective(TraitCode::N).is_none());
        assert_eq!(mud.effects().count(), 1);
    }

    #[test]
    fn single_entry_passes_through() {
        for text in ["+3 A", "x2 A", "min A", "MAX A", "suppress A"] {
            let mud = mixed(text);
            assert_eq!(
                mud.effective(TraitCode::A),
                Some(&text.parse::<SingleTraitModifier>().unwrap()),
                "{text}"
            );
            assert!(mud.diagnostics().is_empty());
        }
    }

    #[test]
    fn additives_sum() {
        let mud = mixed("+1 A, +2 A");
        assert_eq!(mud.effective(TraitCode::A), Some(&SingleTraitModifier::add(TraitCode::A, 3)));
    }

    #[test]
    fn multiplier_scales_summed_additives() {
        let mud = mixed("+2 N, x-1 N");
        assert_eq!(mud.effective(TraitCode::N), Some(&SingleTraitModifier::add(TraitCode::N, -2)));

        let mud = mixed("+1 O, +1 O, x2 O, x2 O");
        assert_eq!(mud.effective(TraitCode::O).unwrap().scalar, 8);

        let mud = mixed("x0 U, +1 U");
        assert_eq!(mud.effective(TraitCode::U).unwrap().scalar, 0);
    }

    #[test]
    fn suppress_beats_everything() {
        for text in [
            "suppress S, +1 S",
            "+1 S, suppress S",
            "MAX S, suppress S, min S",
            "x2 S, +3 S, -1 S, suppress S",
        ] {
            let mud = mixed(text);
            assert!(mud.effective(TraitCode::S).is_none(), "{text}");
        }
    }

    #[test]
    fn clamp_beats_arithmetic() {
        let mud = mixed("+3 R, MAX R, x2 R");
        assert_eq!(mud.effective(TraitCode::R), Some(&SingleTraitModifier::max(TraitCode::R)));
        assert!(mud.diagnostics().is_empty());
    }

    #[test]
    fn conflicting_clamps_take_first_seen_and_report() {
        let mud = mixed("min E, MAX E");
        assert_eq!(mud.effective(TraitCode::E).unwrap().operation, Operation::Min);
        assert_eq!(
            mud.diagnostics(),
            &[MixDiagnostic::AmbiguousClampConflict {
                code: TraitCode::E,
                chosen: Operation::Min
            }]
        );

        let mud = mixed("MAX E, min E");
        assert_eq!(mud.effective(TraitCode::E).unwrap().operation, Operation::Max);
    }

    #[test]
    fn repeated_identical_clamps_are_not_a_conflict() {
        let mud = mixed("min U, min U");
        assert_eq!(mud.effective(TraitCode::U).unwrap().operation, Operation::Min);
        assert!(mud.diagnostics().is_empty());
    }

    #[test]
    fn multipliers_alone_do_nothing() {
        let mud = mixed("x2 N, x-1 N");
        assert!(mud.effective(TraitCode::N).is_none());
        assert_eq!(
            mud.diagnostics(),
            &[MixDiagnostic::MultiplierWithoutAdditive { code: TraitCode::N }]
        );
    }

    #[test]
    fn resolve_combines_sources_in_order() {
        let mud = resolve(&[source("MAX A, +1 N"), source("min A, +1 N")]);
        assert_eq!(mud.effective(TraitCode::A).unwrap().operation, Operation::Max);
        assert_eq!(mud.effective(TraitCode::N).unwrap().scalar, 2);

        let mud = resolve(&[source("min A"), source("MAX A")]);
        assert_eq!(mud.effective(TraitCode::A).unwrap().operation, Operation::Min);
    }

    #[test]
    fn grouping_does_not_change_result() {
        // (+1, x-1) then +1 must equal +1 then (x-1, +1): no early simplification
        let left = resolve(&[source("+1 O, x-1 O"), source("+1 O")]);
        let right = resolve(&[source("+1 O"), source("x-1 O, +1 O")]);
        assert_eq!(left.effective(TraitCode::O), right.effective(TraitCode::O));
        assert_eq!(left.effective(TraitCode::O).unwrap().scalar, -2);
    }

    #[test]
    fn extreme_scalars_saturate() {
        let big = SingleTraitModifier::add(TraitCode::A, i32::MAX);
        let agg = MultiTraitModifier::from_modifiers([big, big, SingleTraitModifier::mult(TraitCode::A, i32::MAX)]);
        let mud = Mud::mix(&agg);
        assert_eq!(mud.effective(TraitCode::A).unwrap().scalar, i32::MAX);
    }

    #[test]
    fn inert_mud() {
        assert!(resolve(&[]).is_inert());
        assert!(mixed("suppress A").is_inert());
        assert!(mixed("+1 A, suppress A").is_inert());
        assert!(!mixed("+1 A").is_inert());
        assert!(!mixed("min A").is_inert());
    }

    #[test]
    fn identity_effects_are_inert() {
        assert!(mixed("+0 A").is_inert());
        assert!(mixed("x1 N").is_inert());
        assert!(mixed("+1 O, -1 O").is_inert());
        assert!(mixed("+2 R, x0 R").is_inert());
        assert!(!mixed("x0 R").is_inert());
        assert!(!mixed("+0 A, x2 N").is_inert());

        let mut code: GeneticCode = "4444444".parse().unwrap();
        mixed("+1 O, -1 O, x1 N").apply_to(&mut code);
        assert_eq!(code.to_string(), "4444444");
    }

    #[test]
    fn apply_to_clamps_each_trait() {
        let mut code: GeneticCode = "6444442".parse().unwrap();
        let mud = resolve(&[source("+3 A, -1 S"), source("+3 A, min N")]);
        mud.apply_to(&mut code);
        assert_eq!(code.to_string(), "7144441");
    }
}
