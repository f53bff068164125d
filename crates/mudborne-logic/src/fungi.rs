//! Fungi catalog — mushroom growing conditions and their mud effects.
//!
//! Fungi native to the Waking domain always have simple additive (or
//! subtractive) effects. Dream fungi may multiply other fungi's effects,
//! clamp a trait to its minimum or maximum, or suppress a trait entirely.
//! Each species grows in exactly one set of conditions; hybrids grown from
//! spore prints may grow under either parent's conditions.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::environment::{Domain, EnvironmentRegistry, Humidity, Temperature, TileType, Weather};
use crate::error::Result;
use crate::modifier::{parse_effects, MultiTraitModifier, Operation, SingleTraitModifier};

/// Conditions under which a mushroom will grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrowingConditions {
    pub domain: Domain,
    pub tile_type: TileType,
    pub temperature: Temperature,
    pub humidity: Humidity,
    pub weather: Weather,
}

/// A mushroom species (or hybrid) and the effects it contributes to mud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mushroom {
    pub name: String,
    /// One entry for a pure species, up to two for a hybrid.
    pub conditions: Vec<GrowingConditions>,
    pub effects: Vec<SingleTraitModifier>,
}

impl Mushroom {
    /// Declare a mushroom from catalog text, validating every field.
    #[allow(clippy::too_many_arguments)]
    pub fn declare(
        registry: &EnvironmentRegistry,
        name: &str,
        domain: &str,
        tile_type: &str,
        temperature: &str,
        humidity: &str,
        weather: &str,
        effects: &str,
    ) -> Result<Self> {
        let conditions = GrowingConditions {
            domain: registry.domain(domain)?,
            tile_type: registry.tile_type(tile_type)?,
            temperature: registry.temperature(temperature)?,
            humidity: registry.humidity(humidity)?,
            weather: registry.weather(weather)?,
        };
        Ok(Self {
            name: name.to_string(),
            conditions: vec![conditions],
            effects: parse_effects(effects)?,
        })
    }

    /// Cross two mushrooms. Conditions are the union of both parents';
    /// effects are kept side by side, unsimplified, first parent first.
    pub fn hybridize(name: &str, first: &Mushroom, second: &Mushroom) -> Self {
        let mut conditions = first.conditions.clone();
        for c in &second.conditions {
            if !conditions.contains(c) {
                conditions.push(*c);
            }
        }
        let effects = first
            .effects
            .iter()
            .chain(&second.effects)
            .copied()
            .collect();
        debug!("hybridized {} x {} into {name}", first.name, second.name);
        Self {
            name: name.to_string(),
            conditions,
            effects,
        }
    }

    /// This mushroom's effects bucketed by trait, ready to mix.
    pub fn modifier(&self) -> MultiTraitModifier {
        self.effects.iter().copied().collect()
    }

    pub fn can_grow(&self, conditions: &GrowingConditions) -> bool {
        self.conditions.contains(conditions)
    }

    pub fn domains(&self) -> Vec<Domain> {
        let mut domains: Vec<Domain> = Vec::new();
        for c in &self.conditions {
            if !domains.contains(&c.domain) {
                domains.push(c.domain);
            }
        }
        domains
    }

    pub fn is_hybrid(&self) -> bool {
        self.conditions.len() > 1
    }
}

/// Catalog-level problem found by [`validate_catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two entries share a name.
    DuplicateName(String),
    /// A Waking-only mushroom with a non-additive effect.
    NonAdditiveWakingEffect { mushroom: String, effect: String },
    /// A mushroom that does nothing.
    NoEffects(String),
}

/// Check catalog-wide rules, returning every problem found.
pub fn validate_catalog(mushrooms: &[Mushroom]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    for (i, m) in mushrooms.iter().enumerate() {
        if mushrooms[..i].iter().any(|other| other.name == m.name) {
            issues.push(CatalogIssue::DuplicateName(m.name.clone()));
        }
        if m.effects.is_empty() {
            issues.push(CatalogIssue::NoEffects(m.name.clone()));
        }
        if m.domains() == [Domain::Waking] {
            for e in m.effects.iter().filter(|e| e.operation != Operation::Add) {
                issues.push(CatalogIssue::NonAdditiveWakingEffect {
                    mushroom: m.name.clone(),
                    effect: e.to_string(),
                });
            }
        }
    }
    issues
}

// ── Catalog ─────────────────────────────────────────────────────────────

/// (name, domain, tile, temperature, humidity, weather, effects)
type MushroomRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const MUSHROOMS: &[MushroomRow] = &[
    ("Stout Funnel", "Waking", "water", "Balmy", "Drenched", "raining", "+1 A"),
    ("Flat Stinkhorn", "Waking", "grass", "Balmy", "Normal", "not raining", "+1 N, +1 O"),
    ("Bothersome Fungus", "Waking", "mud", "Warm", "Damp", "not raining", "+1 U, +1 E"),
    ("Withering Rot", "Waking", "mud", "Chilly", "Damp", "not raining", "-1 A, -1 S"),
    ("Shrinking Cap", "Waking", "stagnant water", "Balmy", "Damp", "not raining", "-1 A, -1 O"),
    ("Pickled Bonnet", "Waking", "inside", "Mild", "Parched", "not raining", "+1 A, +1 S"),
    ("Raucous Conecap", "Waking", "water", "Balmy", "Waterlogged", "raining", "+1 O, +1 R"),
    ("Grubby Parachute", "Waking", "mud", "Warm", "Wet", "not raining", "-1 N"),
    ("Frosty Jack", "Waking", "water", "Hot", "Wet", "not raining", "-1 U, +1 E"),
    ("Filling Oyster", "Waking", "grass", "Frozen", "Normal", "raining", "-1 E"),
    ("Bulbous Muffler", "Waking", "mud", "Cold", "Damp", "snowing", "-1 R"),
    ("Squat Amplifier", "Dream", "mud", "Balmy", "Wet", "raining", "x2 N, x2 U"),
    ("Towering Expander", "Dream", "grass", "Warm", "Normal", "not raining", "x2 N"),
    ("Fool's Mirror", "Dream", "water", "Chilly", "Wet", "not raining", "x-1 A, x-1 N"),
    ("Bloating Mould", "Dream", "inside", "Mild", "Dry", "not raining", "suppress O, x2 S"),
    ("Stinking Bolete", "Dream", "stagnant water", "Warm", "Damp", "not raining", "suppress N, x2 O"),
    ("Pointed Deceiver", "Dream", "inside", "Mild", "Normal", "not raining", "suppress A, -1 S"),
    ("Chattering Bell", "Dream", "grass", "Chilly", "Damp", "raining", "x-1 O, x2 R"),
    ("False Suppressor", "Dream", "inside", "Chilly", "Dry", "not raining", "suppress U, x2 E"),
    ("Velvet Inverter", "Dream", "grass", "Hot", "Normal", "not raining", "x-1 R, x-1 E"),
    ("Rude Awakening", "Dream", "grass", "Hot", "Damp", "raining", "min N"),
    ("Torrential Prune", "Dream", "mud", "Mild", "Normal", "not raining", "min A, MAX S"),
    ("Booming Mane", "Dream", "water", "Mild", "Damp", "not raining", "MAX O, MAX R"),
    ("Chill Pill", "Dream", "inside", "Chilly", "Normal", "not raining", "min U"),
];

/// Every mushroom species in the game, validated against `registry`.
pub fn mushroom_catalog(registry: &EnvironmentRegistry) -> Result<Vec<Mushroom>> {
    MUSHROOMS
        .iter()
        .map(|&(name, domain, tile, temperature, humidity, weather, effects)| {
            Mushroom::declare(registry, name, domain, tile, temperature, humidity, weather, effects)
        })
        .collect()
}

/// Look up a catalog mushroom by name.
pub fn find<'a>(catalog: &'a [Mushroom], name: &str) -> Option<&'a Mushroom> {
    catalog.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MudborneError;
    use crate::genetics::{GeneticCode, TraitCode};
    use crate::mud::Mud;

    fn catalog() -> Vec<Mushroom> {
        mushroom_catalog(&EnvironmentRegistry::standard()).unwrap()
    }

    #[test]
    fn catalog_loads_and_is_consistent() {
        let all = catalog();
        assert_eq!(all.len(), 24);
        assert_eq!(all.iter().filter(|m| m.domains() == [Domain::Waking]).count(), 11);
        assert_eq!(all.iter().filter(|m| m.domains() == [Domain::Dream]).count(), 13);
        assert!(validate_catalog(&all).is_empty(), "{:?}", validate_catalog(&all));
    }

    #[test]
    fn catalog_effects_parse() {
        let all = catalog();
        let prune = find(&all, "Torrential Prune").unwrap();
        assert_eq!(
            prune.effects,
            vec![SingleTraitModifier::min(TraitCode::A), SingleTraitModifier::max(TraitCode::S)]
        );
        let mirror = find(&all, "Fool's Mirror").unwrap();
        assert_eq!(mirror.modifier().bucket(TraitCode::N), &[SingleTraitModifier::mult(TraitCode::N, -1)]);
    }

    #[test]
    fn compact_effect_text_declares_the_same_mushroom() {
        let registry = EnvironmentRegistry::standard();
        let compact =
            Mushroom::declare(&registry, "Torrential Prune", "Dream", "mud", "Mild", "Normal", "not raining", "mA, MS")
                .unwrap();
        assert_eq!(&compact, find(&catalog(), "Torrential Prune").unwrap());
    }

    #[test]
    fn zero_multiplier_is_not_a_suppress() {
        let registry = EnvironmentRegistry::standard();
        let all = catalog();
        let bloating = find(&all, "Bloating Mould").unwrap();
        assert_eq!(bloating.effects[0], SingleTraitModifier::suppress(TraitCode::O));

        let zeroed =
            Mushroom::declare(&registry, "Zeroed Mould", "Dream", "inside", "Mild", "Dry", "not raining", "x0O, x2S")
                .unwrap();
        assert_eq!(zeroed.effects[0], SingleTraitModifier::mult(TraitCode::O, 0));

        let mut suppressed: GeneticCode = "4444444".parse().unwrap();
        Mud::from_mushrooms(&[bloating]).apply_to(&mut suppressed);
        assert_eq!(suppressed.to_string(), "4444447");

        let mut zero: GeneticCode = "4444444".parse().unwrap();
        Mud::from_mushrooms(&[&zeroed]).apply_to(&mut zero);
        assert_eq!(zero.to_string(), "4414447");
    }

    #[test]
    fn declare_rejects_bad_environment() {
        let registry = EnvironmentRegistry::standard();
        let err = Mushroom::declare(&registry, "Broken", "Dreaming", "water", "Mild", "Wet", "raining", "+1 A");
        assert!(matches!(err, Err(MudborneError::InvalidEnvironmentValue { kind: "domain", .. })));
        assert!(Mushroom::declare(&registry, "Broken", "Dream", "lava", "Mild", "Wet", "raining", "+1 A").is_err());
        assert!(Mushroom::declare(&registry, "Broken", "Dream", "water", "Tepid", "Wet", "raining", "+1 A").is_err());
        assert!(Mushroom::declare(&registry, "Broken", "Dream", "water", "Mild", "Soggy", "raining", "+1 A").is_err());
        assert!(Mushroom::declare(&registry, "Broken", "Dream", "water", "Mild", "Wet", "hail", "+1 A").is_err());
    }

    #[test]
    fn declare_rejects_bad_effects() {
        let registry = EnvironmentRegistry::standard();
        let err = Mushroom::declare(&registry, "Broken", "Dream", "water", "Mild", "Wet", "raining", "+1 X");
        assert_eq!(err, Err(MudborneError::InvalidTraitCode("X".into())));
    }

    #[test]
    fn hybrid_unions_conditions_and_keeps_effects() {
        let all = catalog();
        let funnel = find(&all, "Stout Funnel").unwrap();
        let mirror = find(&all, "Fool's Mirror").unwrap();
        let hybrid = Mushroom::hybridize("Mirrored Funnel", funnel, mirror);

        assert!(hybrid.is_hybrid());
        assert_eq!(hybrid.domains(), vec![Domain::Waking, Domain::Dream]);
        assert!(hybrid.can_grow(&funnel.conditions[0]));
        assert!(hybrid.can_grow(&mirror.conditions[0]));
        assert_eq!(
            hybrid.modifier().bucket(TraitCode::A),
            &[SingleTraitModifier::add(TraitCode::A, 1), SingleTraitModifier::mult(TraitCode::A, -1)]
        );
        // Hybrids spanning both domains are not held to the Waking additive rule
        assert!(validate_catalog(&[hybrid]).is_empty());
    }

    #[test]
    fn self_hybrid_does_not_duplicate_conditions() {
        let all = catalog();
        let chill = find(&all, "Chill Pill").unwrap();
        let twin = Mushroom::hybridize("Double Chill", chill, chill);
        assert!(!twin.is_hybrid());
        assert_eq!(twin.effects.len(), 2);
    }

    #[test]
    fn validation_reports_problems() {
        let registry = EnvironmentRegistry::standard();
        let bad = Mushroom::declare(&registry, "Odd Cap", "Waking", "mud", "Mild", "Damp", "not raining", "x2 A").unwrap();
        let dup = bad.clone();
        let issues = validate_catalog(&[bad, dup]);
        assert!(issues.contains(&CatalogIssue::DuplicateName("Odd Cap".into())));
        assert!(issues.contains(&CatalogIssue::NonAdditiveWakingEffect {
            mushroom: "Odd Cap".into(),
            effect: "x2 A".into()
        }));

        let empty = Mushroom::declare(&registry, "Blank", "Dream", "mud", "Mild", "Damp", "not raining", "").unwrap();
        assert_eq!(validate_catalog(&[empty]), vec![CatalogIssue::NoEffects("Blank".into())]);
    }
}
