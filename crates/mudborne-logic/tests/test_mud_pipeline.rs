//! Integration tests for the full mud pipeline.
//!
//! Exercises: mushroom catalog → MultiTraitModifier → Mud → Frog → species lookup
//!
//! All tests are pure logic, driven through the public API only.

use mudborne_logic::environment::{EnvironmentRegistry, Flavor};
use mudborne_logic::frog::{apply, Frog, SpeciesRegistry};
use mudborne_logic::fungi::{find, mushroom_catalog, Mushroom};
use mudborne_logic::genetics::TraitCode;
use mudborne_logic::modifier::{parse_effects, MultiTraitModifier, Operation};
use mudborne_logic::mud::{resolve, MixDiagnostic, Mud};
use mudborne_logic::MudborneError;

// ── Helpers ────────────────────────────────────────────────────────────

fn catalog() -> Vec<Mushroom> {
    mushroom_catalog(&EnvironmentRegistry::standard()).expect("bundled fungi are valid")
}

fn species() -> SpeciesRegistry {
    SpeciesRegistry::bundled().expect("bundled species are valid")
}

fn source(effects: &str) -> MultiTraitModifier {
    parse_effects(effects).unwrap().into_iter().collect()
}

fn mud_from(names: &[&str]) -> Mud {
    let all = catalog();
    let picked: Vec<&Mushroom> = names
        .iter()
        .map(|n| find(&all, n).unwrap_or_else(|| panic!("no mushroom {n}")))
        .collect();
    Mud::from_mushrooms(&picked)
}

// ── End-to-end scenarios ───────────────────────────────────────────────

#[test]
fn common_green_becomes_pungent_green() {
    let registry = species();
    let mut frog = registry.spawn("Common Green").unwrap();
    let mud = resolve(&[source("+2 N"), source("+2 O")]);

    let outcome = apply(&mud, &mut frog, &registry).unwrap();

    assert_eq!(frog.genetics().to_string(), "4664444");
    assert_eq!(frog.species(), Some("Pungent Green"));
    assert_eq!(frog.preferred_flavors().flavors(), &[Flavor::Salty]);
    assert!(outcome.mutation.is_some());
}

#[test]
fn catalog_mushrooms_drive_the_same_mutation() {
    // Two Flat Stinkhorns: +1 N, +1 O each
    let registry = species();
    let mut frog = registry.spawn("Common Green").unwrap();
    let mud = mud_from(&["Flat Stinkhorn", "Flat Stinkhorn"]);
    assert_eq!(mud.effective(TraitCode::N).unwrap().scalar, 2);

    apply(&mud, &mut frog, &registry).unwrap();
    assert_eq!(frog.species(), Some("Pungent Green"));
}

#[test]
fn stacked_additions_clamp_at_seven() {
    let registry = species();
    let mut frog = Frog::new("6444444", None, None, "Sweet").unwrap();
    let mud = resolve(&[source("+3 A"), source("+3 A")]);
    assert_eq!(mud.effective(TraitCode::A).unwrap().scalar, 6);

    apply(&mud, &mut frog, &registry).unwrap();
    assert_eq!(frog.genetics().get(TraitCode::A).value(), 7);
}

#[test]
fn mirror_inverts_stinkhorn() {
    // Flat Stinkhorn +1 N, Fool's Mirror x-1 N → net -1 N. A gets a lone x-1, kept as-is
    let registry = species();
    let mut frog = registry.spawn("Common Green").unwrap();
    let mud = mud_from(&["Flat Stinkhorn", "Fool's Mirror"]);

    assert_eq!(mud.effective(TraitCode::N).unwrap().scalar, -1);
    assert_eq!(mud.effective(TraitCode::A).unwrap().operation, Operation::Mult);

    apply(&mud, &mut frog, &registry).unwrap();
    assert_eq!(frog.genetics().get(TraitCode::N).value(), 3);
    assert_eq!(frog.species(), Some("Common Green"));
}

#[test]
fn suppressor_cancels_the_batch_on_its_trait() {
    // Bothersome Fungus +1 U, False Suppressor suppress U → U untouched
    let mud = mud_from(&["Bothersome Fungus", "False Suppressor"]);
    assert!(mud.effective(TraitCode::U).is_none());
    // E: +1 and x2 → +2
    assert_eq!(mud.effective(TraitCode::E).unwrap().scalar, 2);
}

#[test]
fn clamp_conflict_is_observable_and_order_dependent() {
    // Torrential Prune: min A, MAX S. Booming Mane: MAX O, MAX R.
    let a = resolve(&[source("min S"), find(&catalog(), "Torrential Prune").unwrap().modifier()]);
    assert_eq!(a.effective(TraitCode::S).unwrap().operation, Operation::Min);
    assert!(a
        .diagnostics()
        .iter()
        .any(|d| matches!(d, MixDiagnostic::AmbiguousClampConflict { code: TraitCode::S, .. })));

    let b = resolve(&[find(&catalog(), "Torrential Prune").unwrap().modifier(), source("min S")]);
    assert_eq!(b.effective(TraitCode::S).unwrap().operation, Operation::Max);
}

#[test]
fn hybrid_mushroom_equals_mixing_both_parents() {
    let all = catalog();
    let stinkhorn = find(&all, "Flat Stinkhorn").unwrap();
    let amplifier = find(&all, "Squat Amplifier").unwrap();
    let hybrid = Mushroom::hybridize("Amplified Stinkhorn", stinkhorn, amplifier);

    let from_hybrid = Mud::from_mushrooms(&[&hybrid]);
    let from_parents = Mud::from_mushrooms(&[stinkhorn, amplifier]);
    assert_eq!(from_hybrid, from_parents);
    assert_eq!(from_hybrid.effective(TraitCode::N).unwrap().scalar, 2);
}

#[test]
fn frog_accepts_only_one_batch() {
    let registry = species();
    let mut frog = registry.spawn("Common Green").unwrap();
    apply(&mud_from(&["Stout Funnel"]), &mut frog, &registry).unwrap();
    let after_first = frog.genetics().to_string();

    let err = apply(&mud_from(&["Chill Pill"]), &mut frog, &registry).unwrap_err();
    assert_eq!(err, MudborneError::AlreadyMudded);
    assert_eq!(frog.genetics().to_string(), after_first);
}

#[test]
fn every_catalog_mushroom_keeps_codes_in_range() {
    let registry = species();
    for mushroom in catalog() {
        for base in ["1111111", "4444444", "7777777"] {
            let mut frog = Frog::new(base, None, None, "Slimy").unwrap();
            let mud = Mud::from_mushrooms(&[&mushroom, &mushroom]);
            apply(&mud, &mut frog, &registry).unwrap();
            assert!(
                frog.genetics().values().iter().all(|v| (1..=7).contains(v)),
                "{} on {base} produced {}",
                mushroom.name,
                frog.genetics()
            );
        }
    }
}
