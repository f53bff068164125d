//! Mudborne Headless Mud Harness
//!
//! Validates the bundled catalogs and the mud mixing rules end to end.
//! Runs entirely in-process: no rendering, no save files.
//!
//! Usage:
//!   cargo run -p mudborne-simtest
//!   cargo run -p mudborne-simtest -- --verbose
//!   cargo run -p mudborne-simtest -- --species path/to/species.json
//!
//! Set `RUST_LOG=debug` to see every mixing step.

use log::info;
use mudborne_logic::environment::{
    EnvironmentRegistry, Humidity, Location, Named, Temperature, TileType, TimeOfDay, Weather,
};
use mudborne_logic::frog::{apply, Frog, SpeciesRegistry};
use mudborne_logic::fungi::{find, mushroom_catalog, validate_catalog, Mushroom};
use mudborne_logic::genetics::{TraitCode, TRAIT_MAX, TRAIT_MIN};
use mudborne_logic::modifier::{MultiTraitModifier, Operation, SingleTraitModifier};
use mudborne_logic::mud::{resolve, Mud};
use mudborne_logic::MudborneError;
use rand::{rngs::StdRng, Rng, SeedableRng};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    species_path: Option<String>,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let species_path = args
        .iter()
        .position(|a| a == "--species")
        .and_then(|i| args.get(i + 1).cloned());
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        species_path,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let options = parse_args();
    println!("=== Mudborne Mud Harness ===\n");

    let environment = EnvironmentRegistry::standard();
    let species = match load_species(&options) {
        Ok(registry) => registry,
        Err(e) => {
            println!("✗ could not load species catalog: {e}");
            std::process::exit(1);
        }
    };
    let fungi = match mushroom_catalog(&environment) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("✗ could not load fungi catalog: {e}");
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Environment tables
    results.extend(validate_environment(options.verbose));

    // 2. Fungi catalog
    results.extend(validate_fungi(&fungi, options.verbose));

    // 3. Species catalog
    results.extend(validate_species(&species, options.verbose));

    // 4. Mixing rules
    results.extend(validate_mixing_rules());

    // 5. Randomized clamp sweep
    results.extend(validate_clamp_sweep(&species));

    // 6. End-to-end mutation
    results.extend(validate_mutation(&species, &fungi));

    // 7. Pairwise mushroom sweep
    results.extend(sweep_mushroom_pairs(&species, &fungi, options.verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_species(options: &Options) -> Result<SpeciesRegistry, MudborneError> {
    match &options.species_path {
        Some(path) => {
            info!("loading species catalog from {path}");
            let json = std::fs::read_to_string(path)
                .map_err(|e| MudborneError::InvalidCatalog(format!("{path}: {e}")))?;
            SpeciesRegistry::from_json(&json)
        }
        None => SpeciesRegistry::bundled(),
    }
}

fn single(modifiers: &[SingleTraitModifier]) -> MultiTraitModifier {
    modifiers.iter().copied().collect()
}

// ── 1. Environment ──────────────────────────────────────────────────────

fn validate_environment(verbose: bool) -> Vec<TestResult> {
    println!("--- Environment Tables ---");
    let mut results = Vec::new();

    let paired = Location::all()
        .iter()
        .all(|l| l.paired().paired() == *l && l.paired().domain() != l.domain());
    results.push(TestResult {
        name: "environment_locations_paired".into(),
        passed: paired,
        detail: format!("{} locations, each mirrored across domains", Location::all().len()),
    });

    // Natural temperatures never reach the machine-only extremes
    let natural_temps: Vec<Temperature> = TimeOfDay::all()
        .iter()
        .flat_map(|&t| Weather::all().iter().map(move |&w| Temperature::natural(t, w)))
        .collect();
    results.push(TestResult {
        name: "environment_no_natural_extremes".into(),
        passed: !natural_temps
            .iter()
            .any(|t| matches!(t, Temperature::Hot | Temperature::Frozen)),
        detail: "Hot and Frozen only come from machines".into(),
    });

    let rain_adds_one = [TileType::Inside, TileType::Grass, TileType::Mud, TileType::Water]
        .iter()
        .all(|&tile| {
            match (
                Humidity::natural(tile, Weather::NotRaining),
                Humidity::natural(tile, Weather::Raining),
            ) {
                (Some(dry), Some(wet)) => wet.level() == dry.level() + 1,
                _ => false,
            }
        });
    results.push(TestResult {
        name: "environment_rain_humidity".into(),
        passed: rain_adds_one,
        detail: "rain raises tile humidity by one step".into(),
    });

    if verbose {
        println!("  Natural temperature by time (clear / snowing):");
        for &time in TimeOfDay::all() {
            println!(
                "    {:10} {:7} / {}",
                time.name(),
                Temperature::natural(time, Weather::NotRaining).name(),
                Temperature::natural(time, Weather::Snowing).name()
            );
        }
    }

    results
}

// ── 2. Fungi ────────────────────────────────────────────────────────────

fn validate_fungi(fungi: &[Mushroom], verbose: bool) -> Vec<TestResult> {
    println!("--- Fungi Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "fungi_catalog_size".into(),
        passed: fungi.len() == 24,
        detail: format!("{} mushrooms loaded", fungi.len()),
    });

    let issues = validate_catalog(fungi);
    results.push(TestResult {
        name: "fungi_catalog_rules".into(),
        passed: issues.is_empty(),
        detail: if issues.is_empty() {
            "names unique, Waking fungi additive only".into()
        } else {
            format!("{} issues: {:?}", issues.len(), issues)
        },
    });

    if verbose {
        let mut counts = [0usize; 5];
        for e in fungi.iter().flat_map(|m| &m.effects) {
            let slot = match e.operation {
                Operation::Add => 0,
                Operation::Mult => 1,
                Operation::Min => 2,
                Operation::Max => 3,
                Operation::Suppress => 4,
            };
            counts[slot] += 1;
        }
        println!("  Effects by operation:");
        for (name, count) in ["add", "mult", "min", "max", "suppress"].iter().zip(counts) {
            println!("    {:8}: {}", name, count);
        }
    }

    results
}

// ── 3. Species ──────────────────────────────────────────────────────────

fn validate_species(species: &SpeciesRegistry, verbose: bool) -> Vec<TestResult> {
    println!("--- Species Catalog ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "species_not_empty".into(),
        passed: !species.all_species().is_empty(),
        detail: format!(
            "{} species, {} variants",
            species.all_species().len(),
            species.all_variants().len()
        ),
    });

    let self_identifying = species
        .all_species()
        .iter()
        .all(|s| species.identify(&s.canonical).map(|id| species.species(id.species).name == s.name) == Some(true));
    results.push(TestResult {
        name: "species_identify_self".into(),
        passed: self_identifying,
        detail: "every canonical code identifies its own species".into(),
    });

    if verbose {
        for s in species.all_species() {
            println!(
                "    {:20} {} {:?}",
                s.name,
                s.canonical,
                s.flavors.flavors()
            );
        }
    }

    results
}

// ── 4. Mixing Rules ─────────────────────────────────────────────────────

fn validate_mixing_rules() -> Vec<TestResult> {
    println!("--- Mixing Rules ---");
    let mut results = Vec::new();
    let a = TraitCode::A;

    let sum = resolve(&[single(&[SingleTraitModifier::add(a, 1), SingleTraitModifier::add(a, 2)])]);
    results.push(TestResult {
        name: "mix_additives_sum".into(),
        passed: sum.effective(a) == Some(&SingleTraitModifier::add(a, 3)),
        detail: "{+1, +2} → +3".into(),
    });

    let inverted = resolve(&[single(&[SingleTraitModifier::add(a, 2), SingleTraitModifier::mult(a, -1)])]);
    results.push(TestResult {
        name: "mix_multiplier_scales".into(),
        passed: inverted.effective(a) == Some(&SingleTraitModifier::add(a, -2)),
        detail: "{+2, x-1} → -2".into(),
    });

    let suppressed = resolve(&[single(&[
        SingleTraitModifier::max(a),
        SingleTraitModifier::add(a, 5),
        SingleTraitModifier::suppress(a),
    ])]);
    results.push(TestResult {
        name: "mix_suppress_wins".into(),
        passed: suppressed.effective(a).is_none(),
        detail: "suppress nullifies max and +5".into(),
    });

    let min_first = resolve(&[single(&[SingleTraitModifier::min(a)]), single(&[SingleTraitModifier::max(a)])]);
    let max_first = resolve(&[single(&[SingleTraitModifier::max(a)]), single(&[SingleTraitModifier::min(a)])]);
    results.push(TestResult {
        name: "mix_clamp_first_seen".into(),
        passed: min_first.effective(a).map(|m| m.operation) == Some(Operation::Min)
            && max_first.effective(a).map(|m| m.operation) == Some(Operation::Max)
            && !min_first.diagnostics().is_empty(),
        detail: "min/max conflict keeps first seen and reports it".into(),
    });

    results
}

// ── 5. Clamp Sweep ──────────────────────────────────────────────────────

fn validate_clamp_sweep(species: &SpeciesRegistry) -> Vec<TestResult> {
    println!("--- Randomized Clamp Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0x4d55_4421);
    let ops = [
        Operation::Add,
        Operation::Mult,
        Operation::Min,
        Operation::Max,
        Operation::Suppress,
    ];

    let trials = 5_000;
    let mut escapes = 0;
    for _ in 0..trials {
        let code: String = (0..7)
            .map(|_| char::from(b'0' + rng.gen_range(TRAIT_MIN..=TRAIT_MAX)))
            .collect();
        let Ok(mut frog) = Frog::new(&code, None, None, "Sour") else {
            escapes += 1;
            continue;
        };
        let sources: Vec<MultiTraitModifier> = (0..rng.gen_range(1..=4))
            .map(|_| {
                (0..rng.gen_range(1..=3))
                    .map(|_| {
                        SingleTraitModifier::new(
                            TraitCode::ALL[rng.gen_range(0..TraitCode::ALL.len())],
                            ops[rng.gen_range(0..ops.len())],
                            rng.gen_range(-50..=50),
                        )
                    })
                    .collect()
            })
            .collect();
        let mud = resolve(&sources);
        if apply(&mud, &mut frog, species).is_err()
            || !frog
                .genetics()
                .values()
                .iter()
                .all(|v| (TRAIT_MIN..=TRAIT_MAX).contains(v))
        {
            escapes += 1;
        }
    }

    results.push(TestResult {
        name: "clamp_sweep_in_range".into(),
        passed: escapes == 0,
        detail: format!("{trials} random muds, {escapes} out-of-range results"),
    });

    results
}

// ── 6. Mutation ─────────────────────────────────────────────────────────

fn validate_mutation(species: &SpeciesRegistry, fungi: &[Mushroom]) -> Vec<TestResult> {
    println!("--- Mutation ---");
    let mut results = Vec::new();

    let Ok(mut frog) = species.spawn("Common Green") else {
        results.push(TestResult {
            name: "mutation_common_green".into(),
            passed: false,
            detail: "catalog has no Common Green".into(),
        });
        return results;
    };
    let flavors_before = frog.preferred_flavors().clone();
    let mud = resolve(&[
        single(&[SingleTraitModifier::add(TraitCode::N, 2)]),
        single(&[SingleTraitModifier::add(TraitCode::O, 2)]),
    ]);
    let outcome = apply(&mud, &mut frog, species);
    results.push(TestResult {
        name: "mutation_common_to_pungent".into(),
        passed: outcome.is_ok()
            && frog.genetics().to_string() == "4664444"
            && frog.species() == Some("Pungent Green")
            && *frog.preferred_flavors() == flavors_before,
        detail: format!("{frog}, flavors {:?}", frog.preferred_flavors().flavors()),
    });

    let again = apply(&mud, &mut frog, species);
    results.push(TestResult {
        name: "mutation_one_batch_only".into(),
        passed: again == Err(MudborneError::AlreadyMudded),
        detail: "second batch rejected".into(),
    });

    // Stout Funnel twice on a 6 in Amplitude lands on 7, not 8
    if let (Some(funnel), Ok(mut big)) = (
        find(fungi, "Stout Funnel"),
        Frog::new("6444444", None, None, "Salty"),
    ) {
        let mud = Mud::from_mushrooms(&[funnel, funnel]);
        let ok = apply(&mud, &mut big, species).is_ok();
        results.push(TestResult {
            name: "mutation_clamped_at_max".into(),
            passed: ok && big.genetics().get(TraitCode::A).value() == TRAIT_MAX,
            detail: format!("6 + 1 + 1 → {}", big.genetics().get(TraitCode::A).value()),
        });
    }

    results
}

// ── 7. Pairwise Sweep ───────────────────────────────────────────────────

fn sweep_mushroom_pairs(
    species: &SpeciesRegistry,
    fungi: &[Mushroom],
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Pairwise Mushroom Sweep ---");
    let mut results = Vec::new();
    let mut failures = 0;
    let mut mutations = Vec::new();

    for base in species.all_species() {
        for first in fungi {
            for second in fungi {
                let Ok(mut frog) = species.spawn(&base.name) else {
                    failures += 1;
                    continue;
                };
                let mud = Mud::from_mushrooms(&[first, second]);
                match apply(&mud, &mut frog, species) {
                    Ok(outcome) => {
                        if let Some(m) = outcome.mutation {
                            mutations.push(format!(
                                "{} + {} : {} → {}",
                                first.name, second.name, base.name, m.to_species
                            ));
                        }
                    }
                    Err(_) => failures += 1,
                }
            }
        }
    }

    let combos = species.all_species().len() * fungi.len() * fungi.len();
    results.push(TestResult {
        name: "sweep_pairs_apply".into(),
        passed: failures == 0,
        detail: format!("{combos} combinations, {} mutations", mutations.len()),
    });

    if verbose {
        println!("  Mutating pairs:");
        for m in &mutations {
            println!("    {m}");
        }
        if let Some(first) = fungi.first() {
            let mud = Mud::from_mushrooms(&[first, first]);
            if let Ok(json) = serde_json::to_string_pretty(&mud) {
                println!("  Example mud ({} x2):\n{json}", first.name);
            }
        }
    }

    results
}
