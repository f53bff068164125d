//! Frogs, the species registry, and applying mud to frog spawn.
//!
//! A frog's `genetics` is its current code; its species and variant only
//! change when that code exactly matches another registered species' or
//! variant's canonical code. Flavor preference belongs to the lineage, not
//! the match: a frog that mutates keeps the flavors of the identity it had
//! before the mud.
//!
//! Frog spawn can be exposed to exactly one batch of mud. The mud may do
//! nothing, but it still counts.
//!
//! Every species has a base form plus variants that differ only in
//! appearance and canonical code. Variants never carry their own flavors.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::environment::Flavor;
use crate::error::{MudborneError, Result};
use crate::genetics::GeneticCode;
use crate::mud::Mud;

/// Bundled species catalog (same JSON the simtest harness reads).
const SPECIES_JSON: &str = include_str!("../../../data/species.json");

// ============================================================================
// FLAVORS
// ============================================================================

/// One or two distinct flavors a species' tadpoles must be fed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Flavor>", into = "Vec<Flavor>")]
pub struct FlavorSet(Vec<Flavor>);

impl FlavorSet {
    pub fn new(flavors: Vec<Flavor>) -> Result<Self> {
        let distinct = match flavors.as_slice() {
            [_] => true,
            [a, b] => a != b,
            _ => false,
        };
        if !distinct {
            let names: Vec<String> = flavors.iter().map(|f| format!("{f:?}")).collect();
            return Err(MudborneError::InvalidFlavorSet(names.join(", ")));
        }
        Ok(Self(flavors))
    }

    pub fn flavors(&self) -> &[Flavor] {
        &self.0
    }

    pub fn contains(&self, flavor: Flavor) -> bool {
        self.0.contains(&flavor)
    }
}

impl FromStr for FlavorSet {
    type Err = MudborneError;

    /// Parse `"Salty"` or `"Sweet, Sour"`.
    fn from_str(s: &str) -> Result<Self> {
        let flavors = s
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| f.parse::<Flavor>())
            .collect::<Result<Vec<_>>>()
            .map_err(|_| MudborneError::InvalidFlavorSet(s.to_string()))?;
        Self::new(flavors)
    }
}

impl TryFrom<Vec<Flavor>> for FlavorSet {
    type Error = MudborneError;

    fn try_from(flavors: Vec<Flavor>) -> Result<Self> {
        Self::new(flavors)
    }
}

impl From<FlavorSet> for Vec<Flavor> {
    fn from(set: FlavorSet) -> Self {
        set.0
    }
}

// ============================================================================
// SPECIES REGISTRY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(pub usize);

/// A base species as listed in the encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub canonical: GeneticCode,
    pub flavors: FlavorSet,
}

/// An alternate form of a species: its own code, the base species' flavors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub species: SpeciesId,
    pub canonical: GeneticCode,
}

/// Which registry entry a genetic code matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub species: SpeciesId,
    pub variant: Option<VariantId>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    species: Vec<SpeciesRecord>,
}

#[derive(Debug, Deserialize)]
struct SpeciesRecord {
    name: String,
    genetics: GeneticCode,
    flavors: FlavorSet,
    #[serde(default)]
    variants: Vec<VariantRecord>,
}

#[derive(Debug, Deserialize)]
struct VariantRecord {
    name: String,
    genetics: GeneticCode,
}

/// Read-only after loading; safe to share between any number of callers.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    species: Vec<Species>,
    variants: Vec<Variant>,
}

impl SpeciesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The species catalog shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(SPECIES_JSON)
    }

    /// Load a catalog of the form
    /// `{"species": [{"name", "genetics", "flavors", "variants": [{"name", "genetics"}]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| MudborneError::InvalidCatalog(e.to_string()))?;
        let mut registry = Self::new();
        for record in file.species {
            let id = registry.add_species(&record.name, record.genetics, record.flavors)?;
            for variant in record.variants {
                registry.add_variant(id, &variant.name, variant.genetics)?;
            }
        }
        debug!(
            "loaded {} species and {} variants",
            registry.species.len(),
            registry.variants.len()
        );
        Ok(registry)
    }

    pub fn add_species(
        &mut self,
        name: &str,
        canonical: GeneticCode,
        flavors: FlavorSet,
    ) -> Result<SpeciesId> {
        if self.species.iter().any(|s| s.name == name) {
            return Err(MudborneError::InvalidCatalog(format!(
                "duplicate species {name:?}"
            )));
        }
        self.check_unique_code(name, &canonical)?;
        self.species.push(Species {
            name: name.to_string(),
            canonical,
            flavors,
        });
        Ok(SpeciesId(self.species.len() - 1))
    }

    pub fn add_variant(
        &mut self,
        species: SpeciesId,
        name: &str,
        canonical: GeneticCode,
    ) -> Result<VariantId> {
        if species.0 >= self.species.len() {
            return Err(MudborneError::InvalidCatalog(format!(
                "variant {name:?} refers to unknown species #{}",
                species.0
            )));
        }
        if self
            .variants
            .iter()
            .any(|v| v.species == species && v.name == name)
        {
            return Err(MudborneError::InvalidCatalog(format!(
                "duplicate variant {name:?} of {}",
                self.species[species.0].name
            )));
        }
        self.check_unique_code(name, &canonical)?;
        self.variants.push(Variant {
            name: name.to_string(),
            species,
            canonical,
        });
        Ok(VariantId(self.variants.len() - 1))
    }

    /// Codes must be unique so that identification is never ambiguous.
    fn check_unique_code(&self, name: &str, code: &GeneticCode) -> Result<()> {
        let clash = self
            .species
            .iter()
            .map(|s| (&s.name, &s.canonical))
            .chain(self.variants.iter().map(|v| (&v.name, &v.canonical)))
            .find(|(_, c)| *c == code);
        match clash {
            Some((other, _)) => Err(MudborneError::InvalidCatalog(format!(
                "{name:?} has the same genetic code {code} as {other:?}"
            ))),
            None => Ok(()),
        }
    }

    pub fn species(&self, id: SpeciesId) -> &Species {
        &self.species[id.0]
    }

    pub fn variant(&self, id: VariantId) -> &Variant {
        &self.variants[id.0]
    }

    pub fn find_species(&self, name: &str) -> Option<SpeciesId> {
        self.species.iter().position(|s| s.name == name).map(SpeciesId)
    }

    pub fn find_variant(&self, species: SpeciesId, name: &str) -> Option<VariantId> {
        self.variants
            .iter()
            .position(|v| v.species == species && v.name == name)
            .map(VariantId)
    }

    pub fn all_species(&self) -> &[Species] {
        &self.species
    }

    pub fn all_variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variants_of(&self, species: SpeciesId) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(move |v| v.species == species)
    }

    /// Find the species or variant whose canonical code equals `code`.
    pub fn identify(&self, code: &GeneticCode) -> Option<Identity> {
        if let Some(i) = self.species.iter().position(|s| s.canonical == *code) {
            return Some(Identity {
                species: SpeciesId(i),
                variant: None,
            });
        }
        self.variants
            .iter()
            .position(|v| v.canonical == *code)
            .map(|i| Identity {
                species: self.variants[i].species,
                variant: Some(VariantId(i)),
            })
    }

    /// A freshly caught frog of the base species.
    pub fn spawn(&self, species: &str) -> Result<Frog> {
        let id = self
            .find_species(species)
            .ok_or_else(|| MudborneError::UnknownSpecies(species.to_string()))?;
        let s = self.species(id);
        Ok(Frog::from_parts(
            s.canonical,
            s.canonical,
            Some(s.name.clone()),
            None,
            s.flavors.clone(),
        ))
    }

    /// A freshly caught frog of a particular variant.
    pub fn spawn_variant(&self, species: &str, variant: &str) -> Result<Frog> {
        let id = self
            .find_species(species)
            .ok_or_else(|| MudborneError::UnknownSpecies(species.to_string()))?;
        let vid = self
            .find_variant(id, variant)
            .ok_or_else(|| MudborneError::UnknownSpecies(format!("{species} ({variant})")))?;
        let s = self.species(id);
        let v = self.variant(vid);
        Ok(Frog::from_parts(
            v.canonical,
            v.canonical,
            Some(s.name.clone()),
            Some(v.name.clone()),
            s.flavors.clone(),
        ))
    }
}

// ============================================================================
// FROGS
// ============================================================================

/// A catchable frog (or its spawn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frog {
    genetics: GeneticCode,
    canonical_genetics: GeneticCode,
    species: Option<String>,
    variant: Option<String>,
    preferred_flavors: FlavorSet,
    mudded: bool,
}

impl Frog {
    /// Build a frog from a seven-digit code and species metadata.
    ///
    /// The canonical code starts equal to `genetics`.
    pub fn new(
        genetics: &str,
        species: Option<&str>,
        variant: Option<&str>,
        flavors: &str,
    ) -> Result<Self> {
        let genetics: GeneticCode = genetics.parse()?;
        let flavors: FlavorSet = flavors.parse()?;
        Ok(Self::from_parts(
            genetics,
            genetics,
            species.map(str::to_string),
            variant.map(str::to_string),
            flavors,
        ))
    }

    fn from_parts(
        genetics: GeneticCode,
        canonical_genetics: GeneticCode,
        species: Option<String>,
        variant: Option<String>,
        preferred_flavors: FlavorSet,
    ) -> Self {
        Self {
            genetics,
            canonical_genetics,
            species,
            variant,
            preferred_flavors,
            mudded: false,
        }
    }

    pub fn genetics(&self) -> &GeneticCode {
        &self.genetics
    }

    pub fn canonical_genetics(&self) -> &GeneticCode {
        &self.canonical_genetics
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub fn preferred_flavors(&self) -> &FlavorSet {
        &self.preferred_flavors
    }

    pub fn has_received_mud(&self) -> bool {
        self.mudded
    }

    /// The code this frog would end up with, without touching it.
    pub fn preview(&self, mud: &Mud) -> GeneticCode {
        let mut code = self.genetics;
        mud.apply_to(&mut code);
        code
    }
}

impl fmt::Display for Frog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.species, &self.variant) {
            (Some(s), Some(v)) => write!(f, "{s} ({v})")?,
            (Some(s), None) => write!(f, "{s}")?,
            _ => write!(f, "Unknown frog")?,
        }
        write!(f, " [{}]", self.genetics)
    }
}

// ============================================================================
// APPLYING MUD
// ============================================================================

/// Species/variant change caused by a mud application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub from_species: Option<String>,
    pub from_variant: Option<String>,
    pub to_species: String,
    pub to_variant: Option<String>,
}

/// Result of a successful [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MudOutcome {
    pub before: GeneticCode,
    pub after: GeneticCode,
    pub mutation: Option<Mutation>,
}

impl MudOutcome {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Expose a frog to mixed mud, then check whether it became another species.
///
/// Fails with [`MudborneError::AlreadyMudded`] (leaving the frog untouched)
/// if the frog has received mud before.
pub fn apply(mud: &Mud, frog: &mut Frog, registry: &SpeciesRegistry) -> Result<MudOutcome> {
    if frog.mudded {
        return Err(MudborneError::AlreadyMudded);
    }

    let before = frog.genetics;
    mud.apply_to(&mut frog.genetics);
    frog.mudded = true;
    debug!("{frog}: mud applied, {before} -> {}", frog.genetics);

    let mutation = registry.identify(&frog.genetics).and_then(|identity| {
        let species = registry.species(identity.species);
        let variant = identity.variant.map(|v| registry.variant(v));
        let to_species = species.name.clone();
        let to_variant = variant.map(|v| v.name.clone());
        if frog.species.as_deref() == Some(to_species.as_str()) && frog.variant == to_variant {
            return None;
        }

        let mutation = Mutation {
            from_species: frog.species.replace(to_species.clone()),
            from_variant: std::mem::replace(&mut frog.variant, to_variant.clone()),
            to_species,
            to_variant,
        };
        frog.canonical_genetics = variant.map_or(species.canonical, |v| v.canonical);
        info!(
            "{} mutated into {frog}; keeps flavors {:?}",
            mutation.from_species.as_deref().unwrap_or("unknown frog"),
            frog.preferred_flavors.flavors()
        );
        Some(mutation)
    });

    Ok(MudOutcome {
        before,
        after: frog.genetics,
        mutation,
    })
}
