//! Environment tables — domains, locations, habitats, tiles, weather, climate.
//!
//! These are the fixed lookup tables of the game world. Nothing in this
//! module changes at runtime; catalogs validate their raw strings against an
//! [`EnvironmentRegistry`] built once at startup and shared by reference.
//!
//! ```
//! use mudborne_logic::environment::{EnvironmentRegistry, Temperature, TimeOfDay, Weather};
//!
//! let registry = EnvironmentRegistry::standard();
//! let temp = registry.temperature("Balmy").unwrap();
//! assert_eq!(temp, Temperature::natural(TimeOfDay::Daytime, Weather::Raining));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MudborneError, Result};

/// A fixed game table whose entries are addressed by display name.
pub trait Named: Sized + Copy + PartialEq + 'static {
    /// Human-readable table name used in error messages.
    const KIND: &'static str;

    fn name(&self) -> &'static str;

    fn all() -> &'static [Self];
}

fn parse_named<T: Named>(value: &str) -> Result<T> {
    T::all()
        .iter()
        .copied()
        .find(|entry| entry.name() == value)
        .ok_or_else(|| MudborneError::environment(T::KIND, value))
}

// ============================================================================
// DOMAINS & LOCATIONS
// ============================================================================

/// Every living thing is native to one of the two parallel worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Waking,
    Dream,
}

impl Named for Domain {
    const KIND: &'static str = "domain";

    fn name(&self) -> &'static str {
        match self {
            Self::Waking => "Waking",
            Self::Dream => "Dream",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Waking, Self::Dream]
    }
}

/// The seven locations exist once in each domain with near-identical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    // Waking
    SpawningPools,
    Kindergarten,
    ResidentialDistrict,
    ClimateControl,
    CentralJunction,
    RestrictedResearch,
    GoldenIslesWaking,
    // Dream
    DistantPools,
    FutureFarms,
    HomewardBound,
    FrozenDreams,
    DreamCore,
    MemoryWorks,
    GoldenIslesDream,
}

impl Location {
    pub fn domain(&self) -> Domain {
        match self {
            Self::SpawningPools
            | Self::Kindergarten
            | Self::ResidentialDistrict
            | Self::ClimateControl
            | Self::CentralJunction
            | Self::RestrictedResearch
            | Self::GoldenIslesWaking => Domain::Waking,
            _ => Domain::Dream,
        }
    }

    /// The same place seen from the other domain.
    pub fn paired(&self) -> Location {
        match self {
            Self::SpawningPools => Self::DistantPools,
            Self::Kindergarten => Self::FutureFarms,
            Self::ResidentialDistrict => Self::HomewardBound,
            Self::ClimateControl => Self::FrozenDreams,
            Self::CentralJunction => Self::DreamCore,
            Self::RestrictedResearch => Self::MemoryWorks,
            Self::GoldenIslesWaking => Self::GoldenIslesDream,
            Self::DistantPools => Self::SpawningPools,
            Self::FutureFarms => Self::Kindergarten,
            Self::HomewardBound => Self::ResidentialDistrict,
            Self::FrozenDreams => Self::ClimateControl,
            Self::DreamCore => Self::CentralJunction,
            Self::MemoryWorks => Self::RestrictedResearch,
            Self::GoldenIslesDream => Self::GoldenIslesWaking,
        }
    }

    /// Climate Control and its Dream twin snow instead of rain.
    pub fn is_temperate(&self) -> bool {
        !matches!(self, Self::ClimateControl | Self::FrozenDreams)
    }

    pub fn in_domain(domain: Domain) -> impl Iterator<Item = Location> {
        Self::all()
            .iter()
            .copied()
            .filter(move |loc| loc.domain() == domain)
    }
}

impl Named for Location {
    const KIND: &'static str = "location";

    fn name(&self) -> &'static str {
        match self {
            Self::SpawningPools => "Spawning Pools",
            Self::Kindergarten => "Kindergarten",
            Self::ResidentialDistrict => "Residential District",
            Self::ClimateControl => "Climate Control",
            Self::CentralJunction => "Central Junction",
            Self::RestrictedResearch => "Restricted Research",
            Self::GoldenIslesWaking => "Golden Isles (Waking)",
            Self::DistantPools => "Distant Pools",
            Self::FutureFarms => "Future Farms",
            Self::HomewardBound => "Homeward Bound",
            Self::FrozenDreams => "Frozen Dreams",
            Self::DreamCore => "Dream Core",
            Self::MemoryWorks => "Memory Works",
            Self::GoldenIslesDream => "Golden Isles (Dream)",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::SpawningPools,
            Self::Kindergarten,
            Self::ResidentialDistrict,
            Self::ClimateControl,
            Self::CentralJunction,
            Self::RestrictedResearch,
            Self::GoldenIslesWaking,
            Self::DistantPools,
            Self::FutureFarms,
            Self::HomewardBound,
            Self::FrozenDreams,
            Self::DreamCore,
            Self::MemoryWorks,
            Self::GoldenIslesDream,
        ]
    }
}

/// Features some critters need in order to spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Reeds,
    RedLilies,
    Lilypads,
    Millipads,
    DreamOrchids,
    MotherJellies,
    MahopanyTrees,
    MarshShrubs,
}

impl Named for Habitat {
    const KIND: &'static str = "habitat";

    fn name(&self) -> &'static str {
        match self {
            Self::Reeds => "Reeds",
            Self::RedLilies => "Red Lilies",
            Self::Lilypads => "Lilypads",
            Self::Millipads => "Millipads",
            Self::DreamOrchids => "Dream Orchids",
            Self::MotherJellies => "Mother Jellies",
            Self::MahopanyTrees => "Mahopany Trees",
            Self::MarshShrubs => "Marsh Shrubs",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Reeds,
            Self::RedLilies,
            Self::Lilypads,
            Self::Millipads,
            Self::DreamOrchids,
            Self::MotherJellies,
            Self::MahopanyTrees,
            Self::MarshShrubs,
        ]
    }
}

// ============================================================================
// TILES, WEATHER, TIME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Grass,
    Mud,
    Ice,
    Water,
    DeepWater,
    StagnantWater,
    Inside,
}

impl Named for TileType {
    const KIND: &'static str = "tile type";

    fn name(&self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Mud => "mud",
            Self::Ice => "ice",
            Self::Water => "water",
            Self::DeepWater => "deep water",
            Self::StagnantWater => "stagnant water",
            Self::Inside => "inside",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Grass,
            Self::Mud,
            Self::Ice,
            Self::Water,
            Self::DeepWater,
            Self::StagnantWater,
            Self::Inside,
        ]
    }
}

/// "Not snowing" is represented as `NotRaining`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Raining,
    NotRaining,
    Snowing,
}

impl Named for Weather {
    const KIND: &'static str = "weather";

    fn name(&self) -> &'static str {
        match self {
            Self::Raining => "raining",
            Self::NotRaining => "not raining",
            Self::Snowing => "snowing",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Raining, Self::NotRaining, Self::Snowing]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    /// 7:00–19:00
    Daytime,
    /// 21:00–5:00
    Nighttime,
    /// 5:00–7:00
    Dawn,
    /// 19:00–21:00
    Dusk,
}

impl Named for TimeOfDay {
    const KIND: &'static str = "time of day";

    fn name(&self) -> &'static str {
        match self {
            Self::Daytime => "Daytime",
            Self::Nighttime => "Nighttime",
            Self::Dawn => "Dawn",
            Self::Dusk => "Dusk",
        }
    }

    fn all() -> &'static [Self] {
        &[Self::Daytime, Self::Nighttime, Self::Dawn, Self::Dusk]
    }
}

// ============================================================================
// CLIMATE SCALES
// ============================================================================

/// Seven-step temperature scale. Hot and Frozen only occur next to machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Temperature {
    Frozen = 1,
    Cold = 2,
    Chilly = 3,
    Mild = 4,
    Warm = 5,
    Balmy = 6,
    Hot = 7,
}

impl Temperature {
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Frozen),
            2 => Some(Self::Cold),
            3 => Some(Self::Chilly),
            4 => Some(Self::Mild),
            5 => Some(Self::Warm),
            6 => Some(Self::Balmy),
            7 => Some(Self::Hot),
            _ => None,
        }
    }

    /// Natural temperature for a time of day; snow takes it down one step.
    pub fn natural(time: TimeOfDay, weather: Weather) -> Self {
        let base = match time {
            TimeOfDay::Dawn | TimeOfDay::Dusk => Self::Warm,
            TimeOfDay::Daytime => Self::Balmy,
            TimeOfDay::Nighttime => Self::Chilly,
        };
        match weather {
            Weather::Snowing => Self::from_level(base.level() - 1).unwrap_or(base),
            _ => base,
        }
    }
}

impl Named for Temperature {
    const KIND: &'static str = "temperature";

    fn name(&self) -> &'static str {
        match self {
            Self::Frozen => "Frozen",
            Self::Cold => "Cold",
            Self::Chilly => "Chilly",
            Self::Mild => "Mild",
            Self::Warm => "Warm",
            Self::Balmy => "Balmy",
            Self::Hot => "Hot",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Frozen,
            Self::Cold,
            Self::Chilly,
            Self::Mild,
            Self::Warm,
            Self::Balmy,
            Self::Hot,
        ]
    }
}

/// Seven-step humidity scale, driven by tile type and rain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Humidity {
    Parched = 1,
    Dry = 2,
    Normal = 3,
    Damp = 4,
    Wet = 5,
    Drenched = 6,
    Waterlogged = 7,
}

impl Humidity {
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Parched),
            2 => Some(Self::Dry),
            3 => Some(Self::Normal),
            4 => Some(Self::Damp),
            5 => Some(Self::Wet),
            6 => Some(Self::Drenched),
            7 => Some(Self::Waterlogged),
            _ => None,
        }
    }

    /// Natural humidity of a tile. Rain (not snow) adds one step.
    ///
    /// Only inside, grass, mud and water tiles have a defined baseline.
    pub fn natural(tile: TileType, weather: Weather) -> Option<Self> {
        let base = match tile {
            TileType::Inside => Self::Dry,
            TileType::Grass => Self::Normal,
            TileType::Mud => Self::Damp,
            TileType::Water => Self::Wet,
            _ => return None,
        };
        match weather {
            Weather::Raining => Self::from_level(base.level() + 1),
            _ => Some(base),
        }
    }
}

impl Named for Humidity {
    const KIND: &'static str = "humidity";

    fn name(&self) -> &'static str {
        match self {
            Self::Parched => "Parched",
            Self::Dry => "Dry",
            Self::Normal => "Normal",
            Self::Damp => "Damp",
            Self::Wet => "Wet",
            Self::Drenched => "Drenched",
            Self::Waterlogged => "Waterlogged",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Parched,
            Self::Dry,
            Self::Normal,
            Self::Damp,
            Self::Wet,
            Self::Drenched,
            Self::Waterlogged,
        ]
    }
}

// ============================================================================
// FLAVORS
// ============================================================================

/// Critter flavors; tadpoles of each species need one or two of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Flavor {
    Sweet,
    Salty,
    Umami,
    Bitter,
    Sour,
    Spicy,
    Slimy,
}

impl Named for Flavor {
    const KIND: &'static str = "flavor";

    fn name(&self) -> &'static str {
        match self {
            Self::Sweet => "Sweet",
            Self::Salty => "Salty",
            Self::Umami => "Umami",
            Self::Bitter => "Bitter",
            Self::Sour => "Sour",
            Self::Spicy => "Spicy",
            Self::Slimy => "Slimy",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::Sweet,
            Self::Salty,
            Self::Umami,
            Self::Bitter,
            Self::Sour,
            Self::Spicy,
            Self::Slimy,
        ]
    }
}

macro_rules! impl_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = MudborneError;

                fn from_str(s: &str) -> Result<Self> {
                    parse_named(s)
                }
            }
        )*
    };
}

impl_from_str!(
    Domain,
    Location,
    Habitat,
    TileType,
    Weather,
    TimeOfDay,
    Temperature,
    Humidity,
    Flavor,
);

// ============================================================================
// REGISTRY
// ============================================================================

/// The set of environment values a catalog is allowed to reference.
///
/// `standard()` admits every value in the game. Narrower registries are
/// useful for validating content meant for a single domain or area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentRegistry {
    pub domains: Vec<Domain>,
    pub locations: Vec<Location>,
    pub habitats: Vec<Habitat>,
    pub tile_types: Vec<TileType>,
    pub weather: Vec<Weather>,
    pub times: Vec<TimeOfDay>,
    pub temperatures: Vec<Temperature>,
    pub humidities: Vec<Humidity>,
    pub flavors: Vec<Flavor>,
}

impl Default for EnvironmentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl EnvironmentRegistry {
    pub fn standard() -> Self {
        Self {
            domains: Domain::all().to_vec(),
            locations: Location::all().to_vec(),
            habitats: Habitat::all().to_vec(),
            tile_types: TileType::all().to_vec(),
            weather: Weather::all().to_vec(),
            times: TimeOfDay::all().to_vec(),
            temperatures: Temperature::all().to_vec(),
            humidities: Humidity::all().to_vec(),
            flavors: Flavor::all().to_vec(),
        }
    }

    pub fn domain(&self, value: &str) -> Result<Domain> {
        admit(&self.domains, value)
    }

    pub fn location(&self, value: &str) -> Result<Location> {
        admit(&self.locations, value)
    }

    pub fn habitat(&self, value: &str) -> Result<Habitat> {
        admit(&self.habitats, value)
    }

    pub fn tile_type(&self, value: &str) -> Result<TileType> {
        admit(&self.tile_types, value)
    }

    pub fn weather(&self, value: &str) -> Result<Weather> {
        admit(&self.weather, value)
    }

    pub fn time(&self, value: &str) -> Result<TimeOfDay> {
        admit(&self.times, value)
    }

    pub fn temperature(&self, value: &str) -> Result<Temperature> {
        admit(&self.temperatures, value)
    }

    pub fn humidity(&self, value: &str) -> Result<Humidity> {
        admit(&self.humidities, value)
    }

    pub fn flavor(&self, value: &str) -> Result<Flavor> {
        admit(&self.flavors, value)
    }
}

/// Parse a name and check it is admitted by `allowed`.
fn admit<T: Named>(allowed: &[T], value: &str) -> Result<T> {
    let parsed: T = parse_named(value)?;
    if allowed.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(MudborneError::environment(T::KIND, value))
    }
}
