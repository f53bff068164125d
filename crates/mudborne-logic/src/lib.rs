//! Pure game logic for Mudborne's frog genetics and magic mud.
//!
//! This crate holds everything about breeding-by-mud that is independent of
//! rendering, saving or input: the fixed environment tables, the seven-trait
//! genetic code, mushroom effects, the mud mixing rules and the species
//! registry used to decide whether a frog has mutated. Functions take plain
//! data and return results, so everything is unit-testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`environment`] | Domains, locations, tiles, weather, climate scales, flavors, registry |
//! | [`error`] | Crate error type |
//! | [`frog`] | Frogs, species/variant registry, applying mud, mutation |
//! | [`fungi`] | Mushroom catalog, growing conditions, hybrids |
//! | [`genetics`] | ANOURES traits and the clamped genetic code |
//! | [`modifier`] | Single-trait modifiers, effect parsing, per-trait aggregation |
//! | [`mud`] | Mixing aggregated modifiers into one effect per trait |
//!
//! # Pipeline
//!
//! Mushroom effects → [`modifier::MultiTraitModifier`] → [`mud::resolve`]
//! → [`frog::apply`] → species lookup.

pub mod environment;
pub mod error;
pub mod frog;
pub mod fungi;
pub mod genetics;
pub mod modifier;
pub mod mud;

pub use error::{MudborneError, Result};
