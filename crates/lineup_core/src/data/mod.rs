//! Data structures for catalog and doctrine configuration.
//!
//! This module contains pure data structures that define unit stats and
//! doctrine templates. All structs are designed to be deserialized from
//! RON files.
//!
//! **Note:** This module contains no IO - it only defines data types.
//! The built-in assets are embedded with `include_str!`; loading overrides
//! from disk is handled by `lineup_tools`.

mod doctrine_data;
mod unit_data;

pub use doctrine_data::DoctrineData;
pub use unit_data::{ArmorType, Confidence, DamageProfile, EconomyTier, UnitStats, UnitType};

/// Built-in unit catalog asset (RON).
pub const BUILTIN_UNIT_CATALOG: &str = include_str!("../../assets/data/unit_catalog.ron");

/// Built-in doctrine table asset (RON).
pub const BUILTIN_DOCTRINES: &str = include_str!("../../assets/data/doctrines.ron");
