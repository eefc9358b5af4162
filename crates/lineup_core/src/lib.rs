//! # Lineup Core
//!
//! Deterministic lineup recommendation engine for Tiberium Alliances style
//! attacks.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No file IO (data assets are embedded at compile time)
//! - No system randomness or clock reads
//! - No floating-point math in scoring (uses fixed-point)
//!
//! Given the units a player owns and an extracted description of an enemy
//! target, the engine picks a doctrine, greedily builds a command-point
//! constrained lineup, splits it into attack waves and rates it.
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Key-indexed unit catalog
//! - [`analysis`] - Defender composition analysis
//! - [`doctrine`] - Doctrine table and selection
//! - [`lineup`] - Greedy lineup builder
//! - [`waves`] - Wave planning
//! - [`scoring`] - Score and risk heuristics
//! - [`explain`] - Human-readable rationale
//! - [`engine`] - Recommendation orchestrator

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod analysis;
pub mod catalog;
pub mod data;
pub mod doctrine;
pub mod engine;
pub mod error;
pub mod explain;
pub mod factions;
pub mod lineup;
pub mod math;
pub mod scoring;
pub mod target;
pub mod waves;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analysis::{analyze_defenders, DefenderAnalysis};
    pub use crate::catalog::UnitCatalog;
    pub use crate::data::{ArmorType, DamageProfile, EconomyTier, UnitStats, UnitType};
    pub use crate::doctrine::{select_doctrine, DoctrineId, DoctrineTable};
    pub use crate::engine::{
        EngineOptions, LineupRecommendation, RecommendationEngine, Recommendations,
        DEFAULT_CP_LIMIT,
    };
    pub use crate::error::{LineupError, Result};
    pub use crate::factions::Faction;
    pub use crate::lineup::{LineupBuilder, LineupUnit};
    pub use crate::math::Fixed;
    pub use crate::target::{
        DefenderUnit, DefenseBuilding, ExtractedData, Objective, RosterUnit, Target, TargetType,
    };
    pub use crate::waves::WavePlan;
}
