//! Request inputs: the player's roster, the enemy target and the objective.
//!
//! These mirror what the screenshot extraction pipeline produces. Counts
//! are optional because extraction cannot always read them.

use serde::{Deserialize, Serialize};

/// Kind of enemy target, roughly ordered by increasing fortification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Lightly defended Forgotten camp.
    Camp,
    /// Forgotten outpost.
    Outpost,
    /// Player or Forgotten base.
    Base,
}

impl TargetType {
    /// Name as used in data files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Camp => "camp",
            Self::Outpost => "outpost",
            Self::Base => "base",
        }
    }
}

/// What the player wants to optimize for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Keep repair timers short.
    MinRepairTime,
    /// Keep power spent on repairs low.
    MinPowerCost,
    /// Loot as fast as possible.
    MaxLootPerMinute,
    /// Maximize the chance of winning.
    MaxWinChance,
}

impl Objective {
    /// All objectives.
    pub const ALL: [Self; 4] = [
        Self::MinRepairTime,
        Self::MinPowerCost,
        Self::MaxLootPerMinute,
        Self::MaxWinChance,
    ];

    /// Name as used by the extraction pipeline.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MinRepairTime => "min_repair_time",
            Self::MinPowerCost => "min_power_cost",
            Self::MaxLootPerMinute => "max_loot_per_minute",
            Self::MaxWinChance => "max_win_chance",
        }
    }

    /// Parse a pipeline objective name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == name)
    }
}

/// A unit the player owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterUnit {
    /// Catalog key.
    pub unit_key: String,
    /// Owned level.
    pub level: u32,
    /// How many are available. `None` means unknown, treated as unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RosterUnit {
    /// Create a roster entry with a known count.
    #[must_use]
    pub fn new(unit_key: &str, level: u32, count: u32) -> Self {
        Self {
            unit_key: unit_key.to_string(),
            level,
            count: Some(count),
        }
    }
}

/// An enemy unit defending the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenderUnit {
    /// Catalog key.
    pub unit_key: String,
    /// Defender level.
    pub level: u32,
    /// How many were seen. `None` counts as one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl DefenderUnit {
    /// Create a defender entry with a known count.
    #[must_use]
    pub fn new(unit_key: &str, level: u32, count: u32) -> Self {
        Self {
            unit_key: unit_key.to_string(),
            level,
            count: Some(count),
        }
    }

    /// Weight this entry contributes to composition counts.
    ///
    /// A missing count weighs 1; an explicit zero weighs nothing.
    #[must_use]
    pub fn weight(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}

/// Approximate grid position of a building on the target layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// A defensive structure on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseBuilding {
    /// Building identifier.
    pub building_key: String,
    /// Where the building sits, if extraction located it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_pos: Option<Position>,
    /// Building level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

/// The enemy target being attacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Kind of target.
    #[serde(rename = "type")]
    pub target_type: TargetType,
    /// Target level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Defending units.
    #[serde(default)]
    pub defender_units: Vec<DefenderUnit>,
    /// Defensive buildings.
    #[serde(default)]
    pub defense_buildings: Vec<DefenseBuilding>,
    /// Free-form terrain notes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terrain_tags: Vec<String>,
}

impl Target {
    /// A target with no known defenses.
    #[must_use]
    pub fn undefended(target_type: TargetType) -> Self {
        Self {
            target_type,
            level: None,
            defender_units: Vec::new(),
            defense_buildings: Vec::new(),
            terrain_tags: Vec::new(),
        }
    }
}

/// Everything the extraction pipeline hands to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedData {
    /// Units the player owns.
    #[serde(default)]
    pub player_roster: Vec<RosterUnit>,
    /// The target being attacked.
    pub target: Target,
}

impl ExtractedData {
    /// Find the first roster entry for a unit key.
    #[must_use]
    pub fn roster_entry(&self, unit_key: &str) -> Option<&RosterUnit> {
        self.player_roster.iter().find(|r| r.unit_key == unit_key)
    }
}
