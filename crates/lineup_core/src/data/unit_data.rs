//! Unit data structures for the data-driven unit catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::factions::Faction;

/// Broad movement class of a unit. Also the class defenders are counted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    /// Foot soldiers.
    Infantry,
    /// Ground vehicles.
    Vehicle,
    /// Aircraft.
    Air,
}

impl UnitType {
    /// All unit types.
    pub const ALL: [Self; 3] = [Self::Infantry, Self::Vehicle, Self::Air];

    /// Lowercase name as used in data files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infantry => "infantry",
            Self::Vehicle => "vehicle",
            Self::Air => "air",
        }
    }

    /// Parse a lowercase type name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

/// Armor class of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorType {
    /// Light armor (most infantry).
    Light,
    /// Medium armor.
    Medium,
    /// Heavy armor (tanks, walkers).
    Heavy,
    /// Airborne.
    Air,
}

/// Rough cost bracket used by the repair-focused objectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomyTier {
    /// Cheap, expendable units that repair almost instantly.
    Cheap,
    /// Everything else.
    #[default]
    Standard,
}

/// How much trust to place in a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Verified in game.
    High,
    /// Taken from community sources.
    Medium,
    /// Estimated.
    Low,
}

/// Damage multipliers against each target class, in percent.
///
/// `100` is neutral damage, `150` is 1.5x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageProfile {
    /// Multiplier against infantry.
    pub infantry: u16,
    /// Multiplier against vehicles.
    pub vehicle: u16,
    /// Multiplier against structures.
    pub structure: u16,
    /// Multiplier against aircraft.
    pub air: u16,
}

impl DamageProfile {
    /// Multiplier against units of the given movement class.
    #[must_use]
    pub const fn against(&self, unit_type: UnitType) -> u16 {
        match unit_type {
            UnitType::Infantry => self.infantry,
            UnitType::Vehicle => self.vehicle,
            UnitType::Air => self.air,
        }
    }
}

/// A single catalog entry.
///
/// # Example RON
///
/// ```ron
/// UnitStats(
///     key: "nod_militant",
///     name: "Militant",
///     faction: nod,
///     unit_type: infantry,
///     cost: 10,
///     armor: light,
///     range: 2,
///     speed: 4,
///     damage_vs: Some(DamageProfile(infantry: 120, vehicle: 40, structure: 60, air: 0)),
///     economy_tier: cheap,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Unique string identifier for this unit.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Owning faction.
    pub faction: Faction,

    /// Movement class.
    pub unit_type: UnitType,

    /// Command-point cost to deploy one unit.
    pub cost: u32,

    /// Armor class.
    pub armor: ArmorType,

    /// Attack range in grid cells.
    pub range: u32,

    /// Movement speed in grid cells per step.
    pub speed: u32,

    /// Hit points per unit level.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hp_by_level: BTreeMap<u32, u32>,

    /// Damage per second per unit level.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dps_by_level: BTreeMap<u32, u32>,

    /// Damage multipliers (None when unknown).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_vs: Option<DamageProfile>,

    /// Cost bracket.
    #[serde(default)]
    pub economy_tier: EconomyTier,

    /// Where the numbers came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Trust level of the numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl UnitStats {
    /// Whether this unit counts as cheap for the repair objectives.
    #[must_use]
    pub fn is_cheap(&self) -> bool {
        self.economy_tier == EconomyTier::Cheap
    }

    /// Damage multiplier (percent) against a class, if known.
    #[must_use]
    pub fn damage_against(&self, unit_type: UnitType) -> Option<u16> {
        self.damage_vs.map(|d| d.against(unit_type))
    }

    /// Hit points at the highest tabulated level not above `level`.
    #[must_use]
    pub fn hp_at_level(&self, level: u32) -> Option<u32> {
        self.hp_by_level.range(..=level).next_back().map(|(_, hp)| *hp)
    }

    /// Damage per second at the highest tabulated level not above `level`.
    #[must_use]
    pub fn dps_at_level(&self, level: u32) -> Option<u32> {
        self.dps_by_level
            .range(..=level)
            .next_back()
            .map(|(_, dps)| *dps)
    }
}
