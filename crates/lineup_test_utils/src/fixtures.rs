//! Test fixtures and helpers.
//!
//! Pre-built rosters, targets and engines for consistent testing.

use lineup_core::engine::RecommendationEngine;
use lineup_core::target::{
    DefenderUnit, DefenseBuilding, ExtractedData, RosterUnit, Target, TargetType,
};

/// Engine over the embedded catalog and doctrine table.
///
/// # Panics
///
/// Panics if the embedded assets fail to parse.
#[must_use]
pub fn builtin_engine() -> RecommendationEngine {
    RecommendationEngine::builtin().expect("embedded assets should parse")
}

/// Shorthand for a roster entry with a known count.
#[must_use]
pub fn roster(unit_key: &str, level: u32, count: u32) -> RosterUnit {
    RosterUnit::new(unit_key, level, count)
}

/// Shorthand for a defender entry with a known count.
#[must_use]
pub fn defender(unit_key: &str, level: u32, count: u32) -> DefenderUnit {
    DefenderUnit::new(unit_key, level, count)
}

/// Extracted data for a target with only defender units.
#[must_use]
pub fn extracted(
    player_roster: Vec<RosterUnit>,
    target_type: TargetType,
    defender_units: Vec<DefenderUnit>,
) -> ExtractedData {
    let mut target = Target::undefended(target_type);
    target.defender_units = defender_units;
    ExtractedData {
        player_roster,
        target,
    }
}

/// The six-unit Nod roster used by the demo results.
#[must_use]
pub fn demo_nod_roster() -> Vec<RosterUnit> {
    vec![
        roster("nod_militant", 50, 10),
        roster("nod_rocket", 48, 8),
        roster("nod_scorpion", 52, 6),
        roster("nod_attack_bike", 49, 5),
        roster("nod_venom", 51, 4),
        roster("nod_reckoner", 50, 3),
    ]
}

/// The demo outpost: infantry-dominated with one defense facility.
#[must_use]
pub fn demo_outpost() -> ExtractedData {
    let mut data = extracted(
        demo_nod_roster(),
        TargetType::Outpost,
        vec![
            defender("nod_militant", 42, 5),
            defender("nod_rocket", 40, 3),
            defender("nod_scorpion", 43, 2),
        ],
    );
    data.target.level = Some(45);
    data.target.defense_buildings = vec![DefenseBuilding {
        building_key: "nod_defense_facility".to_string(),
        approx_pos: None,
        level: Some(45),
    }];
    data
}

/// A vehicle-heavy Forgotten camp.
#[must_use]
pub fn vehicle_camp() -> ExtractedData {
    extracted(
        vec![
            roster("gdi_rifleman", 30, 12),
            roster("gdi_missile", 30, 6),
            roster("gdi_predator", 32, 4),
            roster("gdi_pitbull", 31, 4),
        ],
        TargetType::Camp,
        vec![
            defender("forgotten_jeep", 25, 4),
            defender("forgotten_scooper", 25, 2),
            defender("forgotten_infantry", 25, 4),
        ],
    )
}
