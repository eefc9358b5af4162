//! Proptest strategies for recommendation inputs.
//!
//! Keys are drawn mostly from the embedded catalog, with a few keys the
//! catalog does not know so that lookups that miss are exercised too.

use lineup_core::target::{DefenderUnit, ExtractedData, Objective, RosterUnit, Target, TargetType};
use proptest::prelude::*;

/// Keys present in the embedded catalog.
pub const CATALOG_KEYS: &[&str] = &[
    "nod_militant",
    "nod_rocket",
    "nod_black_hand",
    "nod_attack_bike",
    "nod_scorpion",
    "nod_reckoner",
    "nod_specter",
    "nod_avatar",
    "nod_venom",
    "nod_vertigo",
    "gdi_rifleman",
    "gdi_missile",
    "gdi_sniper",
    "gdi_zone_trooper",
    "gdi_pitbull",
    "gdi_predator",
    "gdi_guardian",
    "gdi_mammoth",
    "gdi_kodiak",
    "gdi_orca",
    "gdi_firehawk",
    "forgotten_infantry",
    "forgotten_bazooka",
    "forgotten_jeep",
    "forgotten_scooper",
    "forgotten_gunship",
];

/// Keys that no catalog entry uses.
pub const UNKNOWN_KEYS: &[&str] = &["scrin_buzzer", "nod_shadow_team", ""];

/// Any unit key, known keys weighted heavily.
pub fn arb_unit_key() -> impl Strategy<Value = String> {
    prop_oneof![
        9 => proptest::sample::select(CATALOG_KEYS),
        1 => proptest::sample::select(UNKNOWN_KEYS),
    ]
    .prop_map(str::to_string)
}

/// Unit level (1-65).
pub fn arb_level() -> impl Strategy<Value = u32> {
    1u32..=65
}

/// An optional count, sometimes zero, sometimes unknown.
pub fn arb_count() -> impl Strategy<Value = Option<u32>> {
    proptest::option::weighted(0.8, 0u32..20)
}

/// A roster entry.
pub fn arb_roster_unit() -> impl Strategy<Value = RosterUnit> {
    (arb_unit_key(), arb_level(), arb_count()).prop_map(|(unit_key, level, count)| RosterUnit {
        unit_key,
        level,
        count,
    })
}

/// A roster of up to `max_len` entries. Keys may repeat.
pub fn arb_roster(max_len: usize) -> impl Strategy<Value = Vec<RosterUnit>> {
    proptest::collection::vec(arb_roster_unit(), 0..max_len)
}

/// A defender entry.
pub fn arb_defender() -> impl Strategy<Value = DefenderUnit> {
    (arb_unit_key(), arb_level(), arb_count()).prop_map(|(unit_key, level, count)| DefenderUnit {
        unit_key,
        level,
        count,
    })
}

/// Up to `max_len` defenders.
pub fn arb_defenders(max_len: usize) -> impl Strategy<Value = Vec<DefenderUnit>> {
    proptest::collection::vec(arb_defender(), 0..max_len)
}

/// Any target type.
pub fn arb_target_type() -> impl Strategy<Value = TargetType> {
    prop_oneof![
        Just(TargetType::Camp),
        Just(TargetType::Outpost),
        Just(TargetType::Base),
    ]
}

/// Any objective.
pub fn arb_objective() -> impl Strategy<Value = Objective> {
    proptest::sample::select(Objective::ALL.to_vec())
}

/// A budget, occasionally below the cheapest unit.
pub fn arb_cp_limit() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => 0u32..10,
        4 => 10u32..1000,
    ]
}

/// A full request: roster plus a target with defenders.
pub fn arb_extracted() -> impl Strategy<Value = ExtractedData> {
    (
        arb_roster(16),
        arb_target_type(),
        proptest::option::of(arb_level()),
        arb_defenders(12),
    )
        .prop_map(|(player_roster, target_type, level, defender_units)| {
            let mut target = Target::undefended(target_type);
            target.level = level;
            target.defender_units = defender_units;
            ExtractedData {
                player_roster,
                target,
            }
        })
}
