//! Wave planning: split a built lineup into ordered attack waves.

use serde::{Deserialize, Serialize};

use crate::data::DoctrineData;
use crate::lineup::LineupUnit;

/// Strategy note for the soak wave.
pub const SOAK_STRATEGY: &str =
    "Send cheap infantry to absorb initial defenses and scout turret positions";
/// Strategy note for the main wave.
pub const CORE_STRATEGY: &str =
    "Main attack wave - focus fire on key defensive structures and units";
/// Strategy note for the cleanup wave.
pub const SUPPORT_STRATEGY: &str =
    "Cleanup wave - eliminate remaining defenses and secure victory";
/// Strategy note when no unit matches a doctrine role.
pub const SINGLE_WAVE_STRATEGY: &str = "Single wave assault - all units attack together";

/// A group of lineup units that attack together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavePlan {
    /// Wave number, starting at 1.
    pub wave: u32,
    /// Units in this wave, in lineup order.
    pub units: Vec<LineupUnit>,
    /// What this wave is meant to do.
    pub strategy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Soak,
    Core,
    Support,
}

fn role_of(doctrine: &DoctrineData, unit_key: &str) -> Option<Role> {
    let listed = |keys: &[String]| keys.iter().any(|k| k == unit_key);
    if listed(&doctrine.soak_units) {
        Some(Role::Soak)
    } else if listed(&doctrine.core_units) {
        Some(Role::Core)
    } else if listed(&doctrine.support_units) {
        Some(Role::Support)
    } else {
        None
    }
}

/// Partition a lineup into waves by doctrine role.
///
/// Wave 1 holds soak units, wave 2 core units, wave 3 support units; a key
/// listed in several roles goes to the earliest. Empty waves are skipped,
/// keeping their fixed numbers. Lineup entries with no role are not
/// assigned, unless no entry has a role, in which case the whole lineup
/// forms a single fallback wave.
#[must_use]
pub fn plan_waves(lineup: &[LineupUnit], doctrine: &DoctrineData) -> Vec<WavePlan> {
    let mut soak = Vec::new();
    let mut core = Vec::new();
    let mut support = Vec::new();

    for unit in lineup {
        match role_of(doctrine, &unit.unit_key) {
            Some(Role::Soak) => soak.push(unit.clone()),
            Some(Role::Core) => core.push(unit.clone()),
            Some(Role::Support) => support.push(unit.clone()),
            None => {}
        }
    }

    let waves: Vec<WavePlan> = [
        (1, soak, SOAK_STRATEGY),
        (2, core, CORE_STRATEGY),
        (3, support, SUPPORT_STRATEGY),
    ]
    .into_iter()
    .filter(|(_, units, _)| !units.is_empty())
    .map(|(wave, units, strategy)| WavePlan {
        wave,
        units,
        strategy: strategy.to_string(),
    })
    .collect();

    if waves.is_empty() {
        return vec![WavePlan {
            wave: 1,
            units: lineup.to_vec(),
            strategy: SINGLE_WAVE_STRATEGY.to_string(),
        }];
    }
    waves
}
