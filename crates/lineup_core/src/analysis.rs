//! Defender composition analysis.
//!
//! Classifies the enemy side into threat flags that drive doctrine
//! selection, scoring and the explanation text.

use serde::{Deserialize, Serialize};

use crate::catalog::UnitCatalog;
use crate::data::UnitType;
use crate::target::DefenderUnit;

/// Infantry share (percent of weighted total) above which the defense is infantry-heavy.
pub const INFANTRY_HEAVY_PERCENT: u32 = 50;

/// Vehicle share (percent of weighted total) above which the defense is vehicle-heavy.
pub const VEHICLE_HEAVY_PERCENT: u32 = 40;

/// Threat profile of a target's defenders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefenderAnalysis {
    /// Infantry make up more than half of the weighted defenders.
    pub infantry_heavy: bool,
    /// Vehicles make up more than 40% of the weighted defenders.
    pub vehicle_heavy: bool,
    /// At least one aircraft defends.
    pub air_present: bool,
    /// Turret-dominated defense. Always false: defense buildings are not analyzed yet.
    pub turret_heavy: bool,
    /// Weighted defender count, used as a risk proxy.
    pub total_strength: u32,
}

impl DefenderAnalysis {
    /// The defender classes the counter-composition bonus applies to.
    pub fn dominant_threats(&self) -> impl Iterator<Item = UnitType> {
        [
            (self.infantry_heavy, UnitType::Infantry),
            (self.vehicle_heavy, UnitType::Vehicle),
        ]
        .into_iter()
        .filter_map(|(flag, t)| flag.then_some(t))
    }
}

/// Weighted counts per movement class.
#[derive(Debug, Clone, Copy, Default)]
struct Composition {
    infantry: u32,
    vehicle: u32,
    air: u32,
}

impl Composition {
    fn total(&self) -> u32 {
        self.infantry
            .saturating_add(self.vehicle)
            .saturating_add(self.air)
    }
}

/// Classify the defending units of a target.
///
/// Defenders whose key is missing from the catalog are ignored.
/// An empty list yields all flags false and zero strength.
#[must_use]
pub fn analyze_defenders(catalog: &UnitCatalog, defenders: &[DefenderUnit]) -> DefenderAnalysis {
    let mut composition = Composition::default();

    for defender in defenders {
        let Some(stats) = catalog.get(&defender.unit_key) else {
            tracing::trace!("Ignoring unknown defender '{}'", defender.unit_key);
            continue;
        };
        let weight = defender.weight();
        match stats.unit_type {
            UnitType::Infantry => composition.infantry = composition.infantry.saturating_add(weight),
            UnitType::Vehicle => composition.vehicle = composition.vehicle.saturating_add(weight),
            UnitType::Air => composition.air = composition.air.saturating_add(weight),
        }
    }

    let total = composition.total();

    // Integer form of `count > total * share`; with total = 0 both sides are 0.
    let analysis = DefenderAnalysis {
        infantry_heavy: u64::from(composition.infantry) * 100
            > u64::from(total) * u64::from(INFANTRY_HEAVY_PERCENT),
        vehicle_heavy: u64::from(composition.vehicle) * 100
            > u64::from(total) * u64::from(VEHICLE_HEAVY_PERCENT),
        air_present: composition.air > 0,
        turret_heavy: false,
        total_strength: total,
    };

    tracing::debug!(
        "Defenders: infantry={} vehicle={} air={} -> {:?}",
        composition.infantry,
        composition.vehicle,
        composition.air,
        analysis
    );

    analysis
}
