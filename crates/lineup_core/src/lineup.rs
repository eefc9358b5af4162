//! Greedy, command-point constrained lineup builder.
//!
//! The builder runs four phases in order, each drawing on the budget left
//! by the previous one:
//!
//! 1. **Soak** - the first doctrine soak unit the player owns, up to 2.
//! 2. **Core** - each owned core unit in doctrine order, up to 3 each,
//!    until the budget drops below [`CORE_BUDGET_FLOOR`].
//! 3. **Support** - each owned support unit, up to 2 each, until the
//!    budget drops below [`SUPPORT_BUDGET_FLOOR`].
//! 4. **Fill** - every remaining roster unit, most expensive first, one
//!    each, until the budget drops below [`FILL_BUDGET_FLOOR`].
//!
//! A unit key never appears twice in a lineup, and every entry has a
//! count of at least one.

use serde::{Deserialize, Serialize};

use crate::catalog::UnitCatalog;
use crate::data::DoctrineData;
use crate::target::RosterUnit;

/// Preferred count for the soak unit.
pub const SOAK_COUNT: u32 = 2;
/// Preferred count for each core unit.
pub const CORE_COUNT: u32 = 3;
/// Preferred count for each support unit.
pub const SUPPORT_COUNT: u32 = 2;
/// Count added per unit in the fill phase.
pub const FILL_COUNT: u32 = 1;

/// Core phase stops once the remaining budget is below this.
pub const CORE_BUDGET_FLOOR: u32 = 50;
/// Support phase stops once the remaining budget is below this.
pub const SUPPORT_BUDGET_FLOOR: u32 = 30;
/// Fill phase stops once the remaining budget is below this.
pub const FILL_BUDGET_FLOOR: u32 = 20;

/// Stand-in for a roster entry with no known count.
const UNCONSTRAINED_COUNT: u32 = 999;

/// One line of a lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupUnit {
    /// Catalog key.
    pub unit_key: String,
    /// Level to deploy at (the owned level).
    pub desired_level: u32,
    /// How many to deploy. Always at least 1.
    pub count: u32,
}

/// Total command-point cost of a lineup. Unknown units cost 0.
#[must_use]
pub fn lineup_cost(catalog: &UnitCatalog, lineup: &[LineupUnit]) -> u32 {
    lineup
        .iter()
        .map(|u| catalog.cost_of(&u.unit_key).saturating_mul(u.count))
        .fold(0, u32::saturating_add)
}

/// Total number of units across a lineup.
#[must_use]
pub fn army_size(lineup: &[LineupUnit]) -> u32 {
    lineup.iter().map(|u| u.count).fold(0, u32::saturating_add)
}

/// Builds one lineup against a fixed budget.
#[derive(Debug)]
pub struct LineupBuilder<'a> {
    catalog: &'a UnitCatalog,
    roster: &'a [RosterUnit],
    remaining: u32,
    lineup: Vec<LineupUnit>,
}

impl<'a> LineupBuilder<'a> {
    /// Start a builder with the full budget available.
    #[must_use]
    pub fn new(catalog: &'a UnitCatalog, roster: &'a [RosterUnit], budget: u32) -> Self {
        Self {
            catalog,
            roster,
            remaining: budget,
            lineup: Vec::new(),
        }
    }

    /// Budget not yet spent.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Lineup built so far.
    #[must_use]
    pub fn lineup(&self) -> &[LineupUnit] {
        &self.lineup
    }

    /// Run all four phases for a doctrine and return the lineup.
    #[must_use]
    pub fn build(mut self, doctrine: &DoctrineData) -> Vec<LineupUnit> {
        self.soak_phase(doctrine);
        self.core_phase(doctrine);
        self.support_phase(doctrine);
        self.fill_phase();

        tracing::debug!(
            "Built {} lineup: {} entries, {} CP left",
            doctrine.name,
            self.lineup.len(),
            self.remaining
        );
        self.lineup
    }

    fn soak_phase(&mut self, doctrine: &DoctrineData) {
        // Only the first owned soak unit is tried, even if adding it fails.
        let owned = doctrine
            .soak_units
            .iter()
            .find(|key| self.roster_entry(key).is_some());
        if let Some(key) = owned {
            self.add_unit(key, SOAK_COUNT);
        }
    }

    fn core_phase(&mut self, doctrine: &DoctrineData) {
        for key in &doctrine.core_units {
            if self.remaining < CORE_BUDGET_FLOOR {
                break;
            }
            self.add_unit(key, CORE_COUNT);
        }
    }

    fn support_phase(&mut self, doctrine: &DoctrineData) {
        for key in &doctrine.support_units {
            if self.remaining < SUPPORT_BUDGET_FLOOR {
                break;
            }
            self.add_unit(key, SUPPORT_COUNT);
        }
    }

    fn fill_phase(&mut self) {
        let roster = self.roster;
        let catalog = self.catalog;
        let mut leftovers: Vec<&'a RosterUnit> = roster
            .iter()
            .filter(|r| !self.contains(&r.unit_key))
            .collect();
        // Stable sort keeps roster order among equal costs.
        leftovers.sort_by(|a, b| catalog.cost_of(&b.unit_key).cmp(&catalog.cost_of(&a.unit_key)));

        for unit in leftovers {
            if self.remaining < FILL_BUDGET_FLOOR {
                break;
            }
            self.add_unit(&unit.unit_key, FILL_COUNT);
        }
    }

    /// Try to add up to `preferred` of a unit.
    ///
    /// Returns `false` without changing anything when the unit is not owned,
    /// not in the catalog, already in the lineup, or nothing fits.
    pub fn add_unit(&mut self, unit_key: &str, preferred: u32) -> bool {
        if self.contains(unit_key) {
            tracing::trace!("'{unit_key}' already in lineup");
            return false;
        }
        let Some(owned) = self.roster_entry(unit_key) else {
            tracing::trace!("'{unit_key}' not owned");
            return false;
        };
        let Some(stats) = self.catalog.get(unit_key) else {
            tracing::trace!("'{unit_key}' not in catalog");
            return false;
        };

        let affordable = self.remaining.checked_div(stats.cost).unwrap_or(u32::MAX);
        let available = owned.count.unwrap_or(UNCONSTRAINED_COUNT);
        let count = preferred.min(affordable).min(available);
        if count == 0 {
            tracing::trace!("'{unit_key}' does not fit ({} CP left)", self.remaining);
            return false;
        }

        let level = owned.level;
        self.remaining -= stats.cost * count;
        self.lineup.push(LineupUnit {
            unit_key: unit_key.to_string(),
            desired_level: level,
            count,
        });
        true
    }

    fn roster_entry(&self, unit_key: &str) -> Option<&'a RosterUnit> {
        self.roster.iter().find(|r| r.unit_key == unit_key)
    }

    fn contains(&self, unit_key: &str) -> bool {
        self.lineup.iter().any(|u| u.unit_key == unit_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctrine::{DoctrineId, DoctrineTable};

    fn fixtures() -> (UnitCatalog, DoctrineTable) {
        (UnitCatalog::builtin().unwrap(), DoctrineTable::builtin().unwrap())
    }

    fn keys(lineup: &[LineupUnit]) -> Vec<(&str, u32)> {
        lineup.iter().map(|u| (u.unit_key.as_str(), u.count)).collect()
    }

    #[test]
    fn test_anti_infantry_demo_roster() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("nod_militant", 50, 10),
            RosterUnit::new("nod_rocket", 48, 8),
            RosterUnit::new("nod_scorpion", 52, 6),
            RosterUnit::new("nod_attack_bike", 49, 5),
            RosterUnit::new("nod_venom", 51, 4),
            RosterUnit::new("nod_reckoner", 50, 3),
        ];

        let lineup =
            LineupBuilder::new(&catalog, &roster, 500).build(table.get(DoctrineId::AntiInfantry));

        assert_eq!(
            keys(&lineup),
            [
                ("nod_militant", 2),
                ("nod_reckoner", 3),
                ("nod_venom", 3),
                ("nod_attack_bike", 2),
                ("nod_scorpion", 1),
                ("nod_rocket", 1),
            ]
        );
        assert_eq!(lineup_cost(&catalog, &lineup), 355);
        assert_eq!(lineup[1].desired_level, 50);
    }

    #[test]
    fn test_add_unit_respects_budget_and_roster_count() {
        let (catalog, _) = fixtures();
        let roster = [RosterUnit::new("gdi_predator", 30, 2)];

        let mut builder = LineupBuilder::new(&catalog, &roster, 1000);
        assert!(builder.add_unit("gdi_predator", 3));
        assert_eq!(builder.lineup()[0].count, 2);
        assert_eq!(builder.remaining(), 920);

        let mut poor = LineupBuilder::new(&catalog, &roster, 79);
        assert!(poor.add_unit("gdi_predator", 3));
        assert_eq!(poor.lineup()[0].count, 1);
    }

    #[test]
    fn test_add_unit_rejects_unowned_unknown_and_duplicate() {
        let (catalog, _) = fixtures();
        let roster = [
            RosterUnit::new("gdi_orca", 30, 5),
            RosterUnit::new("gdi_ion_tank", 30, 5),
        ];

        let mut builder = LineupBuilder::new(&catalog, &roster, 500);
        assert!(!builder.add_unit("gdi_mammoth", 1));
        assert!(!builder.add_unit("gdi_ion_tank", 1));
        assert!(builder.add_unit("gdi_orca", 1));
        assert!(!builder.add_unit("gdi_orca", 1));
        assert_eq!(builder.lineup().len(), 1);
    }

    #[test]
    fn test_missing_count_is_unconstrained_but_zero_count_is_not() {
        let (catalog, _) = fixtures();
        let roster = [
            RosterUnit {
                unit_key: "nod_venom".to_string(),
                level: 20,
                count: None,
            },
            RosterUnit::new("nod_vertigo", 20, 0),
        ];

        let mut builder = LineupBuilder::new(&catalog, &roster, 500);
        assert!(builder.add_unit("nod_venom", 3));
        assert_eq!(builder.lineup()[0].count, 3);
        assert!(!builder.add_unit("nod_vertigo", 3));
    }

    #[test]
    fn test_budget_below_cheapest_unit_gives_empty_lineup() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("gdi_rifleman", 10, 10),
            RosterUnit::new("gdi_predator", 10, 10),
        ];

        let lineup = LineupBuilder::new(&catalog, &roster, 9).build(table.get(DoctrineId::Balanced));
        assert!(lineup.is_empty());
    }

    #[test]
    fn test_core_phase_stops_below_floor() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("nod_scorpion", 10, 3),
            RosterUnit::new("gdi_predator", 10, 3),
        ];

        // 165 - 3 * 40 = 45 left after the first core unit, below the floor of 50.
        let lineup =
            LineupBuilder::new(&catalog, &roster, 165).build(table.get(DoctrineId::Balanced));
        assert_eq!(keys(&lineup)[0], ("nod_scorpion", 3));
        // Fill phase still runs and adds one predator with the remaining 45.
        assert_eq!(keys(&lineup)[1], ("gdi_predator", 1));
    }

    #[test]
    fn test_support_phase_stops_below_floor() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("nod_militant", 10, 5),
            RosterUnit::new("nod_scorpion", 10, 5),
            RosterUnit::new("nod_venom", 10, 5),
            RosterUnit::new("nod_attack_bike", 10, 5),
        ];

        // 165 - 20 - 120 = 25 left: venom is skipped, the fill phase adds one bike.
        let lineup =
            LineupBuilder::new(&catalog, &roster, 165).build(table.get(DoctrineId::Balanced));
        assert_eq!(
            keys(&lineup),
            [("nod_militant", 2), ("nod_scorpion", 3), ("nod_attack_bike", 1)]
        );
    }

    #[test]
    fn test_support_floor_applies_to_affordable_units() {
        let (catalog, _) = fixtures();
        let doctrine = DoctrineData {
            id: DoctrineId::Balanced,
            name: "Cheap support".to_string(),
            soak_units: Vec::new(),
            core_units: vec!["nod_scorpion".to_string()],
            support_units: vec!["nod_militant".to_string()],
            priorities: Vec::new(),
        };
        let roster = [
            RosterUnit::new("nod_scorpion", 10, 3),
            RosterUnit::new("nod_militant", 10, 10),
        ];

        // 25 left after the core phase would buy 2 militants, but support stops at 30.
        let lineup = LineupBuilder::new(&catalog, &roster, 145).build(&doctrine);
        assert_eq!(keys(&lineup), [("nod_scorpion", 3), ("nod_militant", 1)]);
    }

    #[test]
    fn test_fill_phase_stops_below_floor() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("nod_militant", 10, 5),
            RosterUnit::new("nod_scorpion", 10, 5),
            RosterUnit::new("gdi_rifleman", 10, 5),
        ];

        // 15 left would buy a rifleman, but the fill phase needs 20.
        let lineup =
            LineupBuilder::new(&catalog, &roster, 155).build(table.get(DoctrineId::Balanced));
        assert_eq!(keys(&lineup), [("nod_militant", 2), ("nod_scorpion", 3)]);
        assert_eq!(lineup_cost(&catalog, &lineup), 140);
    }

    #[test]
    fn test_soak_only_tries_first_owned_key() {
        let (catalog, table) = fixtures();
        // Militant is owned but has zero available; rifleman is not tried in the soak phase.
        let roster = [
            RosterUnit::new("nod_militant", 10, 0),
            RosterUnit::new("gdi_rifleman", 10, 5),
        ];

        let mut builder = LineupBuilder::new(&catalog, &roster, 500);
        builder.soak_phase(table.get(DoctrineId::Balanced));
        assert!(builder.lineup().is_empty());
    }

    #[test]
    fn test_duplicate_roster_entries_added_once() {
        let (catalog, table) = fixtures();
        let roster = [
            RosterUnit::new("gdi_sniper", 10, 5),
            RosterUnit::new("gdi_sniper", 12, 5),
        ];

        let lineup =
            LineupBuilder::new(&catalog, &roster, 500).build(table.get(DoctrineId::Balanced));
        assert_eq!(keys(&lineup), [("gdi_sniper", 1)]);
        assert_eq!(lineup[0].desired_level, 10);
    }
}
