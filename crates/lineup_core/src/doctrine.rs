//! Doctrine templates and the doctrine decision table.
//!
//! A doctrine names which roster units fill the soak, core and support
//! roles. Templates are data ([`DoctrineData`]); selection is a fixed,
//! first-match-wins decision table over the defender analysis.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::DefenderAnalysis;
use crate::catalog::UnitCatalog;
use crate::data::{DoctrineData, BUILTIN_DOCTRINES};
use crate::error::{LineupError, Result};
use crate::target::{Objective, TargetType};

/// Identifier of a doctrine the selector can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctrineId {
    /// Counter infantry-dominated defenses.
    AntiInfantry,
    /// Counter vehicle-dominated defenses.
    AntiVehicle,
    /// Break fortified bases and turret lines.
    BaseAssault,
    /// Mixed default.
    Balanced,
}

impl DoctrineId {
    /// All doctrines, in selection priority order.
    pub const ALL: [Self; 4] = [
        Self::AntiInfantry,
        Self::AntiVehicle,
        Self::BaseAssault,
        Self::Balanced,
    ];
}

/// Pick a doctrine for a target.
///
/// First match wins:
/// 1. infantry-heavy defenders -> Anti-Infantry
/// 2. vehicle-heavy defenders -> Anti-Vehicle
/// 3. base target or turret-heavy -> Base Assault
/// 4. otherwise Balanced
///
/// `objective` does not influence the choice; it only affects budget and
/// scoring downstream.
#[must_use]
pub fn select_doctrine(
    target_type: TargetType,
    analysis: &DefenderAnalysis,
    objective: Objective,
) -> DoctrineId {
    let id = if analysis.infantry_heavy {
        DoctrineId::AntiInfantry
    } else if analysis.vehicle_heavy {
        DoctrineId::AntiVehicle
    } else if target_type == TargetType::Base || analysis.turret_heavy {
        DoctrineId::BaseAssault
    } else {
        DoctrineId::Balanced
    };

    tracing::debug!(
        "Selected {id:?} for {} target (objective {})",
        target_type.as_str(),
        objective.as_str()
    );
    id
}

/// On-disk shape of a doctrine file.
#[derive(Debug, Deserialize)]
#[serde(rename = "DoctrineTable")]
struct DoctrineFile {
    doctrines: Vec<DoctrineData>,
}

/// One template per [`DoctrineId`], guaranteed complete at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctrineTable {
    anti_infantry: DoctrineData,
    anti_vehicle: DoctrineData,
    base_assault: DoctrineData,
    balanced: DoctrineData,
}

impl DoctrineTable {
    /// Build a table from doctrine records.
    ///
    /// Every [`DoctrineId`] must appear exactly once.
    pub fn new(doctrines: Vec<DoctrineData>) -> Result<Self> {
        let mut anti_infantry = None;
        let mut anti_vehicle = None;
        let mut base_assault = None;
        let mut balanced = None;

        for doctrine in doctrines {
            let slot = match doctrine.id {
                DoctrineId::AntiInfantry => &mut anti_infantry,
                DoctrineId::AntiVehicle => &mut anti_vehicle,
                DoctrineId::BaseAssault => &mut base_assault,
                DoctrineId::Balanced => &mut balanced,
            };
            if slot.is_some() {
                return Err(LineupError::DuplicateDoctrine(doctrine.id));
            }
            *slot = Some(doctrine);
        }

        Ok(Self {
            anti_infantry: anti_infantry
                .ok_or(LineupError::MissingDoctrine(DoctrineId::AntiInfantry))?,
            anti_vehicle: anti_vehicle
                .ok_or(LineupError::MissingDoctrine(DoctrineId::AntiVehicle))?,
            base_assault: base_assault
                .ok_or(LineupError::MissingDoctrine(DoctrineId::BaseAssault))?,
            balanced: balanced
                .ok_or(LineupError::MissingDoctrine(DoctrineId::Balanced))?,
        })
    }

    /// Parse a doctrine table from RON text.
    pub fn from_ron_str(ron: &str, source: &str) -> Result<Self> {
        let file: DoctrineFile = ron::from_str(ron).map_err(|e| LineupError::parse(source, &e))?;
        Self::new(file.doctrines)
    }

    /// The doctrine table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_DOCTRINES, "builtin:doctrines.ron")
    }

    /// Template for a doctrine.
    #[must_use]
    pub const fn get(&self, id: DoctrineId) -> &DoctrineData {
        match id {
            DoctrineId::AntiInfantry => &self.anti_infantry,
            DoctrineId::AntiVehicle => &self.anti_vehicle,
            DoctrineId::BaseAssault => &self.base_assault,
            DoctrineId::Balanced => &self.balanced,
        }
    }

    /// All templates, in selection priority order.
    pub fn iter(&self) -> impl Iterator<Item = &DoctrineData> {
        DoctrineId::ALL.into_iter().map(|id| self.get(id))
    }

    /// Cross-check templates against a catalog.
    ///
    /// Reports role keys unknown to the catalog and keys listed in more
    /// than one role of the same doctrine.
    #[must_use]
    pub fn validate(&self, catalog: &UnitCatalog) -> Vec<String> {
        let mut errors = Vec::new();

        for doctrine in self.iter() {
            let mut seen = HashSet::new();
            for key in doctrine.role_keys() {
                if !catalog.contains(key) {
                    errors.push(format!(
                        "Doctrine '{}' references unknown unit '{key}'",
                        doctrine.name
                    ));
                }
                if !seen.insert(key) {
                    errors.push(format!(
                        "Doctrine '{}' lists unit '{key}' more than once",
                        doctrine.name
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(infantry_heavy: bool, vehicle_heavy: bool) -> DefenderAnalysis {
        DefenderAnalysis {
            infantry_heavy,
            vehicle_heavy,
            ..Default::default()
        }
    }

    #[test]
    fn test_infantry_heavy_wins_over_everything() {
        for target in [TargetType::Camp, TargetType::Outpost, TargetType::Base] {
            for objective in Objective::ALL {
                assert_eq!(
                    select_doctrine(target, &analysis(true, true), objective),
                    DoctrineId::AntiInfantry
                );
            }
        }
    }

    #[test]
    fn test_vehicle_heavy_beats_base() {
        assert_eq!(
            select_doctrine(TargetType::Base, &analysis(false, true), Objective::MaxWinChance),
            DoctrineId::AntiVehicle
        );
    }

    #[test]
    fn test_base_and_turret_select_base_assault() {
        assert_eq!(
            select_doctrine(TargetType::Base, &analysis(false, false), Objective::MinPowerCost),
            DoctrineId::BaseAssault
        );

        let turrets = DefenderAnalysis {
            turret_heavy: true,
            ..Default::default()
        };
        assert_eq!(
            select_doctrine(TargetType::Camp, &turrets, Objective::MinPowerCost),
            DoctrineId::BaseAssault
        );
    }

    #[test]
    fn test_default_is_balanced() {
        assert_eq!(
            select_doctrine(TargetType::Outpost, &analysis(false, false), Objective::MaxLootPerMinute),
            DoctrineId::Balanced
        );
    }

    #[test]
    fn test_builtin_table_is_complete_and_consistent() {
        let table = DoctrineTable::builtin().unwrap();
        let catalog = UnitCatalog::builtin().unwrap();
        let errors = table.validate(&catalog);
        assert!(errors.is_empty(), "Errors: {errors:?}");
        assert_eq!(table.get(DoctrineId::BaseAssault).name, "Base Assault");
    }

    #[test]
    fn test_missing_doctrine_rejected() {
        let result = DoctrineTable::from_ron_str(
            r#"DoctrineTable(doctrines: [DoctrineData(id: balanced, name: "Balanced")])"#,
            "partial.ron",
        );
        assert!(matches!(
            result,
            Err(LineupError::MissingDoctrine(DoctrineId::AntiInfantry))
        ));
    }

    #[test]
    fn test_validate_flags_unknown_and_repeated_keys() {
        let catalog = UnitCatalog::builtin().unwrap();
        let mut table = DoctrineTable::builtin().unwrap();
        table.balanced.core_units.push("nod_militant".to_string());
        table.balanced.support_units.push("nod_obelisk".to_string());

        let errors = table.validate(&catalog);
        assert_eq!(errors.len(), 2, "Errors: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("more than once")));
        assert!(errors.iter().any(|e| e.contains("unknown unit 'nod_obelisk'")));
    }
}
