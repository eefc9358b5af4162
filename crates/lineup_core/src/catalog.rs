//! Key-indexed, read-only unit catalog.
//!
//! The catalog is built once (from the embedded asset or a RON string
//! supplied by the caller) and never mutated afterwards, so it can be
//! shared freely between concurrent recommendation requests.

use std::collections::HashMap;

use serde::Deserialize;

use crate::data::{UnitStats, UnitType, BUILTIN_UNIT_CATALOG};
use crate::error::{LineupError, Result};
use crate::factions::Faction;

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
#[serde(rename = "UnitCatalog")]
struct CatalogFile {
    units: Vec<UnitStats>,
}

/// Largest damage multiplier (percent) accepted by [`UnitCatalog::validate`].
pub const MAX_DAMAGE_PERCENT: u16 = 500;

/// Read-only unit catalog with constant-time lookup by key.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: Vec<UnitStats>,
    index: HashMap<String, usize>,
}

impl UnitCatalog {
    /// Build a catalog from unit records, rejecting duplicate keys.
    pub fn new(units: Vec<UnitStats>) -> Result<Self> {
        let mut index = HashMap::with_capacity(units.len());
        for (i, unit) in units.iter().enumerate() {
            if index.insert(unit.key.clone(), i).is_some() {
                return Err(LineupError::DuplicateUnit(unit.key.clone()));
            }
        }
        Ok(Self { units, index })
    }

    /// Parse a catalog from RON text.
    ///
    /// `source` names the data for error messages (usually a file path).
    pub fn from_ron_str(ron: &str, source: &str) -> Result<Self> {
        let file: CatalogFile = ron::from_str(ron).map_err(|e| LineupError::parse(source, &e))?;
        let catalog = Self::new(file.units)?;
        tracing::debug!("Loaded {} units from {source}", catalog.len());
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_UNIT_CATALOG, "builtin:unit_catalog.ron")
    }

    /// Look up a unit by key. Unknown keys yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&UnitStats> {
        self.index.get(key).map(|&i| &self.units[i])
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Command-point cost of a unit, 0 for unknown keys.
    #[must_use]
    pub fn cost_of(&self, key: &str) -> u32 {
        self.get(key).map_or(0, |u| u.cost)
    }

    /// All units in catalog order.
    #[must_use]
    pub fn all(&self) -> &[UnitStats] {
        &self.units
    }

    /// Units belonging to a faction, in catalog order.
    pub fn by_faction(&self, faction: Faction) -> impl Iterator<Item = &UnitStats> {
        self.units.iter().filter(move |u| u.faction == faction)
    }

    /// Units of a movement class, in catalog order.
    pub fn by_type(&self, unit_type: UnitType) -> impl Iterator<Item = &UnitStats> {
        self.units.iter().filter(move |u| u.unit_type == unit_type)
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the catalog has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Check records for values the engine cannot use sensibly.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for unit in &self.units {
            if unit.key.trim().is_empty() {
                errors.push(format!("Unit named '{}' has an empty key", unit.name));
            }
            if unit.cost == 0 {
                errors.push(format!("Unit '{}' has zero cost", unit.key));
            }
            if unit.key.contains(char::is_whitespace) {
                errors.push(format!("Unit key '{}' contains whitespace", unit.key));
            }
            if !unit.key.starts_with(unit.faction.short_name()) {
                errors.push(format!(
                    "Unit '{}' is not prefixed with its faction '{}'",
                    unit.key,
                    unit.faction.short_name()
                ));
            }
            if let Some(profile) = unit.damage_vs {
                let all = [profile.infantry, profile.vehicle, profile.structure, profile.air];
                if all.iter().all(|&m| m == 0) {
                    errors.push(format!("Unit '{}' has an all-zero damage profile", unit.key));
                }
                if all.iter().any(|&m| m > MAX_DAMAGE_PERCENT) {
                    errors.push(format!(
                        "Unit '{}' has a damage multiplier above {MAX_DAMAGE_PERCENT}%",
                        unit.key
                    ));
                }
            }
        }

        errors
    }
}
