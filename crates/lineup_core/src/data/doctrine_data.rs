//! Doctrine data structures for data-driven strategic templates.

use serde::{Deserialize, Serialize};

use crate::doctrine::DoctrineId;

/// Data-driven doctrine definition.
///
/// # Example RON
///
/// ```ron
/// DoctrineData(
///     id: balanced,
///     name: "Balanced",
///     soak_units: ["nod_militant", "gdi_rifleman"],
///     core_units: ["nod_scorpion", "gdi_predator"],
///     support_units: ["nod_venom", "gdi_orca"],
///     priorities: ["flexibility", "cost-efficiency"],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctrineData {
    /// Which doctrine this record defines.
    pub id: DoctrineId,

    /// Display name used in explanations.
    pub name: String,

    /// Cheap absorbers sent first, in preference order.
    #[serde(default)]
    pub soak_units: Vec<String>,

    /// Primary damage dealers, in preference order.
    #[serde(default)]
    pub core_units: Vec<String>,

    /// Secondary and cleanup units, in preference order.
    #[serde(default)]
    pub support_units: Vec<String>,

    /// Priority tags (explanation only).
    #[serde(default)]
    pub priorities: Vec<String>,
}

impl DoctrineData {
    /// Iterate every unit key this doctrine names, in soak, core, support order.
    pub fn role_keys(&self) -> impl Iterator<Item = &str> {
        self.soak_units
            .iter()
            .chain(&self.core_units)
            .chain(&self.support_units)
            .map(String::as_str)
    }

    /// Whether the key is listed in any role.
    #[must_use]
    pub fn mentions(&self, key: &str) -> bool {
        self.role_keys().any(|k| k == key)
    }
}
