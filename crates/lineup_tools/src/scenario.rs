//! Scenario loading.
//!
//! A scenario is one recommendation request saved to disk: the extracted
//! roster and target, plus an optional default objective and engine
//! options. RON and JSON are both accepted, chosen by file extension.

use std::path::Path;

use lineup_core::engine::EngineOptions;
use lineup_core::target::{ExtractedData, Objective};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Objective used when neither the scenario nor the caller picks one.
pub const DEFAULT_OBJECTIVE: Objective = Objective::MaxWinChance;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Failed to parse JSON.
    #[error("Failed to parse scenario JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Extension is neither `.ron` nor `.json`.
    #[error("Unsupported scenario format: {0} (expected .ron or .json)")]
    UnsupportedFormat(String),
}

/// File formats a scenario can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    /// Rusty Object Notation.
    Ron,
    /// JSON, as emitted by the extraction pipeline.
    Json,
}

impl ScenarioFormat {
    /// Format implied by a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("ron") {
            Some(Self::Ron)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// A saved recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Roster and target.
    pub extracted: ExtractedData,
    /// Objective to optimize unless the caller overrides it.
    #[serde(default)]
    pub objective: Option<Objective>,
    /// Budget and player level.
    #[serde(default)]
    pub options: EngineOptions,
}

impl Scenario {
    /// Wrap extracted data in an unnamed scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, extracted: ExtractedData) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            extracted,
            objective: None,
            options: EngineOptions::default(),
        }
    }

    /// Load a scenario, picking the parser from the extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let format = ScenarioFormat::from_path(path)
            .ok_or_else(|| ScenarioError::UnsupportedFormat(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path)?;

        let scenario = match format {
            ScenarioFormat::Ron => Self::from_ron_str(&contents)?,
            ScenarioFormat::Json => Self::from_json_str(&contents)?,
        };
        tracing::debug!("Loaded scenario '{}' from {}", scenario.name, path.display());
        Ok(scenario)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Load from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        Ok(scenario)
    }

    /// Objective to run: the override, else the scenario's, else the default.
    #[must_use]
    pub fn resolved_objective(&self, override_objective: Option<Objective>) -> Objective {
        override_objective
            .or(self.objective)
            .unwrap_or(DEFAULT_OBJECTIVE)
    }

    /// Engine options with caller overrides applied field by field.
    #[must_use]
    pub fn resolved_options(&self, overrides: &EngineOptions) -> EngineOptions {
        EngineOptions {
            cp_limit: overrides.cp_limit.or(self.options.cp_limit),
            player_level: overrides.player_level.or(self.options.player_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::target::TargetType;

    const MINIMAL_RON: &str = r#"
        Scenario(
            name: "rifle camp",
            extracted: (
                player_roster: [(unit_key: "gdi_rifleman", level: 20, count: Some(6))],
                target: (type: camp),
            ),
        )
    "#;

    #[test]
    fn test_minimal_ron_uses_defaults() {
        let scenario = Scenario::from_ron_str(MINIMAL_RON).unwrap();
        assert_eq!(scenario.name, "rifle camp");
        assert!(scenario.description.is_empty());
        assert_eq!(scenario.objective, None);
        assert_eq!(scenario.options, EngineOptions::default());
        assert_eq!(scenario.extracted.target.target_type, TargetType::Camp);
        assert_eq!(scenario.extracted.player_roster[0].count, Some(6));
    }

    #[test]
    fn test_json_uses_pipeline_names() {
        let json = r#"{
            "name": "outpost",
            "objective": "min_repair_time",
            "options": { "cp_limit": 120 },
            "extracted": {
                "player_roster": [{ "unit_key": "nod_militant", "level": 10 }],
                "target": { "type": "outpost", "defender_units": [] }
            }
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.objective, Some(Objective::MinRepairTime));
        assert_eq!(scenario.options.cp_limit, Some(120));
        assert_eq!(scenario.extracted.player_roster[0].count, None);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut scenario = Scenario::from_ron_str(MINIMAL_RON).unwrap();
        assert_eq!(scenario.resolved_objective(None), DEFAULT_OBJECTIVE);

        scenario.objective = Some(Objective::MinPowerCost);
        scenario.options = EngineOptions {
            cp_limit: Some(300),
            player_level: Some(40),
        };
        assert_eq!(scenario.resolved_objective(None), Objective::MinPowerCost);
        assert_eq!(
            scenario.resolved_objective(Some(Objective::MaxLootPerMinute)),
            Objective::MaxLootPerMinute
        );

        let resolved = scenario.resolved_options(&EngineOptions::with_cp_limit(100));
        assert_eq!(resolved.cp_limit, Some(100));
        assert_eq!(resolved.player_level, Some(40));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.RON")),
            Some(ScenarioFormat::Ron)
        );
        assert_eq!(
            ScenarioFormat::from_path(Path::new("b.json")),
            Some(ScenarioFormat::Json)
        );
        assert_eq!(ScenarioFormat::from_path(Path::new("b.toml")), None);
        assert_eq!(ScenarioFormat::from_path(Path::new("noext")), None);
    }
}
