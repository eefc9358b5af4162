//! Text and JSON rendering of recommendations and catalog listings.
//!
//! Reports resolve unit keys to display names and show per-entry command
//! point cost. Scores are printed as decimals; the raw fixed-point value
//! stays inside the engine.

use lineup_core::catalog::UnitCatalog;
use lineup_core::data::{UnitStats, UnitType};
use lineup_core::doctrine::{DoctrineId, DoctrineTable};
use lineup_core::engine::{LineupRecommendation, Recommendations};
use lineup_core::factions::Faction;
use lineup_core::lineup::LineupUnit;
use lineup_core::target::Objective;
use serde::Serialize;

/// One lineup entry as shown to a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupLine {
    /// Catalog key.
    pub unit_key: String,
    /// Display name, or the key when the catalog does not know it.
    pub name: String,
    /// Level to deploy at.
    pub level: u32,
    /// Number of units.
    pub count: u32,
    /// Command points for the whole entry.
    pub cp: u32,
    /// Hit points per unit at the deployed level, when tabulated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    /// Damage per second per unit at the deployed level, when tabulated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dps: Option<u32>,
}

impl LineupLine {
    fn new(catalog: &UnitCatalog, unit: &LineupUnit) -> Self {
        let stats = catalog.get(&unit.unit_key);
        Self {
            unit_key: unit.unit_key.clone(),
            name: stats.map_or_else(|| unit.unit_key.clone(), |s| s.name.clone()),
            level: unit.desired_level,
            count: unit.count,
            cp: catalog.cost_of(&unit.unit_key).saturating_mul(unit.count),
            hp: stats.and_then(|s| s.hp_at_level(unit.desired_level)),
            dps: stats.and_then(|s| s.dps_at_level(unit.desired_level)),
        }
    }

    /// "hp 720, 85 dps" style summary of the known level stats.
    fn stat_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(hp) = self.hp {
            parts.push(format!("hp {hp}"));
        }
        if let Some(dps) = self.dps {
            parts.push(format!("{dps} dps"));
        }
        parts.join(", ")
    }
}

fn lines(catalog: &UnitCatalog, units: &[LineupUnit]) -> Vec<LineupLine> {
    units.iter().map(|u| LineupLine::new(catalog, u)).collect()
}

/// One wave as shown to a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveLine {
    /// Wave number.
    pub wave: u32,
    /// What the wave is for.
    pub strategy: String,
    /// Units in the wave.
    pub units: Vec<LineupLine>,
}

/// A recommendation resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    /// Objective optimized for.
    pub objective: Objective,
    /// Doctrine id.
    pub doctrine: DoctrineId,
    /// Doctrine display name.
    pub doctrine_name: String,
    /// Lineup entries.
    pub lineup: Vec<LineupLine>,
    /// Attack waves.
    pub waves: Vec<WaveLine>,
    /// Suitability, 0-100.
    pub score: f64,
    /// Failure rating, 0-100.
    pub risk: u32,
    /// Total command points.
    pub cp_total: u32,
    /// Rationale.
    pub explanation: String,
}

impl RecommendationView {
    /// Resolve a recommendation for display.
    #[must_use]
    pub fn new(
        catalog: &UnitCatalog,
        doctrines: &DoctrineTable,
        rec: &LineupRecommendation,
    ) -> Self {
        Self {
            objective: rec.objective,
            doctrine: rec.doctrine,
            doctrine_name: doctrines.get(rec.doctrine).name.clone(),
            lineup: lines(catalog, &rec.lineup),
            waves: rec
                .wave_plan
                .iter()
                .map(|w| WaveLine {
                    wave: w.wave,
                    strategy: w.strategy.clone(),
                    units: lines(catalog, &w.units),
                })
                .collect(),
            score: rec.score.to_num::<f64>(),
            risk: rec.risk,
            cp_total: rec.cp_total,
            explanation: rec.explanation.clone(),
        }
    }
}

/// Full report for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Scenario name.
    pub scenario: String,
    /// Top recommendation.
    pub top: RecommendationView,
    /// Alternatives under other objectives.
    pub alternatives: Vec<RecommendationView>,
}

impl Report {
    /// Resolve a set of recommendations for display.
    #[must_use]
    pub fn new(
        scenario: &str,
        catalog: &UnitCatalog,
        doctrines: &DoctrineTable,
        recs: &Recommendations,
    ) -> Self {
        Self {
            scenario: scenario.to_string(),
            top: RecommendationView::new(catalog, doctrines, &recs.top),
            alternatives: recs
                .alternatives
                .iter()
                .map(|r| RecommendationView::new(catalog, doctrines, r))
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering for terminals.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("== {} ==\n", self.scenario));
        write_view(&mut out, "Top pick", &self.top);
        for alt in &self.alternatives {
            out.push('\n');
            write_view(&mut out, "Alternative", alt);
        }
        out
    }
}

fn write_view(out: &mut String, heading: &str, view: &RecommendationView) {
    out.push_str(&format!(
        "{heading} ({}): {} | {} CP | score {:.1} | risk {}\n",
        view.objective.as_str(),
        view.doctrine_name,
        view.cp_total,
        view.score,
        view.risk
    ));
    out.push_str(&format!("  {}\n", view.explanation));

    if view.lineup.is_empty() {
        out.push_str("  (no units fit the budget)\n");
        return;
    }
    out.push_str("  Lineup:\n");
    for line in &view.lineup {
        out.push_str(&format!(
            "    {:>3}x {:<24} L{:<3} {:>5} CP  {}\n",
            line.count,
            line.name,
            line.level,
            line.cp,
            line.stat_summary()
        ));
    }
    out.push_str("  Waves:\n");
    for wave in &view.waves {
        let units: Vec<String> = wave
            .units
            .iter()
            .map(|u| format!("{}x {}", u.count, u.name))
            .collect();
        out.push_str(&format!("    {}. {}\n", wave.wave, units.join(", ")));
        out.push_str(&format!("       {}\n", wave.strategy));
    }
}

/// Catalog entries matching the optional filters, in catalog order.
#[must_use]
pub fn filter_units(
    catalog: &UnitCatalog,
    faction: Option<Faction>,
    unit_type: Option<UnitType>,
) -> Vec<&UnitStats> {
    match (faction, unit_type) {
        (Some(f), Some(t)) => catalog.by_faction(f).filter(|u| u.unit_type == t).collect(),
        (Some(f), None) => catalog.by_faction(f).collect(),
        (None, Some(t)) => catalog.by_type(t).collect(),
        (None, None) => catalog.all().iter().collect(),
    }
}

/// Tabulate catalog entries.
#[must_use]
pub fn unit_table(units: &[&UnitStats]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<22} {:<24} {:<10} {:<8} {:>4}  {}\n",
        "KEY", "NAME", "FACTION", "TYPE", "CP", "NOTES"
    ));
    for unit in units {
        let mut notes = Vec::new();
        if unit.is_cheap() {
            notes.push("cheap".to_string());
        }
        if let Some(source) = &unit.source {
            notes.push(source.clone());
        }
        if let Some(confidence) = unit.confidence {
            notes.push(format!("{confidence:?} confidence").to_lowercase());
        }
        out.push_str(&format!(
            "{:<22} {:<24} {:<10} {:<8} {:>4}  {}\n",
            unit.key,
            unit.name,
            unit.faction.short_name(),
            unit.unit_type.as_str(),
            unit.cost,
            notes.join(", ")
        ));
    }
    out.push_str(&format!("{} unit(s)\n", units.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::engine::{EngineOptions, RecommendationEngine};
    use lineup_core::target::{ExtractedData, RosterUnit, Target, TargetType};

    fn report() -> Report {
        let engine = RecommendationEngine::builtin().unwrap();
        let data = ExtractedData {
            player_roster: vec![
                RosterUnit::new("nod_militant", 50, 10),
                RosterUnit::new("nod_scorpion", 45, 2),
            ],
            target: Target::undefended(TargetType::Outpost),
        };
        let recs =
            engine.generate_recommendations(&data, Objective::MaxWinChance, &EngineOptions::default());
        Report::new("test", engine.catalog(), engine.doctrines(), &recs)
    }

    #[test]
    fn test_lines_carry_names_and_cp() {
        let report = report();
        let militant = &report.top.lineup[0];
        assert_eq!(militant.name, "Militant");
        assert_eq!(militant.count, 2);
        assert_eq!(militant.cp, 20);
        assert_eq!(report.top.doctrine_name, "Balanced");
    }

    #[test]
    fn test_lines_carry_level_stats() {
        let report = report();
        let militant = &report.top.lineup[0];
        // Level 50 reads the level 40 row.
        assert_eq!((militant.hp, militant.dps), (Some(720), Some(85)));
        assert_eq!(militant.stat_summary(), "hp 720, 85 dps");

        let scorpion = &report.top.lineup[1];
        assert_eq!(scorpion.unit_key, "nod_scorpion");
        assert_eq!((scorpion.hp, scorpion.dps), (Some(1800), Some(190)));
        assert!(report.to_text().contains("hp 1800, 190 dps"));
    }

    #[test]
    fn test_text_lists_alternatives() {
        let text = report().to_text();
        assert!(text.starts_with("== test =="));
        assert!(text.contains("Top pick (max_win_chance): Balanced"));
        assert!(text.contains("Alternative (min_repair_time)"));
        assert!(text.contains("Alternative (max_loot_per_minute)"));
    }

    #[test]
    fn test_json_score_is_decimal() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["top"]["score"].is_f64());
        assert_eq!(value["top"]["objective"], "max_win_chance");
        assert_eq!(value["top"]["doctrine"], "balanced");
    }

    #[test]
    fn test_filter_units() {
        let catalog = UnitCatalog::builtin().unwrap();
        let nod_air = filter_units(&catalog, Some(Faction::Nod), Some(UnitType::Air));
        let keys: Vec<&str> = nod_air.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(keys, ["nod_venom", "nod_vertigo"]);
        assert_eq!(filter_units(&catalog, None, None).len(), catalog.len());
    }

    #[test]
    fn test_unit_table_counts_rows() {
        let catalog = UnitCatalog::builtin().unwrap();
        let units = filter_units(&catalog, Some(Faction::Forgotten), None);
        let table = unit_table(&units);
        assert!(table.contains("forgotten_jeep"));
        assert!(table.ends_with("5 unit(s)\n"));
    }
}
