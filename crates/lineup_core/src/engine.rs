//! Recommendation orchestrator.
//!
//! Runs analysis, doctrine selection, lineup building, wave planning,
//! scoring and explanation for the requested objective, then repeats the
//! pipeline under alternate objectives to offer up to two alternatives.
//!
//! The engine holds only immutable data, so one instance can serve any
//! number of concurrent requests.

use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_defenders, DefenderAnalysis};
use crate::catalog::UnitCatalog;
use crate::doctrine::{select_doctrine, DoctrineId, DoctrineTable};
use crate::error::Result;
use crate::explain::generate_explanation;
use crate::lineup::{lineup_cost, LineupBuilder, LineupUnit};
use crate::math::{fixed_serde, Fixed};
use crate::scoring::{calculate_risk, calculate_score};
use crate::target::{ExtractedData, Objective};
use crate::waves::{plan_waves, WavePlan};

/// Command-point budget used when the caller does not give one.
pub const DEFAULT_CP_LIMIT: u32 = 500;

/// Most alternatives ever returned.
pub const MAX_ALTERNATIVES: usize = 2;

/// The loot alternative runs on this percentage of the budget.
pub const LOOT_ALTERNATIVE_BUDGET_PERCENT: u32 = 90;

/// Budget for the loot alternative, rounded down.
///
/// Costs are whole numbers, so flooring a fractional budget never changes
/// what fits.
#[must_use]
pub const fn loot_alternative_budget(cp_limit: u32) -> u32 {
    cp_limit / 100 * LOOT_ALTERNATIVE_BUDGET_PERCENT
        + cp_limit % 100 * LOOT_ALTERNATIVE_BUDGET_PERCENT / 100
}

/// Per-request engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Command-point budget. `None` uses [`DEFAULT_CP_LIMIT`]; `Some(0)` is a
    /// real zero budget and yields an empty lineup, not the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp_limit: Option<u32>,
    /// Player level. Carried for callers; not used in selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_level: Option<u32>,
}

impl EngineOptions {
    /// Options with an explicit budget.
    #[must_use]
    pub fn with_cp_limit(cp_limit: u32) -> Self {
        Self {
            cp_limit: Some(cp_limit),
            ..Self::default()
        }
    }

    /// Budget after applying the default.
    #[must_use]
    pub fn resolved_cp_limit(&self) -> u32 {
        self.cp_limit.unwrap_or(DEFAULT_CP_LIMIT)
    }
}

/// One scored lineup with its wave plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupRecommendation {
    /// Objective this lineup was built for.
    pub objective: Objective,
    /// Doctrine used.
    pub doctrine: DoctrineId,
    /// Selected units.
    pub lineup: Vec<LineupUnit>,
    /// Ordered attack waves.
    pub wave_plan: Vec<WavePlan>,
    /// Suitability rating, 0-100, higher is better.
    #[serde(with = "fixed_serde")]
    pub score: Fixed,
    /// Failure rating, 0-100, lower is better.
    pub risk: u32,
    /// Rationale text.
    pub explanation: String,
    /// Command points the lineup uses.
    pub cp_total: u32,
}

/// The top pick plus alternatives under other objectives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Recommendation for the requested objective.
    pub top: LineupRecommendation,
    /// Up to [`MAX_ALTERNATIVES`] recommendations under other objectives.
    pub alternatives: Vec<LineupRecommendation>,
}

/// Stateless recommendation engine over a catalog and doctrine table.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: UnitCatalog,
    doctrines: DoctrineTable,
}

impl RecommendationEngine {
    /// Create an engine over the given data.
    #[must_use]
    pub fn new(catalog: UnitCatalog, doctrines: DoctrineTable) -> Self {
        Self { catalog, doctrines }
    }

    /// Create an engine over the embedded catalog and doctrine table.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(UnitCatalog::builtin()?, DoctrineTable::builtin()?))
    }

    /// The unit catalog.
    #[must_use]
    pub fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// The doctrine table.
    #[must_use]
    pub fn doctrines(&self) -> &DoctrineTable {
        &self.doctrines
    }

    /// Produce the top recommendation and alternatives.
    ///
    /// Alternatives, in order: `min_repair_time` at the full budget (unless
    /// that is the requested objective), then `max_loot_per_minute` at 90%
    /// of the budget (unless that is the requested objective).
    #[must_use]
    pub fn generate_recommendations(
        &self,
        extracted: &ExtractedData,
        objective: Objective,
        options: &EngineOptions,
    ) -> Recommendations {
        let cp_limit = options.resolved_cp_limit();
        let analysis = analyze_defenders(&self.catalog, &extracted.target.defender_units);

        let top = self.recommend(extracted, &analysis, objective, cp_limit);

        let mut alternatives = Vec::with_capacity(MAX_ALTERNATIVES);
        if objective != Objective::MinRepairTime {
            alternatives.push(self.recommend(
                extracted,
                &analysis,
                Objective::MinRepairTime,
                cp_limit,
            ));
        }
        if objective != Objective::MaxLootPerMinute {
            alternatives.push(self.recommend(
                extracted,
                &analysis,
                Objective::MaxLootPerMinute,
                loot_alternative_budget(cp_limit),
            ));
        }
        alternatives.truncate(MAX_ALTERNATIVES);

        tracing::debug!(
            "Top: score={} risk={} cp={} ({} alternatives)",
            top.score,
            top.risk,
            top.cp_total,
            alternatives.len()
        );

        Recommendations { top, alternatives }
    }

    /// Run the full pipeline for a single objective and budget.
    #[must_use]
    pub fn recommend(
        &self,
        extracted: &ExtractedData,
        analysis: &DefenderAnalysis,
        objective: Objective,
        cp_limit: u32,
    ) -> LineupRecommendation {
        let target = &extracted.target;
        let doctrine_id = select_doctrine(target.target_type, analysis, objective);
        let doctrine = self.doctrines.get(doctrine_id);

        let lineup =
            LineupBuilder::new(&self.catalog, &extracted.player_roster, cp_limit).build(doctrine);
        let wave_plan = plan_waves(&lineup, doctrine);
        let score = calculate_score(&self.catalog, &lineup, objective, analysis);
        let risk = calculate_risk(&lineup, analysis, target.target_type);
        let explanation = generate_explanation(doctrine, analysis, objective);
        let cp_total = lineup_cost(&self.catalog, &lineup);

        LineupRecommendation {
            objective,
            doctrine: doctrine_id,
            lineup,
            wave_plan,
            score,
            risk,
            explanation,
            cp_total,
        }
    }
}
