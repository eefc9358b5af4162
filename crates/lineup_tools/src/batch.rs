//! Batch evaluation of a scenario directory.
//!
//! Every scenario is an independent request against the same read-only
//! engine, so they run in parallel with rayon. Results are reported in
//! file-name order regardless of completion order.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use lineup_core::doctrine::DoctrineId;
use lineup_core::engine::{EngineOptions, RecommendationEngine};
use lineup_core::target::Objective;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::scenario::{Scenario, ScenarioError, ScenarioFormat};

/// Overrides applied to every scenario in a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchConfig {
    /// Objective to use instead of each scenario's own.
    pub objective: Option<Objective>,
    /// Options that replace the scenario's where set.
    pub options: EngineOptions,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// Scenario file name.
    pub file: String,
    /// Scenario name.
    pub scenario: String,
    /// Objective used.
    pub objective: Objective,
    /// Doctrine picked for the top recommendation.
    pub doctrine: DoctrineId,
    /// Lineup entries in the top recommendation.
    pub units: usize,
    /// Command points used.
    pub cp_total: u32,
    /// Score of the top recommendation.
    pub score: f64,
    /// Risk of the top recommendation.
    pub risk: u32,
}

/// A scenario that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchError {
    /// Scenario file name.
    pub file: String,
    /// Error message.
    pub message: String,
}

/// All outcomes of a batch, sorted by file name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResults {
    /// Successful evaluations.
    pub entries: Vec<BatchEntry>,
    /// Scenarios that could not be loaded.
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Summary table, one row per scenario.
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<28} {:<20} {:<14} {:>5} {:>6} {:>5}\n",
            "FILE", "OBJECTIVE", "DOCTRINE", "CP", "SCORE", "RISK"
        ));
        for e in &self.entries {
            out.push_str(&format!(
                "{:<28} {:<20} {:<14} {:>5} {:>6.1} {:>5}\n",
                e.file,
                e.objective.as_str(),
                format!("{:?}", e.doctrine),
                e.cp_total,
                e.score,
                e.risk
            ));
        }
        for err in &self.errors {
            out.push_str(&format!("{:<28} ERROR: {}\n", err.file, err.message));
        }
        out
    }
}

/// Scenario files (`.ron` / `.json`) directly inside `dir`, sorted.
pub fn scenario_files(dir: &Path) -> Result<Vec<PathBuf>, ScenarioError> {
    if !dir.is_dir() {
        return Err(ScenarioError::FileNotFound(dir.display().to_string()));
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && ScenarioFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

fn evaluate(
    engine: &RecommendationEngine,
    path: &Path,
    config: &BatchConfig,
) -> Result<BatchEntry, BatchError> {
    let file = file_name(path);
    let scenario = Scenario::load(path).map_err(|e| BatchError {
        file: file.clone(),
        message: e.to_string(),
    })?;

    let objective = scenario.resolved_objective(config.objective);
    let options = scenario.resolved_options(&config.options);
    let recs = engine.generate_recommendations(&scenario.extracted, objective, &options);

    Ok(BatchEntry {
        file,
        scenario: scenario.name,
        objective,
        doctrine: recs.top.doctrine,
        units: recs.top.lineup.len(),
        cp_total: recs.top.cp_total,
        score: recs.top.score.to_num::<f64>(),
        risk: recs.top.risk,
    })
}

/// Evaluate every scenario file in a directory.
///
/// A scenario that fails to load is recorded and does not stop the batch.
pub fn run_batch(
    engine: &RecommendationEngine,
    dir: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, ScenarioError> {
    let start = Instant::now();
    let files = scenario_files(dir)?;
    info!("Evaluating {} scenarios in {}", files.len(), dir.display());

    // `collect` on an indexed parallel iterator keeps input order.
    let results: Vec<Result<BatchEntry, BatchError>> = files
        .par_iter()
        .map(|path| evaluate(engine, path, config))
        .collect();

    let mut batch = BatchResults::default();
    for result in results {
        match result {
            Ok(entry) => batch.entries.push(entry),
            Err(e) => {
                warn!("Scenario {} failed: {}", e.file, e.message);
                batch.errors.push(e);
            }
        }
    }

    info!(
        "Batch complete: {} ok, {} failed in {:.2}s",
        batch.entries.len(),
        batch.errors.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(batch)
}
