//! Data validation utilities.

use std::path::Path;

use lineup_core::engine::RecommendationEngine;
use lineup_core::error::{LineupError, Result};

use crate::data::{load_engine_from_dir, DataLoadError};

/// Cross-check an engine's catalog and doctrine table.
///
/// # Errors
///
/// Returns [`LineupError::ValidationFailed`] listing every problem found.
pub fn validate_engine(engine: &RecommendationEngine) -> Result<()> {
    let mut problems = engine.catalog().validate();
    problems.extend(engine.doctrines().validate(engine.catalog()));

    for problem in &problems {
        tracing::warn!("{problem}");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(LineupError::ValidationFailed(problems))
    }
}

/// Validate the RON data files in a directory.
///
/// # Errors
///
/// Returns an error if any data file fails to load or validate.
pub fn validate_data_directory(path: &Path) -> std::result::Result<(), DataLoadError> {
    let engine = load_engine_from_dir(path)?;
    validate_engine(&engine)?;
    Ok(())
}
