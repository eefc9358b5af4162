//! Catalog and doctrine loading for the tools.
//!
//! The engine ships with embedded data. A data directory holding
//! `unit_catalog.ron` and `doctrines.ron` replaces it, given either on the
//! command line or through [`DATA_DIR_ENV`].

use std::fs;
use std::path::{Path, PathBuf};

use lineup_core::catalog::UnitCatalog;
use lineup_core::doctrine::DoctrineTable;
use lineup_core::engine::RecommendationEngine;
use lineup_core::error::LineupError;
use thiserror::Error;

/// Environment variable naming a data directory.
pub const DATA_DIR_ENV: &str = "LINEUP_DATA_DIR";

/// Catalog file name inside a data directory.
pub const CATALOG_FILE: &str = "unit_catalog.ron";

/// Doctrine file name inside a data directory.
pub const DOCTRINES_FILE: &str = "doctrines.ron";

/// Errors raised while loading data from disk.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// Directory not found.
    #[error("Data directory not found: {0}")]
    DirectoryNotFound(String),
    /// IO error.
    #[error("IO error reading {0}: {1}")]
    IoError(String, String),
    /// Data parsed but was rejected.
    #[error(transparent)]
    Data(#[from] LineupError),
}

/// Directory to load from: the explicit one, else [`DATA_DIR_ENV`] if set.
#[must_use]
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

fn read_file(path: &Path) -> Result<String, DataLoadError> {
    fs::read_to_string(path)
        .map_err(|e| DataLoadError::IoError(path.display().to_string(), e.to_string()))
}

/// Load the catalog and doctrine table from a directory.
pub fn load_engine_from_dir(dir: &Path) -> Result<RecommendationEngine, DataLoadError> {
    if !dir.is_dir() {
        return Err(DataLoadError::DirectoryNotFound(dir.display().to_string()));
    }

    let catalog_path = dir.join(CATALOG_FILE);
    let doctrines_path = dir.join(DOCTRINES_FILE);

    let catalog = UnitCatalog::from_ron_str(
        &read_file(&catalog_path)?,
        &catalog_path.display().to_string(),
    )?;
    let doctrines = DoctrineTable::from_ron_str(
        &read_file(&doctrines_path)?,
        &doctrines_path.display().to_string(),
    )?;

    tracing::info!(
        "Loaded {} units and doctrine table from {}",
        catalog.len(),
        dir.display()
    );
    Ok(RecommendationEngine::new(catalog, doctrines))
}

/// Load from `dir` when given, otherwise use the embedded data.
pub fn load_engine(dir: Option<&Path>) -> Result<RecommendationEngine, DataLoadError> {
    match dir {
        Some(dir) => load_engine_from_dir(dir),
        None => {
            tracing::debug!("Using embedded catalog and doctrines");
            Ok(RecommendationEngine::builtin()?)
        }
    }
}
