//! Error types for the data-loading boundary.
//!
//! The recommendation engine itself never fails; errors only arise while
//! parsing and validating catalog or doctrine data.

use thiserror::Error;

use crate::doctrine::DoctrineId;

/// Result type alias using [`LineupError`].
pub type Result<T> = std::result::Result<T, LineupError>;

/// Top-level error type for catalog and doctrine loading.
#[derive(Debug, Error)]
pub enum LineupError {
    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or asset name) of the data that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Two catalog records share the same unit key.
    #[error("Duplicate unit key in catalog: {0}")]
    DuplicateUnit(String),

    /// The doctrine table has no entry for a doctrine the selector can pick.
    #[error("Doctrine table has no entry for {0:?}")]
    MissingDoctrine(DoctrineId),

    /// The doctrine table lists the same doctrine twice.
    #[error("Doctrine {0:?} is defined more than once")]
    DuplicateDoctrine(DoctrineId),

    /// Data loaded but failed consistency checks.
    #[error("Data validation failed with {} problem(s): {}", .0.len(), .0.join("; "))]
    ValidationFailed(Vec<String>),
}

impl LineupError {
    /// Build a parse error for the named data source.
    pub(crate) fn parse(path: &str, err: &ron::error::SpannedError) -> Self {
        Self::DataParseError {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
