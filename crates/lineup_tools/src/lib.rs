//! # Lineup Tools
//!
//! Command-line tooling around the recommendation engine:
//! - Scenario files (RON or JSON) describing a roster and a target
//! - Catalog and doctrine overrides from a data directory
//! - Text and JSON reports
//! - Data validators
//! - Parallel batch evaluation of scenario directories

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod data;
pub mod report;
pub mod scenario;
pub mod validate;
