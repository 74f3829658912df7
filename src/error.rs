//! Error taxonomy for survey ingestion.

use thiserror::Error;

/// Errors raised while turning an uploaded or on-disk CSV into rows.
///
/// An empty result set is deliberately NOT an error: a file can parse
/// cleanly and still contain zero instructor-survey rows, and callers
/// report that as a notice rather than a failure.
#[derive(Debug, Error)]
pub enum RaterError {
    /// The input could not be read as CSV at all.
    #[error("could not parse CSV: {0}")]
    Parse(#[from] csv::Error),

    /// The header row lacks one of the required columns.
    #[error("required column missing from header: {name:?}")]
    MissingColumn { name: String },
}
