use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// PipelineError – everything that can abort a run
// ---------------------------------------------------------------------------

/// Errors raised by the alignment pipeline and its file collaborators.
///
/// Every variant is fatal to the run it occurs in: the pipeline performs no
/// retry or default substitution, and a failed run writes zero output files.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Sample count is zero or exceeds the valid data available in a series.
    #[error("'{label}': sample count {requested} not in 1..={available}")]
    InvalidSampleCount {
        label: String,
        requested: usize,
        available: usize,
    },

    /// Two series handed to the scorer disagree in length (or are empty).
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A reference file lacks the expected value column.
    #[error("reference file {path:?} has no '{column}' column")]
    MissingReferenceColumn { column: String, path: PathBuf },

    /// No chart records found, or a chart carries an unusable title/series.
    #[error("malformed chart export: {0}")]
    MalformedPresentation(String),

    /// A reference column cell is neither blank nor a number.
    #[error("reference '{label}': {detail}")]
    MalformedReference { label: String, detail: String },

    /// A second run was submitted while one is still executing.
    #[error("a run is already in progress")]
    RunInProgress,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
