//! Error types for review runs.

use layered_document::ParseError;
use thiserror::Error;

use crate::stage::StageKind;

/// Failure inside one processing stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A stage tried to overwrite or reorder a result it does not own.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

/// Errors surfaced to the caller of a review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Missing or unusable input; the pipeline did not start.
    #[error("input error: {0}")]
    Input(String),

    /// A stage with a fatal failure policy failed.
    #[error("{stage} stage failed: {message}")]
    StageFailed { stage: StageKind, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid run state: {0}")]
    InvalidState(String),
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;
