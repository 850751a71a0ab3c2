//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`PipelineError`] as the error type.
//! No error is retried internally: inference is deterministic, so repeating a failed
//! call with the same input cannot succeed.

use std::time::Duration;
use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust
/// use emoticart::error::PipelineError;
///
/// fn status_for(e: &PipelineError) -> u16 {
///     match e {
///         PipelineError::InputValidation(_) | PipelineError::Schema(_) => 400,
///         PipelineError::Inference { .. } => 500,
///         PipelineError::DeadlineExceeded { .. } => 504,
///         _ => 500,
///     }
/// }
///
/// assert_eq!(status_for(&PipelineError::Schema("no text column".into())), 400);
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Missing, empty or wrongly typed input. Fix the request.
    #[error("{0}")]
    InputValidation(String),

    /// The tokenizer rejected the content of a chunk. Check input text.
    #[error("{0}")]
    Tokenization(String),

    /// The model failed on a chunk. The whole request fails.
    #[error("Inference failed on chunk {chunk}: {message}")]
    Inference {
        /// Zero-based index of the failing chunk.
        chunk: usize,
        /// Underlying failure.
        message: String,
    },

    /// Bulk input is missing a required column.
    #[error("{0}")]
    Schema(String),

    /// The per-request time budget ran out before `chunk` could start.
    #[error("Deadline exceeded after {elapsed:?} before chunk {chunk}")]
    DeadlineExceeded {
        /// Zero-based index of the first chunk that was not processed.
        chunk: usize,
        /// Time spent so far.
        elapsed: Duration,
    },

    /// Malformed CSV payload.
    #[error("{0}")]
    Csv(String),

    /// Network or download failure.
    #[error("{0}")]
    Download(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl PipelineError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InputValidation(_)
                | PipelineError::Tokenization(_)
                | PipelineError::Schema(_)
                | PipelineError::Csv(_)
        )
    }
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(value: csv::Error) -> Self {
        PipelineError::Csv(format!("Malformed CSV: {}", value))
    }
}
