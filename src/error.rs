//! Error types for the correction pipeline.
//!
//! Only [`PipelineError`] ever reaches a caller of the pipeline. A
//! [`StageError`] is recovered inside the orchestrator and only shows up
//! in the logs.

use thiserror::Error;

/// Errors surfaced to callers of the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The raw OCR text was not a string.
    #[error("raw OCR text must be a string, found {found}")]
    InputType { found: &'static str },

    #[error("confidence must be a finite number, got {0}")]
    InvalidConfidence(f64),

    /// The external OCR engine failed on a page.
    #[error("OCR engine failed on page {page}: {source}")]
    Engine {
        page: u32,
        #[source]
        source: RecognizerError,
    },
}

/// Failure of a single correction stage.
#[derive(Debug, Clone, Error)]
#[error("stage {stage} failed: {message}")]
pub struct StageError {
    pub stage: &'static str,
    pub message: String,
}

impl StageError {
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Errors reported by a [`crate::recognizer::TextRecognizer`].
#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognizer not available: {0}")]
    Unavailable(String),

    #[error("recognition failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading a [`crate::config::PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{key} must be within [0, 1], got {value}")]
    OutOfRange { key: &'static str, value: f64 },
}
