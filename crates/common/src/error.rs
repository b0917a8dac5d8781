//! Error types shared across Handsign crates.

use std::path::PathBuf;

/// Top-level error type for Handsign operations.
///
/// The first four variants are the per-frame pipeline failures. The
/// coordinator treats every one of them as "no result this frame".
#[derive(Debug, thiserror::Error)]
pub enum HandsignError {
    #[error("Degenerate input: bone {bone} has zero or non-finite length")]
    DegenerateInput { bone: usize },

    #[error("Numeric range error: angle pair {pair} has cosine {cosine} outside [-1, 1]")]
    NumericRange { pair: usize, cosine: f64 },

    #[error("Model load error ({path}): {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Landmark source error: {message}")]
    Source { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using HandsignError.
pub type HandsignResult<T> = Result<T, HandsignError>;

impl HandsignError {
    pub fn model_load(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn shape_mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context,
            expected,
            actual,
        }
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether this error only invalidates the current frame.
    ///
    /// Frame-level errors are swallowed by the pipeline coordinator; the
    /// rest end the run.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            Self::DegenerateInput { .. }
                | Self::NumericRange { .. }
                | Self::ModelLoad { .. }
                | Self::ShapeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_both_sizes() {
        let err = HandsignError::shape_mismatch("classifier input", 15, 14);
        let text = err.to_string();
        assert!(text.contains("classifier input"));
        assert!(text.contains("15"));
        assert!(text.contains("14"));
    }

    #[test]
    fn core_errors_are_frame_local() {
        assert!(HandsignError::DegenerateInput { bone: 3 }.is_frame_local());
        assert!(HandsignError::NumericRange {
            pair: 0,
            cosine: f64::NAN
        }
        .is_frame_local());
        assert!(HandsignError::model_load("model.json", "corrupt").is_frame_local());
        assert!(!HandsignError::source("stream closed").is_frame_local());
        assert!(!HandsignError::config("bad value").is_frame_local());
    }
}
