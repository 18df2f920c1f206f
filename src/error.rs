use std::path::PathBuf;

use thiserror::Error;

use crate::transform::TransformError;

/// Error type for corpus loading and analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Dataset missing, unreadable or malformed
    #[error("Failed to load dataset {path}: {reason}")]
    DataLoad { path: PathBuf, reason: String },

    /// Statistics requested on a corpus without messages
    #[error("Corpus is empty, statistics need at least one message")]
    EmptyCorpus,

    /// A text transform provider failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// I/O error while exporting
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        AnalysisError::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
