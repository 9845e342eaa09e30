//! Error types for TaskRank
//!
//! Centralized error handling using thiserror.

use serde::Serialize;
use thiserror::Error;

/// All error types that can occur while ranking a batch
#[derive(Debug, Error)]
pub enum TaskRankError {
    /// The input document was not a JSON array
    #[error("Expected a JSON array (list) of tasks.")]
    NotABatch,

    /// A due date string could not be parsed as YYYY-MM-DD
    #[error("Invalid date for task '{title}': {value}. Use YYYY-MM-DD.")]
    InvalidDate { title: String, value: String },

    /// A batch element was not a JSON object
    #[error("Task at index {index} is not an object")]
    MalformedTask { index: usize },

    /// Configuration rejected during validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskRankError {
    /// Returns true if the failure was caused by the caller's data
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TaskRankError::NotABatch | TaskRankError::InvalidDate { .. })
    }

    /// Build the failure payload reported back to the caller
    pub fn to_body(&self) -> ErrorBody {
        match self {
            TaskRankError::NotABatch => ErrorBody {
                error: self.to_string(),
                detail: None,
            },
            TaskRankError::InvalidDate { .. } => ErrorBody {
                error: "Invalid input data".to_string(),
                detail: Some(self.to_string()),
            },
            _ => ErrorBody {
                error: "Failed to process tasks".to_string(),
                detail: Some(self.to_string()),
            },
        }
    }
}

/// Machine-readable failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result type alias for TaskRank operations
pub type Result<T> = std::result::Result<T, TaskRankError>;
