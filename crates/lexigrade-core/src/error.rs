//! Error types for Lexigrade

use std::path::PathBuf;

use thiserror::Error;

use crate::level::ParseLevelError;

/// Main error type for Lexigrade operations
#[derive(Debug, Error)]
pub enum LexigradeError {
    /// Error in scoring or flow configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A language resource is missing or unreadable
    #[error("Resource error at {}: {message}", .path.display())]
    Resource { path: PathBuf, message: String },

    /// The linguistic annotator failed to process a text
    #[error("Annotation error: {0}")]
    Annotation(String),

    /// An external generation, review or classification service failed
    #[error("External service error: {0}")]
    Service(String),

    /// Caller supplied an input the pipeline cannot process
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown CEFR level string
    #[error(transparent)]
    Level(#[from] ParseLevelError),

    /// IO failure while reading or writing artifacts
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LexigradeError {
    /// Creates a resource error for the given path.
    pub fn resource(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LexigradeError::Resource {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Lexigrade operations
pub type Result<T> = std::result::Result<T, LexigradeError>;
