//! Knowledge base error types.

use std::path::PathBuf;

use thiserror::Error;

pub type KnowledgeBaseResult<T> = Result<T, KnowledgeBaseError>;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid knowledge base format: {0}")]
    Format(String),
}

impl KnowledgeBaseError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Whether the file is absent rather than unreadable or malformed.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
