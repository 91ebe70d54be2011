//! Error types for port operations.

/// Backing-store errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store could not serve the request - includes operation name for tracing.
    #[error("Storage unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },

    /// Filesystem failure in a file-backed store.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization of the store's own format failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Create an Unavailable error with operation context.
    pub fn unavailable(operation: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Errors from remote collaborators (advice source, translator).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExternalError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
