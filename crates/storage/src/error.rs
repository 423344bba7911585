//! Storage error types

use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the origin object store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object at the requested key
    #[error("no object at '{bucket}/{key}'")]
    NotFound {
        /// Bucket that was queried
        bucket: String,
        /// Key that was queried
        key: String,
    },

    /// The store itself failed (transport, auth, service error)
    #[error("storage backend failure: {message}")]
    Backend {
        /// Backend-reported failure description
        message: String,
    },
}

impl StoreError {
    /// Create a NotFound error
    pub fn not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Whether this is a missing-object error (as opposed to a store fault)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
