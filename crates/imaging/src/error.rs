//! Imaging error types

use thiserror::Error;

/// Result type for imaging operations
pub type Result<T> = std::result::Result<T, ImagingError>;

/// Errors surfaced by an image-processing engine
#[derive(Debug, Error)]
pub enum ImagingError {
    /// The engine does not implement the named primitive operation
    #[error("unknown image operation '{op}'")]
    UnknownOperation {
        /// Requested operation name
        op: String,
    },

    /// An operation argument was missing or had the wrong type
    #[error("invalid argument for operation '{op}': {reason}")]
    InvalidArgument {
        /// Operation the argument belongs to
        op: String,
        /// What was wrong with it
        reason: String,
    },

    /// The engine failed to decode or encode the image
    #[error("codec failure: {message}")]
    Codec {
        /// Engine-reported failure description
        message: String,
    },
}

impl ImagingError {
    /// Create an UnknownOperation error
    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self::UnknownOperation { op: op.into() }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            op: op.into(),
            reason: reason.into(),
        }
    }

    /// Create a Codec error
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }
}
