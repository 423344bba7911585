//! Edge error taxonomy
//!
//! Two layers: [`SetupError`] covers handler construction (bad config, bad
//! registry), and [`EdgeError`] covers everything that can go wrong while
//! serving one request. Request errors never propagate out of the handler;
//! each variant maps to exactly one response shape.

use thiserror::Error;

use pictor_config::ConfigError;
use pictor_directive::DirectiveError;
use pictor_imaging::ImagingError;
use pictor_pipeline::CompileError;
use pictor_routing::RoutingError;
use pictor_storage::StoreError;

/// Result type for request handling
pub type Result<T> = std::result::Result<T, EdgeError>;

/// Errors raised while constructing the handler
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration failed to load or validate
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A directory rule references an unknown interceptor
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// The operation registry is internally inconsistent
    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

/// Errors raised while serving one request
#[derive(Debug, Error)]
pub enum EdgeError {
    /// The request's origin domain maps to no configured bucket
    #[error("invalid bucket '{bucket}'")]
    InvalidBucket {
        /// The derived bucket identity
        bucket: String,
    },

    /// The requested extension is not a supported image format
    #[error("unsupported image type '{extension}'")]
    UnsupportedFormat {
        /// The lowercased extension
        extension: String,
    },

    /// No directory rule matched the request path
    #[error("no route for path '{path}'")]
    NoRoute {
        /// The request path
        path: String,
    },

    /// The directive segment failed to compile
    #[error(transparent)]
    InvalidDirective(#[from] CompileError),

    /// The original asset does not exist in the origin store
    #[error("source object missing at '{key}'")]
    SourceNotFound {
        /// The storage key probed first
        key: String,
    },

    /// The adaptive encode loop hit its attempt ceiling without producing
    /// a payload under the size limit
    #[error("encode retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Attempts consumed
        attempts: u32,
    },

    /// Any failure with no dedicated response shape (codec faults, store
    /// backend faults)
    #[error("{message}")]
    Unexpected {
        /// Human-readable description
        message: String,
    },
}

impl EdgeError {
    /// Response status code for this error
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidBucket { .. } | Self::UnsupportedFormat { .. } => 403,
            Self::NoRoute { .. }
            | Self::InvalidDirective(_)
            | Self::SourceNotFound { .. }
            | Self::RetriesExhausted { .. }
            | Self::Unexpected { .. } => 404,
        }
    }

    /// Status reason phrase for this error
    pub fn status_description(&self) -> &'static str {
        match self.status() {
            403 => "Forbidden",
            _ => "Not Found",
        }
    }

    /// Response body text for this error
    pub fn body(&self) -> String {
        match self {
            Self::InvalidBucket { .. } => "Invalid bucket".to_string(),
            Self::UnsupportedFormat { .. } => "Unsupported image type".to_string(),
            Self::NoRoute { .. } | Self::InvalidDirective(_) => "Invalid transformation".to_string(),
            Self::SourceNotFound { .. } => "The image does not exist.".to_string(),
            Self::RetriesExhausted { .. } | Self::Unexpected { .. } => self.to_string(),
        }
    }
}

impl From<ImagingError> for EdgeError {
    fn from(err: ImagingError) -> Self {
        Self::Unexpected {
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for EdgeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key, .. } => Self::SourceNotFound { key },
            StoreError::Backend { message } => Self::Unexpected { message },
        }
    }
}
