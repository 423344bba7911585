//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while building routing state
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A directory rule references an interceptor the registry does not hold
    #[error("unknown interceptor '{name}'")]
    UnknownInterceptor {
        /// The unknown name
        name: String,
    },

    /// A joined prefix failed to compile into a pattern
    #[error("invalid route prefix '{prefix}': {source}")]
    BadPrefix {
        /// The offending prefix
        prefix: String,
        /// Compile failure
        #[source]
        source: regex::Error,
    },
}

impl RoutingError {
    /// Create an UnknownInterceptor error
    pub fn unknown_interceptor(name: impl Into<String>) -> Self {
        Self::UnknownInterceptor { name: name.into() }
    }
}
