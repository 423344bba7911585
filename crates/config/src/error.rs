//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No origins configured - the edge would reject every request
    #[error("no origins configured")]
    NoOrigins,

    /// Two origins resolve to the same bucket identity
    #[error("bucket '{bucket}' is claimed by multiple origins")]
    DuplicateBucket {
        /// The conflicting bucket identity
        bucket: String,
    },

    /// An origin intercepts no prefixes
    #[error("origin '{stage}' has no intercept prefixes")]
    EmptyInterceptPrefixes {
        /// Stage of the offending origin
        stage: String,
    },

    /// Two directory rules share a prefix
    #[error("duplicate directory prefix '{prefix}'")]
    DuplicatePrefix {
        /// The duplicated prefix
        prefix: String,
    },

    /// An earlier directory prefix shadows a later, more specific one
    ///
    /// Resolution is first-match-wins in file order, so the later rule
    /// could never match.
    #[error("directory prefix '{earlier}' shadows later prefix '{later}'; list the more specific prefix first")]
    ShadowedPrefix {
        /// The earlier, broader prefix
        earlier: String,
        /// The later prefix it shadows
        later: String,
    },

    /// A directory rule references an interceptor that does not exist
    #[error("directory '{prefix}' references unknown interceptor '{name}'")]
    UnknownInterceptor {
        /// Prefix of the offending rule
        prefix: String,
        /// The unknown interceptor name
        name: String,
    },
}

impl ConfigError {
    /// Create a DuplicateBucket error
    pub fn duplicate_bucket(bucket: impl Into<String>) -> Self {
        Self::DuplicateBucket {
            bucket: bucket.into(),
        }
    }

    /// Create a ShadowedPrefix error
    pub fn shadowed_prefix(earlier: impl Into<String>, later: impl Into<String>) -> Self {
        Self::ShadowedPrefix {
            earlier: earlier.into(),
            later: later.into(),
        }
    }

    /// Create an UnknownInterceptor error
    pub fn unknown_interceptor(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownInterceptor {
            prefix: prefix.into(),
            name: name.into(),
        }
    }
}
