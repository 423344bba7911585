//! Pictor Configuration
//!
//! TOML-based configuration loading with sensible defaults. The config is
//! static for the life of the process: origins, directory rules, log
//! settings, and encode-loop limits are all read once at startup and never
//! mutated.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use pictor_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[[origins]]\n\
//!      stage = \"prod\"\n\
//!      origin = \"s3://assets-prod.s3.amazonaws.com\"\n\
//!      intercept_prefixes = [\"/\"]\n\
//!      \n\
//!      [[directories]]\n\
//!      prefix = \"/media/\"\n\
//!      namespace = \"media\"\n",
//! )
//! .unwrap();
//! assert!(config.is_valid_bucket("assets-prod"));
//! ```
//!
//! # Example Full Config
//!
//! ```toml
//! [log]
//! level = "info"
//! format = "console"
//!
//! [encode]
//! initial_quality = 80
//! quality_step = 10
//! max_payload_bytes = 5242880
//! max_attempts = 8
//!
//! [[origins]]
//! stage = "prod"
//! origin = "s3://assets-prod.s3.amazonaws.com"
//! intercept_prefixes = ["/"]
//!
//! [[directories]]
//! prefix = "/media/"
//! namespace = "media"
//! interceptors = ["dimension_shorthand", "quality_shorthand"]
//! ```

mod directories;
mod encode;
mod error;
mod logging;
mod origins;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use directories::{is_known_interceptor, DirectoryRuleConfig, KNOWN_INTERCEPTORS};
pub use encode::EncodeConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use origins::{bucket_from_domain, OriginConfig};
pub use validation::validate_config;

use serde::Deserialize;

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

/// Main configuration structure
///
/// Directory rules are an ordered list; resolution precedence is their
/// order in the file (first match wins), so more specific prefixes must be
/// listed before the prefixes that would shadow them. `validate_config`
/// rejects orders that break this.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Adaptive encode loop limits
    pub encode: EncodeConfig,

    /// Origin definitions, one per stage
    pub origins: Vec<OriginConfig>,

    /// Ordered directory rules (first match wins)
    pub directories: Vec<DirectoryRuleConfig>,
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = raw.parse()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Look up the origin for a stage name
    pub fn origin_for_stage(&self, stage: &str) -> Option<&OriginConfig> {
        self.origins.iter().find(|o| o.stage == stage)
    }

    /// Look up the origin owning a bucket identity
    pub fn origin_for_bucket(&self, bucket: &str) -> Option<&OriginConfig> {
        self.origins.iter().find(|o| o.bucket() == bucket)
    }

    /// Whether a bucket identity belongs to any configured origin
    pub fn is_valid_bucket(&self, bucket: &str) -> bool {
        self.origin_for_bucket(bucket).is_some()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
