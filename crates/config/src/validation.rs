//! Configuration validation
//!
//! Validates config consistency at startup:
//! - At least one origin, each with intercept prefixes
//! - Bucket identities are unique across origins
//! - Directory prefixes are unique and not shadowed by earlier rules
//! - Referenced interceptors exist

use crate::error::{ConfigError, Result};
use crate::{is_known_interceptor, Config};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_origins(config)?;
    validate_directories(config)?;
    Ok(())
}

/// Validate origin definitions
fn validate_origins(config: &Config) -> Result<()> {
    if config.origins.is_empty() {
        return Err(ConfigError::NoOrigins);
    }

    let mut buckets: Vec<&str> = Vec::new();
    for origin in &config.origins {
        if origin.intercept_prefixes.is_empty() {
            return Err(ConfigError::EmptyInterceptPrefixes {
                stage: origin.stage.clone(),
            });
        }

        let bucket = origin.bucket();
        if buckets.contains(&bucket) {
            return Err(ConfigError::duplicate_bucket(bucket));
        }
        buckets.push(bucket);
    }

    Ok(())
}

/// Validate directory rules
///
/// Rules resolve first-match-wins in file order, so an earlier prefix that
/// is a proper prefix of a later one makes the later rule unreachable.
fn validate_directories(config: &Config) -> Result<()> {
    for (i, rule) in config.directories.iter().enumerate() {
        for name in &rule.interceptors {
            if !is_known_interceptor(name) {
                return Err(ConfigError::unknown_interceptor(&rule.prefix, name));
            }
        }

        for later in &config.directories[i + 1..] {
            if later.prefix == rule.prefix {
                return Err(ConfigError::DuplicatePrefix {
                    prefix: rule.prefix.clone(),
                });
            }
            if later.prefix.starts_with(&rule.prefix) {
                return Err(ConfigError::shadowed_prefix(&rule.prefix, &later.prefix));
            }
        }
    }

    Ok(())
}
