//! Directory rule configuration
//!
//! Each rule binds a path prefix to a namespace and an ordered list of
//! interceptor names. Interceptors are small directive-text rewrites; the
//! routing crate owns their implementations, config only references them by
//! name so validation can catch typos at startup.

use serde::Deserialize;

/// Interceptor names the routing layer implements
pub const KNOWN_INTERCEPTORS: &[&str] = &["dimension_shorthand", "quality_shorthand"];

/// Check whether an interceptor name is implemented
pub fn is_known_interceptor(name: &str) -> bool {
    KNOWN_INTERCEPTORS.contains(&name)
}

/// One directory rule
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryRuleConfig {
    /// Path prefix under every intercept prefix, e.g. `/media/`
    pub prefix: String,

    /// Namespace label for this directory (diagnostics and metrics)
    pub namespace: String,

    /// Interceptor names applied to each directive token, in order
    #[serde(default)]
    pub interceptors: Vec<String>,
}
