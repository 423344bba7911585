//! Route resolver
//!
//! Owns the per-bucket intercept index. Indexes are deterministic functions
//! of static configuration, so concurrent first requests for the same bucket
//! may race to build one; whichever build lands last wins and all of them
//! are identical.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use pictor_config::{Config, DirectoryRuleConfig, OriginConfig};

use crate::rule::join_prefixes;
use crate::{Interceptor, InterceptorRegistry, Result, RouteRule};

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

/// A resolved directory rule, before joining with intercept prefixes
#[derive(Debug, Clone)]
struct Directory {
    prefix: String,
    namespace: String,
    interceptors: Vec<Interceptor>,
}

/// Result of resolving a request path
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched rule
    pub rule: RouteRule,

    /// The full prefix that matched (identical to `rule.prefix`; kept
    /// separate so callers do not reach into the rule for path surgery)
    pub matched_prefix: String,
}

/// Maps origin buckets and request paths to directory rules
pub struct RouteResolver {
    /// Directory rules in configuration order, interceptors pre-resolved
    directories: Vec<Directory>,

    /// Per-bucket compiled index, built lazily and never evicted
    index: RwLock<HashMap<String, Arc<Vec<RouteRule>>>>,
}

impl RouteResolver {
    /// Build a resolver from configuration
    ///
    /// Interceptor names are resolved up front so a bad reference fails at
    /// startup rather than on the first matching request.
    pub fn new(config: &Config, interceptors: &InterceptorRegistry) -> Result<Self> {
        let directories = config
            .directories
            .iter()
            .map(|rule: &DirectoryRuleConfig| {
                Ok(Directory {
                    prefix: rule.prefix.clone(),
                    namespace: rule.namespace.clone(),
                    interceptors: interceptors.resolve(&rule.interceptors)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            directories,
            index: RwLock::new(HashMap::new()),
        })
    }

    /// Resolve a request path against an origin's intercept index
    ///
    /// First match wins, in index build order (intercept prefixes outer,
    /// directory rules inner, both in configuration order).
    pub fn resolve(&self, origin: &OriginConfig, path: &str) -> Option<RouteMatch> {
        let index = self.index_for(origin);
        index.iter().find(|rule| rule.matches(path)).map(|rule| {
            RouteMatch {
                rule: rule.clone(),
                matched_prefix: rule.prefix.clone(),
            }
        })
    }

    /// Number of entries in a bucket's index (diagnostics)
    pub fn index_len(&self, origin: &OriginConfig) -> usize {
        self.index_for(origin).len()
    }

    /// Fetch or build the index for an origin's bucket
    fn index_for(&self, origin: &OriginConfig) -> Arc<Vec<RouteRule>> {
        let bucket = origin.bucket();
        if let Some(index) = self.index.read().unwrap().get(bucket) {
            return Arc::clone(index);
        }

        // Built outside the lock: duplicate concurrent builds are tolerated,
        // the content is deterministic and last write wins.
        let index = Arc::new(self.build_index(origin));
        debug!(
            bucket = bucket,
            entries = index.len(),
            "built intercept index"
        );
        self.index
            .write()
            .unwrap()
            .insert(bucket.to_string(), Arc::clone(&index));
        index
    }

    fn build_index(&self, origin: &OriginConfig) -> Vec<RouteRule> {
        let mut rules = Vec::with_capacity(origin.intercept_prefixes.len() * self.directories.len());
        for intercept in &origin.intercept_prefixes {
            for directory in &self.directories {
                let prefix = join_prefixes(intercept, &directory.prefix);
                match RouteRule::compile(
                    prefix,
                    directory.namespace.clone(),
                    directory.interceptors.clone(),
                ) {
                    Ok(rule) => rules.push(rule),
                    // escaped literal prefixes always compile; tracked for
                    // completeness rather than expected at runtime
                    Err(err) => debug!(error = %err, "skipped uncompilable prefix"),
                }
            }
        }
        rules
    }
}
