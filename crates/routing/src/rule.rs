//! Route rules and interceptors
//!
//! A [`RouteRule`] binds one full path prefix to a namespace and an ordered
//! list of interceptors. Interceptors are pure text rewrites applied to each
//! directive token before parsing - they exist so URLs can carry shorthand
//! (`w:100`) that expands to full directive text (`resize-w:100`).
//!
//! Interceptor implementations are registered by name; configuration only
//! references names, which keeps the rewrite code in one place and lets
//! config validation catch typos at startup.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::{Result, RoutingError};

#[cfg(test)]
#[path = "rule_test.rs"]
mod tests;

/// A directive-token rewrite function
type RewriteFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A named, pure directive-token rewrite
#[derive(Clone)]
pub struct Interceptor {
    name: &'static str,
    rewrite: RewriteFn,
}

impl Interceptor {
    /// Registered name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rewrite one directive token
    pub fn rewrite(&self, token: &str) -> String {
        (self.rewrite)(token)
    }
}

impl std::fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptor").field("name", &self.name).finish()
    }
}

/// Registry of interceptor implementations, keyed by name
pub struct InterceptorRegistry {
    interceptors: HashMap<&'static str, Interceptor>,
}

impl InterceptorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            interceptors: HashMap::new(),
        }
    }

    /// Registry pre-loaded with the built-in shorthands
    ///
    /// - `dimension_shorthand`: `w:`/`h:`-leading tokens become `resize-` directives
    /// - `quality_shorthand`: `q:`-leading tokens become `jpg-` directives
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("dimension_shorthand", |token| {
            if token.starts_with("w:") || token.starts_with("h:") {
                format!("resize-{token}")
            } else {
                token.to_string()
            }
        });
        registry.register("quality_shorthand", |token| {
            if token.starts_with("q:") {
                format!("jpg-{token}")
            } else {
                token.to_string()
            }
        });
        registry
    }

    /// Register an interceptor
    ///
    /// # Panics
    /// Panics if the name is already taken - interceptor sets are assembled
    /// once at startup, a collision is a programming error.
    pub fn register<F>(&mut self, name: &'static str, rewrite: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        if self.interceptors.contains_key(name) {
            panic!("interceptor '{name}' already registered");
        }
        self.interceptors.insert(
            name,
            Interceptor {
                name,
                rewrite: Arc::new(rewrite),
            },
        );
    }

    /// Look up one interceptor by name
    pub fn get(&self, name: &str) -> Option<Interceptor> {
        self.interceptors.get(name).cloned()
    }

    /// Resolve a list of configured names into interceptors, preserving order
    ///
    /// # Errors
    /// Returns `RoutingError::UnknownInterceptor` for any missing name.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Interceptor>> {
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| RoutingError::unknown_interceptor(name))
            })
            .collect()
    }
}

impl Default for InterceptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One compiled intercept-index entry
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Namespace label of the directory rule
    pub namespace: String,

    /// Interceptors applied to each directive token, in order
    pub interceptors: Vec<Interceptor>,

    /// The joined full prefix this rule matches
    pub prefix: String,

    /// Compiled prefix pattern (anchored at the start only)
    pattern: Regex,
}

impl RouteRule {
    /// Compile a rule for a joined prefix
    pub fn compile(
        prefix: String,
        namespace: String,
        interceptors: Vec<Interceptor>,
    ) -> Result<Self> {
        let pattern =
            Regex::new(&format!("^{}", regex::escape(&prefix))).map_err(|source| {
                RoutingError::BadPrefix {
                    prefix: prefix.clone(),
                    source,
                }
            })?;
        Ok(Self {
            namespace,
            interceptors,
            prefix,
            pattern,
        })
    }

    /// Whether the rule's prefix matches the start of a request path
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Strip the matched prefix from a path
    pub fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.pattern.find(path).map(|m| &path[m.end()..])
    }

    /// Run every interceptor over one token, first to last
    pub fn intercept(&self, token: &str) -> String {
        let mut token = token.to_string();
        for interceptor in &self.interceptors {
            token = interceptor.rewrite(&token);
        }
        token
    }
}

/// Join an intercept prefix and a directory prefix into one full prefix
///
/// Plain concatenation with the boundary slash collapsed; no path
/// resolution.
pub(crate) fn join_prefixes(intercept: &str, directory: &str) -> String {
    let left = intercept.trim_end_matches('/');
    let right = directory.trim_start_matches('/');
    format!("{left}/{right}")
}
