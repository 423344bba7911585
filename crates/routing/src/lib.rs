//! Pictor - Routing
//!
//! Maps an origin bucket and request path to a directory rule, and owns the
//! per-bucket intercept index cache.
//!
//! # Design
//!
//! The index for a bucket is the cross product of the origin's intercept
//! prefixes and the configured directory rules, each joined into a full
//! prefix and compiled into a prefix-matching pattern. It is built on the
//! first request for a bucket and cached for the life of the process -
//! configuration is static, so there is no invalidation.
//!
//! Resolution is **first match wins in build order**. Precedence is
//! therefore configuration order; config validation rejects orders where an
//! earlier prefix shadows a later one, so the policy stays explicit rather
//! than accidental.
//!
//! # Example
//!
//! ```
//! use pictor_config::Config;
//! use pictor_routing::{InterceptorRegistry, RouteResolver};
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[[origins]]\n\
//!      stage = \"prod\"\n\
//!      origin = \"s3://assets.s3.amazonaws.com\"\n\
//!      intercept_prefixes = [\"/\"]\n\
//!      \n\
//!      [[directories]]\n\
//!      prefix = \"/media/\"\n\
//!      namespace = \"media\"\n",
//! )
//! .unwrap();
//!
//! let resolver = RouteResolver::new(&config, &InterceptorRegistry::builtin()).unwrap();
//! let origin = config.origin_for_bucket("assets").unwrap();
//! let matched = resolver.resolve(origin, "/media/w:100/photo.jpg").unwrap();
//! assert_eq!(matched.matched_prefix, "/media/");
//! ```

mod error;
mod resolver;
mod rule;

pub use error::{Result, RoutingError};
pub use resolver::{RouteMatch, RouteResolver};
pub use rule::{Interceptor, InterceptorRegistry, RouteRule};
