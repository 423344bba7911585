//! Pictor - Pipeline
//!
//! Compiles a matched route and request path into a [`TransformChain`]: the
//! ordered, validated sequence of directives plus the storage key of the
//! underlying original asset.
//!
//! # Design
//!
//! - **All-or-nothing**: one invalid token anywhere in the directive
//!   segment fails the whole compile; a chain is never partially applied
//! - **`original` pass-through**: a directive segment that is exactly
//!   `original` compiles to an empty chain
//! - **Strict order**: `TransformChain::apply` runs directives in path
//!   order, no reordering or optimization
//!
//! # Example
//!
//! ```
//! use pictor_imaging::ImageFormat;
//! use pictor_pipeline::compile;
//! use pictor_routing::{InterceptorRegistry, RouteMatch, RouteRule};
//!
//! let registry = InterceptorRegistry::builtin();
//! let rule = RouteRule::compile(
//!     "/media/".to_string(),
//!     "media".to_string(),
//!     registry.resolve(&["dimension_shorthand".into(), "quality_shorthand".into()]).unwrap(),
//! )
//! .unwrap();
//! let matched = RouteMatch { matched_prefix: rule.prefix.clone(), rule };
//!
//! let chain = compile(&matched, "/media/w:100~q:80/photo.jpg", ImageFormat::Jpg).unwrap();
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain.storage_key, "/media/original/photo.jpg");
//! ```

mod chain;
mod error;

pub use chain::{compile, TransformChain};
pub use error::{CompileError, Result};
