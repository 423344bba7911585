//! Pictor - Directive
//!
//! Grammar and validator for the `~`-delimited directive segment of a
//! request path. Each token names one operation from a fixed registry plus
//! inline `key:value` parameters:
//!
//! ```text
//! resize-w:200,h:100,f:cover
//! ```
//!
//! # Design
//!
//! - **Fixed registry**: the operation catalog is an ordered static table;
//!   adding an operation means adding one [`OperationSpec`], nothing else
//! - **All-or-nothing**: a token either resolves to a fully-validated
//!   [`ParsedDirective`] (every schema key present, supplied or default) or
//!   the parse fails - no partial results
//! - **Ordered prefix match**: a token matches the first registry entry
//!   whose name it starts with; [`verify_registry`] rejects catalogs where
//!   one name is a proper prefix of another, so registration order can
//!   never silently change which operation wins
//!
//! # Example
//!
//! ```
//! use pictor_directive::parse_token;
//! use pictor_imaging::ImageFormat;
//!
//! let directive = parse_token("resize-w:200,h:100", ImageFormat::Jpg).unwrap();
//! assert_eq!(directive.operation, "resize");
//! assert_eq!(directive.canonical_text(), "resize-h:100,w:200,f:cover,p:center,b:000000,we:false");
//! ```

mod error;
mod parse;
mod registry;
mod spec;
mod value;

pub use error::{DirectiveError, Result};
pub use parse::{parse_token, ParsedDirective};
pub use registry::{lookup, match_prefix, operations, verify_registry};
pub use spec::{OperationSpec, ParamSpec, ResolvedParams};
pub use value::{ParamKind, ParamValue};
