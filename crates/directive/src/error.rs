//! Directive error types

use pictor_imaging::ImageFormat;
use thiserror::Error;

/// Result type for directive operations
pub type Result<T> = std::result::Result<T, DirectiveError>;

/// Errors from parsing or validating one directive token
///
/// Any of these invalidates the whole transform chain the token belongs to;
/// there is no partial application.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DirectiveError {
    /// Token does not start with any registered operation name
    #[error("no operation matches token '{token}'")]
    UnknownOperation {
        /// The unmatched token
        token: String,
    },

    /// Operation is restricted to source formats the request is not in
    #[error("operation '{op}' does not apply to {format:?} sources")]
    FormatRestricted {
        /// Operation name
        op: &'static str,
        /// The source format that was rejected
        format: ImageFormat,
    },

    /// More `key:value` pairs supplied than the operation's schema holds
    ///
    /// Raised both before default-filling (too many pairs outright) and
    /// after (unknown keys inflating the resolved set).
    #[error("operation '{op}' given {supplied} parameters, schema has {max}")]
    TooManyParams {
        /// Operation name
        op: &'static str,
        /// Number of parameters after the failing check
        supplied: usize,
        /// Schema parameter count
        max: usize,
    },

    /// A parameter value failed its type validator
    #[error("operation '{op}' parameter '{key}' rejected value '{value}'")]
    InvalidValue {
        /// Operation name
        op: &'static str,
        /// Schema short key
        key: &'static str,
        /// The offending value, as supplied
        value: String,
    },

    /// Two registry entries are prefix-ambiguous (startup check)
    #[error("ambiguous registry: '{shorter}' is a prefix of '{longer}'")]
    AmbiguousRegistry {
        /// The shorter operation name
        shorter: &'static str,
        /// The name it would shadow
        longer: &'static str,
    },
}
