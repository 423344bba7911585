//! Pipeline compile error types

use pictor_directive::DirectiveError;
use thiserror::Error;

/// Result type for pipeline compilation
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors from compiling a request path into a transform chain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// The path does not start with the rule's matched prefix
    ///
    /// Route resolution already proved the match, so this only appears when
    /// a caller pairs a rule with some other request's path.
    #[error("path '{path}' does not match prefix '{prefix}'")]
    PrefixMismatch {
        /// The rule's prefix
        prefix: String,
        /// The mismatched path
        path: String,
    },

    /// A directive token failed to parse or validate
    #[error(transparent)]
    Directive(#[from] DirectiveError),
}
