//! Typed operation arguments
//!
//! Every primitive operation receives an [`OpArgs`] map built by the
//! directive layer. Values are already validated by the time they reach the
//! engine, so accessors here are plain `Option` conveniences for engine
//! implementors.

use std::collections::BTreeMap;

#[cfg(test)]
#[path = "args_test.rs"]
mod tests;

/// Argument map passed to one engine operation, keyed by semantic name
/// (`width`, `background`, ...)
pub type OpArgs = BTreeMap<&'static str, ArgValue>;

/// A single typed operation argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Numeric argument (integers and the handful of fractional knobs)
    Num(f64),
    /// String argument (colors, fit modes, chroma subsampling, ...)
    Str(String),
    /// Boolean argument
    Bool(bool),
}

impl ArgValue {
    /// Numeric value, if this is a `Num`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value truncated to u32, if this is a non-negative `Num`
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Num(n) if *n >= 0.0 => Some(*n as u32),
            _ => None,
        }
    }

    /// Numeric value truncated to i32, if this is a `Num`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Num(n) => Some(*n as i32),
            _ => None,
        }
    }

    /// String value, if this is a `Str`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

impl From<u32> for ArgValue {
    fn from(n: u32) -> Self {
        Self::Num(n as f64)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
