//! Parameter values and type validators
//!
//! One validator per value kind, matching the schema contract: number
//! (numeric-coercible), string (anything), color (6 or 8 lowercase hex
//! digits), enum (membership), boolean (literals or `"true"/"false"/"0"/"1"`).

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

/// A resolved parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Numeric value (most knobs are integers; a few are fractional)
    Num(f64),
    /// String value
    Str(String),
    /// Boolean value
    Bool(bool),
}

impl ParamValue {
    /// Convenience constructor for string values
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// Numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// String value, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean value; accepts the boolean string literals as well, since
    /// canonical text round-trips booleans through strings
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Canonical textual form, as it would appear in a directive token
    pub fn canonical(&self) -> String {
        match self {
            Self::Num(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            Self::Num(n) => format!("{n}"),
            Self::Str(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Value kind of one schema parameter, carrying the validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Numeric-coercible value
    Number,
    /// Free-form string
    Str,
    /// 6- or 8-digit lowercase hex color, no `#`
    Color,
    /// One of a fixed set of strings
    Enum(&'static [&'static str]),
    /// Boolean literal or `"true"/"false"/"0"/"1"`
    Boolean,
}

impl ParamKind {
    /// Validate and coerce a supplied textual value
    ///
    /// Returns `None` when the value fails this kind's validator.
    pub fn coerce(&self, raw: &str) -> Option<ParamValue> {
        match self {
            Self::Number => raw.parse::<f64>().ok().map(ParamValue::Num),
            Self::Str => Some(ParamValue::str(raw)),
            Self::Color => {
                if is_hex_color(raw) {
                    Some(ParamValue::str(raw))
                } else {
                    None
                }
            }
            Self::Enum(allowed) => {
                if allowed.contains(&raw) {
                    Some(ParamValue::str(raw))
                } else {
                    None
                }
            }
            Self::Boolean => match raw {
                "true" | "1" => Some(ParamValue::Bool(true)),
                "false" | "0" => Some(ParamValue::Bool(false)),
                _ => None,
            },
        }
    }

    /// Validate an already-typed value (schema defaults go through this,
    /// same as supplied values go through `coerce`)
    pub fn check(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Self::Number, ParamValue::Num(_)) => true,
            (Self::Str, ParamValue::Str(_)) => true,
            (Self::Color, ParamValue::Str(s)) => is_hex_color(s),
            (Self::Enum(allowed), ParamValue::Str(s)) => allowed.contains(&s.as_str()),
            (Self::Boolean, ParamValue::Bool(_)) => true,
            _ => false,
        }
    }
}

/// 6 or 8 lowercase hex digits, no leading `#`
fn is_hex_color(s: &str) -> bool {
    (s.len() == 6 || s.len() == 8) && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
