//! Operation specifications
//!
//! An [`OperationSpec`] is one registry entry: the operation name, its
//! ordered parameter schemas, an optional source-format restriction, and the
//! process function that translates resolved parameters into collaborator
//! calls.

use std::collections::BTreeMap;

use pictor_imaging::{ImageFormat, ImagePipeline};

use crate::{ParamKind, ParamValue};

/// Fully-resolved parameter mapping, keyed by schema short key
///
/// Invariant: the key set equals the operation's schema key set exactly.
pub type ResolvedParams = BTreeMap<&'static str, ParamValue>;

/// Translates resolved parameters into one (or zero) collaborator calls
pub type ProcessFn =
    fn(&ResolvedParams, &mut dyn ImagePipeline) -> pictor_imaging::Result<()>;

/// Schema for one parameter of an operation
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Short key used in directive text (`w`, `bc`, ...)
    pub key: &'static str,

    /// Semantic name passed to the collaborator (`width`, `background`, ...)
    pub name: &'static str,

    /// Value kind, carrying the validator
    pub kind: ParamKind,

    /// Default used when the directive does not supply the key
    pub default: ParamValue,
}

impl ParamSpec {
    /// Build a parameter schema entry
    pub fn new(
        key: &'static str,
        name: &'static str,
        kind: ParamKind,
        default: ParamValue,
    ) -> Self {
        Self {
            key,
            name,
            kind,
            default,
        }
    }
}

/// One registry entry
pub struct OperationSpec {
    /// Unique operation name; directive tokens start with it
    pub name: &'static str,

    /// Short human description
    pub desc: &'static str,

    /// Ordered parameter schemas
    pub params: Vec<ParamSpec>,

    /// When set, the operation only applies to these source formats; a
    /// directive using it against any other source invalidates the whole
    /// chain (rejection, not skip)
    pub restrict_formats: Option<&'static [ImageFormat]>,

    /// Collaborator translation
    pub process: ProcessFn,
}

impl OperationSpec {
    /// Look up a parameter schema by short key
    pub fn param(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.key == key)
    }

    /// Whether this operation applies to the given source format
    pub fn applies_to(&self, format: ImageFormat) -> bool {
        match self.restrict_formats {
            Some(allowed) => allowed.contains(&format),
            None => true,
        }
    }
}

// Accessors for process functions. Parse guarantees every schema key is
// present and typed, so these only default when a process function asks for
// a key outside its own schema.

/// Numeric parameter by short key
pub(crate) fn num(params: &ResolvedParams, key: &str) -> f64 {
    params.get(key).and_then(ParamValue::as_f64).unwrap_or(0.0)
}

/// String parameter by short key
pub(crate) fn text<'a>(params: &'a ResolvedParams, key: &str) -> &'a str {
    params.get(key).and_then(ParamValue::as_str).unwrap_or("")
}

/// Boolean parameter by short key
pub(crate) fn flag(params: &ResolvedParams, key: &str) -> bool {
    params
        .get(key)
        .and_then(ParamValue::as_bool)
        .unwrap_or(false)
}
