//! Directive token parser
//!
//! Turns one path token into a validated [`ParsedDirective`] against the
//! registry. Parsing is pure and all-or-nothing: any unknown key, failed
//! validator, or format restriction rejects the token (and with it, the
//! whole chain it belongs to).

use pictor_imaging::{ImageFormat, ImagePipeline, ImagingError};

use crate::registry::{lookup, match_prefix};
use crate::{DirectiveError, ResolvedParams, Result};

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;

/// One validated directive: operation plus fully-resolved parameters
///
/// The parameter key set equals the operation's schema key set exactly;
/// every value is either supplied-and-validated or the schema default.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDirective {
    /// Registry name of the operation
    pub operation: &'static str,

    /// Resolved parameters, keyed by schema short key
    pub params: ResolvedParams,
}

impl ParsedDirective {
    /// Run this directive's process function against a pipeline handle
    pub fn apply(&self, img: &mut dyn ImagePipeline) -> pictor_imaging::Result<()> {
        match lookup(self.operation) {
            Some(spec) => (spec.process)(&self.params, img),
            None => Err(ImagingError::unknown_operation(self.operation)),
        }
    }

    /// Canonical `name-k:v,...` text with parameters in schema order
    ///
    /// Re-parsing the canonical text yields an equal directive, which is
    /// what makes default-filling idempotent.
    pub fn canonical_text(&self) -> String {
        let Some(spec) = lookup(self.operation) else {
            return self.operation.to_string();
        };
        if spec.params.is_empty() {
            return self.operation.to_string();
        }
        let pairs: Vec<String> = spec
            .params
            .iter()
            .filter_map(|p| {
                self.params
                    .get(p.key)
                    .map(|v| format!("{}:{}", p.key, v.canonical()))
            })
            .collect();
        format!("{}-{}", self.operation, pairs.join(","))
    }
}

/// Parse one directive token against the registry
///
/// `source_format` is the literal extension of the requested asset; it
/// drives format-restriction rejection for encode-options operations.
pub fn parse_token(token: &str, source_format: ImageFormat) -> Result<ParsedDirective> {
    let spec = match_prefix(token).ok_or_else(|| DirectiveError::UnknownOperation {
        token: token.to_string(),
    })?;

    if !spec.applies_to(source_format) {
        return Err(DirectiveError::FormatRestricted {
            op: spec.name,
            format: source_format,
        });
    }

    // Strip the matched name and an optional leading separator, then split
    // the remainder into key:value pairs. A pair may omit its value (the
    // default is used) and anything after a second colon is discarded.
    let rest = &token[spec.name.len()..];
    let rest = rest.strip_prefix('-').unwrap_or(rest);

    let mut supplied: Vec<(&str, Option<&str>)> = Vec::new();
    for piece in rest.split(',') {
        let mut parts = piece.split(':');
        let key = parts.next().unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let value = parts.next();
        // repeated keys: last one wins
        match supplied.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => supplied.push((key, value)),
        }
    }

    // Pair-count check before default-filling
    if supplied.len() > spec.params.len() {
        return Err(DirectiveError::TooManyParams {
            op: spec.name,
            supplied: supplied.len(),
            max: spec.params.len(),
        });
    }

    let mut params = ResolvedParams::new();
    for p in &spec.params {
        let supplied_value = supplied
            .iter()
            .find(|(k, _)| *k == p.key)
            .and_then(|(_, v)| *v);

        let value = match supplied_value {
            Some(raw) => p.kind.coerce(raw).ok_or(DirectiveError::InvalidValue {
                op: spec.name,
                key: p.key,
                value: raw.to_string(),
            })?,
            None => {
                // defaults run through the validator too
                if !p.kind.check(&p.default) {
                    return Err(DirectiveError::InvalidValue {
                        op: spec.name,
                        key: p.key,
                        value: p.default.canonical(),
                    });
                }
                p.default.clone()
            }
        };
        params.insert(p.key, value);
    }

    // Pair-count check after default-filling: supplied keys outside the
    // schema are never retained, they fail the parse instead
    let unknown = supplied
        .iter()
        .filter(|(k, _)| spec.param(k).is_none())
        .count();
    if params.len() + unknown > spec.params.len() {
        return Err(DirectiveError::TooManyParams {
            op: spec.name,
            supplied: params.len() + unknown,
            max: spec.params.len(),
        });
    }

    Ok(ParsedDirective {
        operation: spec.name,
        params,
    })
}
