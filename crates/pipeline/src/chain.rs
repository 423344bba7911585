//! Transform chain compilation
//!
//! The directive segment is the first path component after the matched
//! prefix. Tokens are split on `~`, rewritten by the rule's interceptors,
//! then parsed one by one; the storage key of the original asset is the
//! request path with the directive segment replaced by the literal
//! `original`.

use tracing::debug;

use pictor_directive::{parse_token, ParsedDirective};
use pictor_imaging::{ImageFormat, ImagePipeline};
use pictor_routing::RouteMatch;

use crate::{CompileError, Result};

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;

/// Ordered, validated directives plus the original asset's storage key
#[derive(Debug, Clone, PartialEq)]
pub struct TransformChain {
    /// Directives in path order
    pub directives: Vec<ParsedDirective>,

    /// Storage key of the underlying original asset
    pub storage_key: String,

    /// Namespace of the matched directory rule
    pub namespace: String,
}

impl TransformChain {
    /// Number of directives
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Whether the chain holds no directives
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Whether this is a pass-through request for the unmodified asset
    /// (directive segment was exactly `original`)
    pub fn is_passthrough(&self) -> bool {
        self.directives.is_empty()
    }

    /// Apply every directive to a pipeline handle, strictly in path order
    pub fn apply(&self, img: &mut dyn ImagePipeline) -> pictor_imaging::Result<()> {
        for directive in &self.directives {
            directive.apply(img)?;
        }
        Ok(())
    }
}

/// Compile a matched route and request path into a transform chain
///
/// `source_format` is the literal extension of the requested asset and
/// drives per-operation format restrictions.
pub fn compile(
    route: &RouteMatch,
    path: &str,
    source_format: ImageFormat,
) -> Result<TransformChain> {
    let remainder = route
        .rule
        .strip_prefix(path)
        .ok_or_else(|| CompileError::PrefixMismatch {
            prefix: route.matched_prefix.clone(),
            path: path.to_string(),
        })?;

    // the raw (still percent-encoded) segment is what gets swapped for
    // `original` in the storage key; tokens parse from the decoded form
    let raw_segment = remainder.split('/').next().unwrap_or("");
    let segment = percent::decode(raw_segment);

    let directives = if segment == "original" {
        Vec::new()
    } else {
        segment
            .split('~')
            .map(|token| {
                let token = route.rule.intercept(token);
                parse_token(&token, source_format).map_err(CompileError::from)
            })
            .collect::<Result<Vec<_>>>()?
    };

    let storage_key = percent::decode(&path.replacen(&format!("/{raw_segment}/"), "/original/", 1));

    debug!(
        namespace = route.rule.namespace.as_str(),
        steps = directives.len(),
        key = storage_key.as_str(),
        "compiled transform chain"
    );

    Ok(TransformChain {
        directives,
        storage_key,
        namespace: route.rule.namespace.clone(),
    })
}

/// Percent-decoding helper
mod percent {
    /// Decode `%XX` escapes; malformed escapes pass through unchanged
    pub fn decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' && i + 2 < bytes.len() {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                if let (Some(hi), Some(lo)) = (hi, lo) {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                    continue;
                }
            }
            out.push(bytes[i]);
            i += 1;
        }
        String::from_utf8_lossy(&out).into_owned()
    }
}
