//! Adaptive encode loop
//!
//! One open/apply/serialize cycle per attempt. Webp targets start at the
//! configured quality and step down whenever the encoded payload exceeds
//! the transport ceiling; other targets open with orientation
//! normalization only, so for them the loop is effectively a retry bound
//! on a result that does not shrink.

use bytes::Bytes;
use tracing::debug;

use pictor_config::EncodeConfig;
use pictor_imaging::{ImageEngine, ImageFormat, OpenOptions};
use pictor_pipeline::TransformChain;

use crate::{EdgeError, Result};

#[cfg(test)]
#[path = "encode_test.rs"]
mod tests;

/// Outcome of the encode loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// A derived payload ready to serve
    Encoded(Bytes),

    /// The encode reproduced the stored original byte-for-byte in size;
    /// the caller should leave the origin's response untouched
    Passthrough,
}

/// Whether an encode is indistinguishable from the stored original
///
/// True when the decoder reported a source size and the encoded length
/// matches it exactly. Serving the derivative in that case would only
/// duplicate the original under a second key.
pub fn passthrough_heuristic(encoded_len: u64, source_size: Option<u64>) -> bool {
    source_size == Some(encoded_len)
}

/// Run the quality/size feedback loop until a payload fits
///
/// # Errors
/// - `EdgeError::RetriesExhausted` when `limits.max_attempts` cycles all
///   produce oversized payloads
/// - `EdgeError::Unexpected` for engine faults
pub async fn adaptive_encode(
    engine: &dyn ImageEngine,
    source: &Bytes,
    chain: &TransformChain,
    target: ImageFormat,
    limits: &EncodeConfig,
) -> Result<EncodeOutcome> {
    let mut quality = limits.initial_quality;

    for attempt in 1..=limits.max_attempts {
        let opts = if target == ImageFormat::Webp {
            OpenOptions::webp(quality)
        } else {
            OpenOptions::autorotated()
        };

        let mut img = engine.open(source, opts).await?;
        let metadata = img.metadata().await?;
        chain.apply(img.as_mut())?;
        let encoded = img.into_bytes().await?;
        let encoded_len = encoded.len() as u64;

        if passthrough_heuristic(encoded_len, metadata.size) {
            debug!(attempt, "encode matched source size, passing through");
            return Ok(EncodeOutcome::Passthrough);
        }

        if encoded_len >= limits.max_payload_bytes {
            debug!(
                attempt,
                quality,
                bytes = encoded_len,
                "encode over payload ceiling, lowering quality"
            );
            quality = quality.saturating_sub(limits.quality_step);
            continue;
        }

        return Ok(EncodeOutcome::Encoded(encoded));
    }

    Err(EdgeError::RetriesExhausted {
        attempts: limits.max_attempts,
    })
}
