//! Adaptive encode loop limits
//!
//! The quality knob only shrinks webp re-encodes, so the loop must carry an
//! explicit attempt bound to stay terminating for other target formats.

use serde::Deserialize;

/// Limits for the quality/size feedback loop
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Starting webp quality
    pub initial_quality: u8,

    /// Quality decrement applied when the encode exceeds the payload ceiling
    pub quality_step: u8,

    /// Transport payload ceiling in bytes
    pub max_payload_bytes: u64,

    /// Maximum encode attempts before the loop aborts
    pub max_attempts: u32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            initial_quality: 80,
            quality_step: 10,
            max_payload_bytes: 5_242_880,
            // quality 80 stepped by 10 bottoms out after 8 attempts
            max_attempts: 8,
        }
    }
}
