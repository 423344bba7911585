//! Engine and pipeline traits
//!
//! The engine seam mirrors how a libvips-style processor is driven: open raw
//! bytes into a handle, queue named operations against it, then either ask
//! for metadata or serialize the result. Operations are queued synchronously;
//! only open, metadata, and serialization suspend.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{OpArgs, Result};

/// Options applied when opening source bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    /// Re-encode to webp at this quality (the adaptive loop lowers it on
    /// retry). `None` means keep the source format.
    pub webp_quality: Option<u8>,

    /// Normalize orientation from EXIF data on open
    pub autorotate: bool,
}

impl OpenOptions {
    /// Open for webp re-encoding at the given quality
    pub fn webp(quality: u8) -> Self {
        Self {
            webp_quality: Some(quality),
            autorotate: false,
        }
    }

    /// Open keeping the source format, normalizing orientation only
    pub fn autorotated() -> Self {
        Self {
            webp_quality: None,
            autorotate: true,
        }
    }
}

/// Metadata reported by the engine for an opened image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Decoded width in pixels
    pub width: u32,

    /// Decoded height in pixels
    pub height: u32,

    /// Byte size of the source representation as reported by the decoder,
    /// when the container carries it
    pub size: Option<u64>,
}

/// A mutable handle over one opened image
///
/// Operations are addressed by name and mutate the handle in place; the
/// directive layer guarantees argument maps are schema-complete before they
/// reach `apply`.
#[async_trait]
pub trait ImagePipeline: Send {
    /// Queue one named primitive operation (`resize`, `extract`, `rotate`,
    /// `jpg`, ...) with its typed arguments
    ///
    /// # Errors
    /// - `ImagingError::UnknownOperation` if the engine has no such primitive
    /// - `ImagingError::InvalidArgument` if an argument is missing or mistyped
    fn apply(&mut self, op: &str, args: &OpArgs) -> Result<()>;

    /// Introspect the opened source
    async fn metadata(&mut self) -> Result<ImageMetadata>;

    /// Run the queued operations and serialize the result
    async fn into_bytes(self: Box<Self>) -> Result<Bytes>;
}

/// Factory for pipeline handles
#[async_trait]
pub trait ImageEngine: Send + Sync {
    /// Open raw source bytes into a pipeline handle
    ///
    /// # Errors
    /// Returns `ImagingError::Codec` if the bytes cannot be decoded.
    async fn open(&self, source: &Bytes, opts: OpenOptions) -> Result<Box<dyn ImagePipeline>>;
}
