//! Pictor - Imaging
//!
//! Boundary types for the external image-processing collaborator.
//!
//! Pictor never touches pixels itself. It compiles request paths into an
//! ordered list of primitive operations (resize, extract, rotate, ...) and
//! drives them against an engine that implements [`ImageEngine`] /
//! [`ImagePipeline`]. This crate defines that seam:
//!
//! - [`ImageFormat`] - the supported source/target formats and their MIME
//!   subtypes
//! - [`ArgValue`] / [`OpArgs`] - the typed parameter mapping passed to each
//!   primitive operation
//! - [`ImageEngine`] - opens raw bytes into a mutable [`ImagePipeline`]
//!   handle supporting named operations, metadata introspection, and
//!   serialization back to bytes
//!
//! A scripted [`test_utils::RecordingEngine`] is provided for exercising the
//! orchestration layers without a real codec.

mod args;
mod error;
mod format;
mod pipeline;

pub mod test_utils;

pub use args::{ArgValue, OpArgs};
pub use error::{ImagingError, Result};
pub use format::ImageFormat;
pub use pipeline::{ImageEngine, ImageMetadata, ImagePipeline, OpenOptions};
