//! Supported image formats
//!
//! The format table mirrors what the edge accepts as source and target
//! extensions. Anything outside this set is rejected before any storage or
//! codec work happens.

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;

/// A supported source/target image format
///
/// `Jpg` and `Jpeg` are distinct variants because they are distinct literal
/// extensions on the origin (storage keys are extension-sensitive), but they
/// share a MIME subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// JPEG with the `.jpg` extension
    Jpg,
    /// JPEG with the `.jpeg` extension
    Jpeg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// WebP - the derived target format; origins store legacy formats only
    Webp,
    /// SVG (passed through, never re-encoded)
    Svg,
    /// TIFF
    Tiff,
}

impl ImageFormat {
    /// All supported formats, in table order
    pub const ALL: [ImageFormat; 7] = [
        Self::Jpg,
        Self::Jpeg,
        Self::Png,
        Self::Gif,
        Self::Webp,
        Self::Svg,
        Self::Tiff,
    ];

    /// Parse a file extension (case-insensitive, no leading dot)
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "svg" => Some(Self::Svg),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// Canonical lowercase extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Tiff => "tiff",
        }
    }

    /// MIME subtype (`jpg` and `jpeg` both map to `jpeg`)
    pub fn mime_subtype(&self) -> &'static str {
        match self {
            Self::Jpg | Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Tiff => "tiff",
        }
    }

    /// Full content-type header value, e.g. `image/jpeg`
    pub fn content_type(&self) -> String {
        format!("image/{}", self.mime_subtype())
    }

    /// Whether this is the derived target format with no literal origin
    /// object (requests for it trigger alternate-source fan-out)
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Webp)
    }
}
