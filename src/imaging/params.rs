//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They are shared between
//! the [`pipeline`](crate::pipeline) (which decides what steps to run) and the
//! [`backend`](super::backend) (which does the pixel work), so backends can be
//! swapped (e.g. for a mock in tests) without touching pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 80). Clamped on construction.
//! - [`OutputFormat`]: The container an image is re-encoded into.

use std::fmt;
use std::path::Path;

/// Default encoding quality when a format is requested without one.
pub const DEFAULT_QUALITY: u32 = 80;

/// Largest image, in pixels, a resize may allocate (16384 x 16383 plus one row).
pub const MAX_PIXELS: u64 = 268_402_689;

/// Format names accepted in options, in the order they are reported.
pub const FORMAT_NAMES: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(DEFAULT_QUALITY)
    }
}

/// Output container format.
///
/// `jpg` and `jpeg` both map to [`OutputFormat::Jpeg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Parse a format name as it appears in options (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_80() {
        assert_eq!(Quality::default().value(), 80);
    }

    #[test]
    fn jpg_and_jpeg_are_synonyms() {
        assert_eq!(OutputFormat::from_name("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("JPG"), Some(OutputFormat::Jpeg));
    }

    #[test]
    fn unknown_format_name_is_rejected() {
        assert_eq!(OutputFormat::from_name("gif"), None);
        assert_eq!(OutputFormat::from_name(""), None);
    }

    #[test]
    fn every_listed_name_parses() {
        for name in FORMAT_NAMES {
            assert!(OutputFormat::from_name(name).is_some(), "{name}");
        }
    }

    #[test]
    fn format_from_path_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/photo.WebP")),
            Some(OutputFormat::WebP)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("photo.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_path(Path::new("photo.tiff")), None);
        assert_eq!(OutputFormat::from_path(Path::new("photo")), None);
    }
}
