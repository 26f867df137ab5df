//! Pure Rust image processing backend.
//!
//! No system libraries; everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::ImageReader` with content-sniffed format |
//! | Resize | `DynamicImage::resize_to_fill` with `Lanczos3` filter |
//! | Grayscale | `DynamicImage::grayscale` |
//! | Flip / flop | `DynamicImage::flipv` / `DynamicImage::fliph` |
//! | Blur | `DynamicImage::blur` (Gaussian) |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → PNG | `PngEncoder` (lossless, quality ignored) |
//! | Encode → WebP | `WebPEncoder::new_lossless` (quality ignored) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::fill_pixel_count;
use super::params::{MAX_PIXELS, OutputFormat, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_gray(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
    )
}

/// JPEG has no alpha channel and only 8-bit samples.
fn to_jpeg_compatible(img: &DynamicImage) -> DynamicImage {
    if is_gray(img.color()) {
        DynamicImage::ImageLuma8(img.to_luma8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    }
}

/// The WebP encoder accepts 8-bit L, LA, RGB and RGBA.
fn to_webp_compatible(img: &DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img.clone(),
        ColorType::L16 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La16 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        c if c.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// PNG handles every integer layout but not floating point samples.
fn to_png_compatible(img: &DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgba32F => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb16(img.to_rgb16()),
        _ => img.clone(),
    }
}

fn encode_error(format: OutputFormat, e: image::ImageError) -> BackendError {
    BackendError::Encode(format!("{} encode failed: {}", format.name().to_uppercase(), e))
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn open(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                BackendError::Decode(format!(
                    "Unsupported image format: {}: {}",
                    path.display(),
                    e
                ))
            })?;
        if img.width() == 0 || img.height() == 0 {
            return Err(BackendError::Decode(format!(
                "Unsupported image format: {} has zero dimensions",
                path.display()
            )));
        }
        Ok(img)
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn resize(
        &self,
        image: DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        if image.width() == width && image.height() == height {
            return Ok(image);
        }
        let pixels = fill_pixel_count(self.dimensions(&image), width, height);
        if pixels > MAX_PIXELS {
            return Err(BackendError::ProcessingFailed(format!(
                "cannot resize to {width}x{height}: {pixels} pixels exceeds the limit of {MAX_PIXELS}"
            )));
        }
        Ok(image.resize_to_fill(width, height, FilterType::Lanczos3))
    }

    fn grayscale(&self, image: DynamicImage) -> Result<DynamicImage, BackendError> {
        Ok(image.grayscale())
    }

    fn flip(&self, image: DynamicImage) -> Result<DynamicImage, BackendError> {
        Ok(image.flipv())
    }

    fn flop(&self, image: DynamicImage) -> Result<DynamicImage, BackendError> {
        Ok(image.fliph())
    }

    fn blur(&self, image: DynamicImage, sigma: f32) -> Result<DynamicImage, BackendError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BackendError::ProcessingFailed(format!(
                "invalid blur sigma {sigma}"
            )));
        }
        Ok(image.blur(sigma))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, BackendError> {
        let mut bytes = Vec::new();
        match format {
            OutputFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.value() as u8);
                to_jpeg_compatible(image).write_with_encoder(encoder)
            }
            OutputFormat::Png => {
                to_png_compatible(image).write_with_encoder(PngEncoder::new(&mut bytes))
            }
            OutputFormat::WebP => {
                to_webp_compatible(image).write_with_encoder(WebPEncoder::new_lossless(&mut bytes))
            }
        }
        .map_err(|e| encode_error(format, e))?;
        Ok(bytes)
    }
}
