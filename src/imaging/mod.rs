//! Image processing in pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, WebP, sniffed by content) |
//! | **Resize** | Lanczos3 `resize_to_fill` |
//! | **Filters** | `grayscale`, `flipv`, `fliph`, Gaussian `blur` |
//! | **Encode** | JPEG (quality-controlled), PNG, lossless WebP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encode targets
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{fill_pixel_count, resolve_resize_dimensions};
pub use params::{DEFAULT_QUALITY, FORMAT_NAMES, MAX_PIXELS, OutputFormat, Quality};
pub use rust_backend::RustBackend;
