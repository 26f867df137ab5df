//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Resolve the final size of a resize step.
///
/// - both sides given → exactly `(width, height)`
/// - one side given → the other is derived from the source aspect ratio
/// - neither → `None` (no resize)
///
/// Derived sides are rounded and never drop below 1px.
///
/// # Examples
/// ```
/// # use imgbatch::imaging::{Dimensions, resolve_resize_dimensions};
/// let source = Dimensions { width: 400, height: 300 };
/// assert_eq!(resolve_resize_dimensions(source, Some(200), None), Some((200, 150)));
/// assert_eq!(resolve_resize_dimensions(source, None, Some(150)), Some((200, 150)));
/// assert_eq!(resolve_resize_dimensions(source, None, None), None);
/// ```
pub fn resolve_resize_dimensions(
    source: Dimensions,
    width: Option<u32>,
    height: Option<u32>,
) -> Option<(u32, u32)> {
    match (width, height) {
        (Some(w), Some(h)) => Some((w, h)),
        (Some(w), None) => Some((w, scale_side(source.height, w, source.width))),
        (None, Some(h)) => Some((scale_side(source.width, h, source.height), h)),
        (None, None) => None,
    }
}

/// Pixel count of the scaled image a cover-and-crop resize goes through.
///
/// The source is scaled by the larger of the two axis ratios so it covers the
/// `width`x`height` box, then cropped. The intermediate is at least as large
/// as the box and can be far larger when the aspect ratios differ.
pub fn fill_pixel_count(source: Dimensions, width: u32, height: u32) -> u64 {
    if source.width == 0 || source.height == 0 {
        return u64::from(width).saturating_mul(u64::from(height));
    }
    let ratio = (f64::from(width) / f64::from(source.width))
        .max(f64::from(height) / f64::from(source.height));
    let w = (f64::from(source.width) * ratio).ceil().max(f64::from(width));
    let h = (f64::from(source.height) * ratio).ceil().max(f64::from(height));
    // f64 → u64 saturates, so the product only needs checking.
    (w as u64).checked_mul(h as u64).unwrap_or(u64::MAX)
}

/// `side * target / reference`, rounded, at least 1.
fn scale_side(side: u32, target: u32, reference: u32) -> u32 {
    if reference == 0 {
        return target.max(1);
    }
    let scaled = (side as f64 * target as f64 / reference as f64).round();
    (scaled as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDSCAPE: Dimensions = Dimensions {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn both_sides_are_taken_verbatim() {
        assert_eq!(
            resolve_resize_dimensions(LANDSCAPE, Some(100), Some(100)),
            Some((100, 100))
        );
    }

    #[test]
    fn width_only_preserves_aspect() {
        // 1920x1080 → 300 wide: 1080 * 300 / 1920 = 168.75 → 169
        assert_eq!(
            resolve_resize_dimensions(LANDSCAPE, Some(300), None),
            Some((300, 169))
        );
    }

    #[test]
    fn height_only_preserves_aspect() {
        let portrait = Dimensions {
            width: 600,
            height: 800,
        };
        assert_eq!(
            resolve_resize_dimensions(portrait, None, Some(400)),
            Some((300, 400))
        );
    }

    #[test]
    fn no_sides_means_no_resize() {
        assert_eq!(resolve_resize_dimensions(LANDSCAPE, None, None), None);
    }

    #[test]
    fn derived_side_never_collapses_to_zero() {
        let strip = Dimensions {
            width: 1000,
            height: 1,
        };
        assert_eq!(
            resolve_resize_dimensions(strip, Some(10), None),
            Some((10, 1))
        );
    }

    #[test]
    fn fill_count_matches_box_for_same_aspect() {
        let source = Dimensions {
            width: 400,
            height: 300,
        };
        assert_eq!(fill_pixel_count(source, 200, 150), 200 * 150);
    }

    #[test]
    fn fill_count_covers_the_longer_overflow() {
        // Square source into a 60000x1 strip scales to 60000x60000 before cropping.
        let square = Dimensions {
            width: 100,
            height: 100,
        };
        assert_eq!(fill_pixel_count(square, 60_000, 1), 60_000 * 60_000);
    }

    #[test]
    fn fill_count_saturates_instead_of_overflowing() {
        let sliver = Dimensions {
            width: u32::MAX,
            height: 1,
        };
        assert_eq!(fill_pixel_count(sliver, 1, u32::MAX), u64::MAX);
    }

    #[test]
    fn upscaling_is_allowed() {
        let small = Dimensions {
            width: 50,
            height: 25,
        };
        assert_eq!(
            resolve_resize_dimensions(small, Some(200), None),
            Some((200, 100))
        );
    }
}
