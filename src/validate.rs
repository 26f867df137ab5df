//! Option validation.
//!
//! Runs before any I/O. Collects every problem instead of stopping at the
//! first, so a user fixing a manifest sees the whole list at once.

use crate::imaging::FORMAT_NAMES;
use crate::options::{Options, pixel_count};

/// Check `options` for type and range errors.
///
/// Returns an empty list when the options are acceptable.
pub fn validate(options: &Options) -> Vec<String> {
    let mut errors = Vec::new();

    if options.width.is_some() && pixel_count(options.width).is_none() {
        errors.push("Width must be a positive number.".to_string());
    }
    if options.height.is_some() && pixel_count(options.height).is_none() {
        errors.push("Height must be a positive number.".to_string());
    }
    if options.format.is_some() && options.output_format().is_none() {
        errors.push(format!("Format must be one of: {}.", FORMAT_NAMES.join(", ")));
    }
    // Quality only reaches an encoder alongside an explicit format.
    if options.format.is_some()
        && options.quality.is_some()
        && options.quality_value().is_none()
    {
        errors.push("Quality must be an integer between 1 and 100.".to_string());
    }

    errors
}

/// Join validation messages into the single string reported for an image.
pub fn combine(errors: &[String]) -> String {
    format!("Invalid options: {}", errors.join(" "))
}
