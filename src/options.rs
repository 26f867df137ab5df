//! Per-image transformation options.
//!
//! [`Options`] is the typed form of the `options` object in a batch manifest.
//! Every field is independently optional. Decoding is deliberately lenient:
//! a wrongly-typed value never fails the manifest parse, it either becomes a
//! value the [validator](crate::validate) rejects (`width`, `height`,
//! `quality`, `format`) or is treated as absent (`blur`). That keeps one
//! malformed item from taking down the rest of the batch.
//!
//! ```text
//! {"width": 300}                  → resize to 300 wide, height derived
//! {"width": "wide"}               → width = NaN → "Width must be a positive number."
//! {"blur": "lots"}                → no blur
//! {"format": "jpg", "quality": 60} → JPEG at quality 60
//! {"resize": {...}}               → unknown key, ignored
//! ```

use crate::imaging::OutputFormat;
use serde::Deserialize;

/// Transformation options for one image.
///
/// Numeric fields keep the raw JSON number so validation can tell "absent"
/// (`None`) apart from "present but unusable" (`Some(NaN)`, `Some(-5.0)`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(deserialize_with = "de::number")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "de::number")]
    pub height: Option<f64>,
    #[serde(deserialize_with = "de::flag")]
    pub grayscale: bool,
    /// Mirror vertically.
    #[serde(deserialize_with = "de::flag")]
    pub flip: bool,
    /// Mirror horizontally.
    #[serde(deserialize_with = "de::flag")]
    pub flop: bool,
    /// Gaussian blur sigma. Non-numeric values decode as absent.
    #[serde(deserialize_with = "de::number_or_absent")]
    pub blur: Option<f64>,
    #[serde(deserialize_with = "de::text")]
    pub format: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub quality: Option<f64>,
}

/// A positive whole number that fits in `u32`, or `None`.
pub fn pixel_count(value: Option<f64>) -> Option<u32> {
    let v = value?;
    (v.is_finite() && v >= 1.0 && v.fract() == 0.0 && v <= u32::MAX as f64).then_some(v as u32)
}

impl Options {
    pub fn width_px(&self) -> Option<u32> {
        pixel_count(self.width)
    }

    pub fn height_px(&self) -> Option<u32> {
        pixel_count(self.height)
    }

    /// Blur sigma, when the amount is a positive finite number.
    pub fn blur_sigma(&self) -> Option<f32> {
        self.blur
            .filter(|b| b.is_finite() && *b > 0.0)
            .map(|b| b as f32)
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format.as_deref().and_then(OutputFormat::from_name)
    }

    /// Quality as an integer in `1..=100`, or `None` if absent or out of range.
    pub fn quality_value(&self) -> Option<u32> {
        let q = self.quality?;
        (q.is_finite() && q.fract() == 0.0 && (1.0..=100.0).contains(&q)).then_some(q as u32)
    }

    /// True when no recognized field is set: the image is re-encoded unchanged.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every field this value leaves unset from `defaults`.
    ///
    /// Used for batch runs, where options given on the command line apply to
    /// every item that does not say otherwise.
    pub fn with_defaults(self, defaults: &Options) -> Options {
        Options {
            width: self.width.or(defaults.width),
            height: self.height.or(defaults.height),
            grayscale: self.grayscale || defaults.grayscale,
            flip: self.flip || defaults.flip,
            flop: self.flop || defaults.flop,
            blur: self.blur.or(defaults.blur),
            format: self.format.or_else(|| defaults.format.clone()),
            quality: self.quality.or(defaults.quality),
        }
    }
}

mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Numbers pass through; any other non-null value becomes NaN.
    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
            _ => Some(f64::NAN),
        })
    }

    pub fn number_or_absent<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }
}
