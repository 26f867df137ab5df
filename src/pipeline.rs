//! Operation pipeline.
//!
//! Turns [`Options`] into the ordered list of [`Step`]s an image goes through.
//! The order is fixed regardless of how the options were written:
//!
//! ```text
//! resize → grayscale → flip → flop → blur → encode
//! ```
//!
//! Encode is always last: it is the only step that picks the output container.
//! Building is pure and never touches the filesystem; the same options always
//! produce the same pipeline.

use crate::imaging::{OutputFormat, Quality};
use crate::options::Options;

/// One transformation in a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// At least one side is set; a missing side is derived from the source
    /// aspect ratio when the step runs.
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    Grayscale,
    Flip,
    Flop,
    Blur {
        sigma: f32,
    },
    Encode {
        format: OutputFormat,
        quality: Quality,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Resize { .. } => "resize",
            Step::Grayscale => "grayscale",
            Step::Flip => "flip",
            Step::Flop => "flop",
            Step::Blur { .. } => "blur",
            Step::Encode { .. } => "encode",
        }
    }
}

/// Ordered steps derived from one [`Options`] value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Build the pipeline for `options`.
    ///
    /// Expects options that passed [`validate`](crate::validate::validate);
    /// fields that would not validate contribute no step.
    pub fn build(options: &Options) -> Self {
        let mut steps = Vec::new();

        let (width, height) = (options.width_px(), options.height_px());
        if width.is_some() || height.is_some() {
            steps.push(Step::Resize { width, height });
        }
        if options.grayscale {
            steps.push(Step::Grayscale);
        }
        if options.flip {
            steps.push(Step::Flip);
        }
        if options.flop {
            steps.push(Step::Flop);
        }
        if let Some(sigma) = options.blur_sigma() {
            steps.push(Step::Blur { sigma });
        }
        if let Some(format) = options.output_format() {
            let quality = options.quality_value().map(Quality::new).unwrap_or_default();
            steps.push(Step::Encode { format, quality });
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Every step except the final encode.
    pub fn transforms(&self) -> impl Iterator<Item = &Step> {
        self.steps
            .iter()
            .filter(|s| !matches!(s, Step::Encode { .. }))
    }

    /// The explicit encode target, if the options asked for one.
    pub fn encode_target(&self) -> Option<(OutputFormat, Quality)> {
        self.steps.iter().find_map(|s| match *s {
            Step::Encode { format, quality } => Some((format, quality)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
