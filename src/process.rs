//! Single-image processing.
//!
//! [`process_image`] takes one input path, one output path and [`Options`],
//! and always returns an [`Outcome`]. Every failure on the way (bad options,
//! missing input, undecodable data, a failing step, an unwritable
//! destination, even a panic inside the codec) becomes a failed outcome.
//! This is what lets the [batch coordinator](crate::batch) run images side by
//! side without any of them affecting the others.
//!
//! ## Procedure
//!
//! ```text
//! validate options          → Invalid options: ...
//! check input is readable   → Input file does not exist: ...
//! build pipeline
//! resolve encode target     → Unsupported output format for ...
//! decode source             → Unsupported image format: ...
//! apply each step in order  → Processing failed at <step>: ...
//! encode + atomic write     → Unable to open for write: ...
//! ```
//!
//! No I/O happens before validation passes, and nothing is written to the
//! output path unless every step succeeded.

use crate::files::{self, FileError};
use crate::imaging::{
    BackendError, ImageBackend, OutputFormat, Quality, RustBackend, resolve_resize_dimensions,
};
use crate::options::Options;
use crate::pipeline::{Pipeline, Step};
use crate::types::Outcome;
use crate::validate::{combine, validate};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{}", combine(.0))]
    Validation(Vec<String>),
    #[error(transparent)]
    Input(FileError),
    #[error("{0}")]
    Decode(String),
    #[error("Processing failed at {step}: {message}")]
    Processing { step: &'static str, message: String },
    #[error(transparent)]
    Output(FileError),
    #[error(
        "Unsupported output format for {0}: set `format` or use a .jpg, .jpeg, .png or .webp extension"
    )]
    UnknownOutputFormat(PathBuf),
    #[error("Processing failed: internal error: {0}")]
    Panicked(String),
}

/// Process one image with the default [`RustBackend`].
pub fn process_image(input: &Path, output: &Path, options: &Options) -> Outcome {
    process_image_with_backend(&RustBackend::new(), input, output, options)
}

/// Process one image using a specific backend (allows testing with mock).
pub fn process_image_with_backend<B: ImageBackend>(
    backend: &B,
    input: &Path,
    output: &Path,
    options: &Options,
) -> Outcome {
    debug!(input = %input.display(), output = %output.display(), "processing image");

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        run(backend, input, output, options)
    }))
    .unwrap_or_else(|payload| Err(ProcessError::Panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(()) => {
            debug!(input = %input.display(), "image written");
            Outcome::success(input, output)
        }
        Err(e) => {
            warn!(input = %input.display(), error = %e, "image failed");
            Outcome::failed(input, output, e.to_string())
        }
    }
}

fn run<B: ImageBackend>(
    backend: &B,
    input: &Path,
    output: &Path,
    options: &Options,
) -> Result<(), ProcessError> {
    let errors = validate(options);
    if !errors.is_empty() {
        return Err(ProcessError::Validation(errors));
    }

    files::check_readable(input).map_err(ProcessError::Input)?;

    let pipeline = Pipeline::build(options);
    let (format, quality) = encode_target(&pipeline, output)?;
    if options.quality.is_some() && pipeline.encode_target().is_none() {
        debug!(input = %input.display(), "quality ignored without an explicit format");
    }

    let mut image = backend.open(input).map_err(|e| match e {
        BackendError::Io(io) => ProcessError::Input(FileError::Unreadable {
            path: input.to_path_buf(),
            source: io,
        }),
        other => ProcessError::Decode(other.to_string()),
    })?;

    for step in pipeline.transforms() {
        image = apply_step(backend, image, step).map_err(|e| ProcessError::Processing {
            step: step.name(),
            message: e.to_string(),
        })?;
    }

    let bytes = backend
        .encode(&image, format, quality)
        .map_err(|e| ProcessError::Processing {
            step: "encode",
            message: e.to_string(),
        })?;
    drop(image);

    files::write_atomic(output, &bytes).map_err(ProcessError::Output)
}

/// The explicit `format` option wins; otherwise the output extension decides.
fn encode_target(
    pipeline: &Pipeline,
    output: &Path,
) -> Result<(OutputFormat, Quality), ProcessError> {
    if let Some(target) = pipeline.encode_target() {
        return Ok(target);
    }
    OutputFormat::from_path(output)
        .map(|format| (format, Quality::default()))
        .ok_or_else(|| ProcessError::UnknownOutputFormat(output.to_path_buf()))
}

fn apply_step<B: ImageBackend>(
    backend: &B,
    image: B::Image,
    step: &Step,
) -> Result<B::Image, BackendError> {
    match *step {
        Step::Resize { width, height } => {
            let source = backend.dimensions(&image);
            match resolve_resize_dimensions(source, width, height) {
                Some((w, h)) => backend.resize(image, w, h),
                None => Ok(image),
            }
        }
        Step::Grayscale => backend.grayscale(image),
        Step::Flip => backend.flip(image),
        Step::Flop => backend.flop(image),
        Step::Blur { sigma } => backend.blur(image, sigma),
        // Encoding happens once, after every transform.
        Step::Encode { .. } => Ok(image),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic in image backend".to_string()
    }
}
