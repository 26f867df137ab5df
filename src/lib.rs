//! # imgbatch
//!
//! Batch image transformation. Each input image goes through a fixed sequence
//! of optional steps (resize, grayscale, flip, flop, blur, encode) and lands in
//! its own output file. Many images run in parallel, and one bad image never
//! takes the rest of a batch down with it.
//!
//! # Architecture: Validate, Build, Run
//!
//! Every image is handled by the same three-phase path:
//!
//! ```text
//! 1. Validate  Options   →  Vec<String>   (messages, no I/O)
//! 2. Build     Options   →  Pipeline      (ordered steps, no I/O)
//! 3. Run       Pipeline  →  output file   (decode, transform, encode, write)
//! ```
//!
//! Phases 1 and 2 are pure functions, so option handling is tested without
//! touching the filesystem or encoding images. Phase 3 goes through the
//! [`ImageBackend`](imaging::ImageBackend) trait, which tests replace with a
//! recording mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | Per-image option record, lenient JSON decoding, CLI defaults merge |
//! | [`validate`] | Option checks that run before any I/O |
//! | [`pipeline`] | Turns options into the ordered list of steps |
//! | [`process`] | Single-image processor; every failure becomes a failed [`Outcome`] |
//! | [`batch`] | Fans items out to a bounded rayon pool, outcomes in input order |
//! | [`imaging`] | Backend trait, pure-Rust backend, format and quality types |
//! | [`files`] | Readability checks and atomic output writes |
//! | [`manifest`] | JSON batch manifest loading |
//! | [`types`] | [`ImageConfig`] and [`Outcome`] |
//! | [`config`] | `imgbatch.toml` loading, merging, and validation |
//! | [`output`] | CLI result lines, batch summary, JSON report |
//!
//! # Design Decisions
//!
//! ## Fixed Step Order
//!
//! Steps always run as resize → grayscale → flip → flop → blur → encode, no
//! matter how the options were written. The same options on the same input
//! always produce the same bytes.
//!
//! ## Outcomes, Not Errors
//!
//! [`process::process_image`] returns an [`Outcome`] rather than a `Result`.
//! Validation, missing files, decode failures, step failures, write failures
//! and even backend panics are all folded into a failed outcome at that one
//! boundary. The batch layer never handles errors itself.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, JPEG,
//! PNG and WebP codecs). No system libraries, so the binary is self-contained.
//!
//! ## All or Nothing on Disk
//!
//! Encoded bytes are written to a temporary file next to the destination and
//! renamed into place, so a failed image never leaves a truncated file behind.

pub mod batch;
pub mod config;
pub mod files;
pub mod imaging;
pub mod manifest;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod types;
pub mod validate;

pub use options::Options;
pub use types::{ImageConfig, Outcome, Status};

#[cfg(test)]
pub(crate) mod test_helpers;
