//! CLI output formatting for processing results.
//!
//! # Output Format
//!
//! One line per image, successes on stdout and failures on stderr:
//!
//! ```text
//! Processed: photos/a.jpg to out/a.webp
//! Failed: photos/missing.jpg, Error: Input file does not exist: photos/missing.jpg
//! ```
//!
//! Batch runs end with a summary line on stdout:
//!
//! ```text
//! Processed 2 images: 1 succeeded, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `String`s) for testability
//! and a `print_*` wrapper that does the writing. Format functions do no I/O.
//! [`write_report`] is the one exception: it serializes outcomes as JSON for
//! `--report`.

use crate::types::{Outcome, Status};
use std::path::Path;

/// The per-image result line.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome.status() {
        Status::Success => format!(
            "Processed: {} to {}",
            outcome.input_path().display(),
            outcome.output_path().display()
        ),
        Status::Failed { error } => format!(
            "Failed: {}, Error: {}",
            outcome.input_path().display(),
            error
        ),
    }
}

/// `Processed N images: S succeeded, F failed`
pub fn format_summary(outcomes: &[Outcome]) -> String {
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - succeeded;
    format!(
        "Processed {} images: {succeeded} succeeded, {failed} failed",
        outcomes.len()
    )
}

pub fn print_outcomes(outcomes: &[Outcome]) {
    for outcome in outcomes {
        let line = format_outcome(outcome);
        if outcome.is_success() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }
}

pub fn print_summary(outcomes: &[Outcome]) {
    println!("{}", format_summary(outcomes));
}

/// Write all outcomes as a pretty-printed JSON array.
pub fn write_report(path: &Path, outcomes: &[Outcome]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(outcomes)?;
    std::fs::write(path, json)?;
    Ok(())
}
