//! Shared types used across the batch engine.
//!
//! [`ImageConfig`] is what a batch manifest is made of; [`Outcome`] is what
//! comes back for each item. Both use the manifest's camelCase JSON keys.

use crate::options::Options;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One batch item: where to read, where to write, and what to do in between.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(alias = "input_path")]
    pub input_path: PathBuf,
    #[serde(alias = "output_path")]
    pub output_path: PathBuf,
    #[serde(default)]
    pub options: Options,
}

impl ImageConfig {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        options: Options,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            options,
        }
    }
}

/// Whether an image made it to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum Status {
    Success,
    Failed { error: String },
}

/// Result of processing one [`ImageConfig`].
///
/// Fields are private: an outcome is built once through [`Outcome::success`]
/// or [`Outcome::failed`] and only read afterwards. An error message exists
/// if and only if the status is failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    input_path: PathBuf,
    output_path: PathBuf,
    #[serde(flatten)]
    status: Status,
}

impl Outcome {
    pub fn success(input_path: &Path, output_path: &Path) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            status: Status::Success,
        }
    }

    pub fn failed(input_path: &Path, output_path: &Path, error: impl Into<String>) -> Self {
        Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            status: Status::Failed {
                error: error.into(),
            },
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Success => None,
            Status::Failed { error } => Some(error.as_str()),
        }
    }
}
