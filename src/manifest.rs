//! Batch manifest loading.
//!
//! A manifest is a JSON array of [`ImageConfig`] items:
//!
//! ```json
//! [
//!   {"inputPath": "photos/a.jpg", "outputPath": "out/a.webp", "options": {"width": 800, "format": "webp"}},
//!   {"inputPath": "photos/b.png", "outputPath": "out/b.png"}
//! ]
//! ```
//!
//! Option values are decoded leniently (see [`crate::options`]), so a manifest
//! only fails to load when it is not a JSON array of objects with both paths.

use crate::types::ImageConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Cannot read batch manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid batch manifest {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read and parse the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<ImageConfig>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_manifest(content: &str) -> Result<Vec<ImageConfig>, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_two_item_manifest() {
        let items = parse_manifest(
            r#"[
                {"inputPath": "a.jpg", "outputPath": "a.png", "options": {"format": "png"}},
                {"inputPath": "b.jpg", "outputPath": "b.jpg"}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].options.format.as_deref(), Some("png"));
        assert_eq!(items[1].options, Options::default());
    }

    #[test]
    fn malformed_option_values_do_not_fail_the_manifest() {
        let items = parse_manifest(
            r#"[{"inputPath": "a.jpg", "outputPath": "b.jpg",
                 "options": {"width": "huge", "blur": "soft", "format": 7}}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn empty_array_is_an_empty_batch() {
        assert!(parse_manifest("[]").unwrap().is_empty());
    }

    #[test]
    fn item_without_output_path_is_rejected() {
        assert!(parse_manifest(r#"[{"inputPath": "a.jpg"}]"#).is_err());
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(parse_manifest(r#"{"inputPath": "a.jpg", "outputPath": "b.jpg"}"#).is_err());
    }

    #[test]
    fn load_manifest_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("batch.json");
        fs::write(&path, r#"[{"inputPath": "x.jpg", "outputPath": "y.jpg"}]"#).unwrap();

        let items = load_manifest(&path).unwrap();
        assert_eq!(items[0].input_path, PathBuf::from("x.jpg"));
    }

    #[test]
    fn load_missing_manifest_names_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");

        let err = load_manifest(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
