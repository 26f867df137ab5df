//! Filesystem access for the processor.
//!
//! Two operations: check that a source is a readable file, and write an
//! encoded image so that the destination either holds the complete new file
//! or is left untouched. Writes go to a temporary file in the destination
//! directory and are renamed into place. Parent directories are never
//! created; a missing parent is an error.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("Input file does not exist: {0}")]
    NotFound(PathBuf),
    #[error("Input path is not a file: {0}")]
    NotAFile(PathBuf),
    #[error("Input file is not readable: {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("Unable to open for write: {path}: {source}")]
    Unwritable { path: PathBuf, source: io::Error },
}

/// Ensure `path` names an existing file we can open for reading.
pub fn check_readable(path: &Path) -> Result<(), FileError> {
    let unreadable = |source| FileError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => unreadable(e),
    })?;
    if !metadata.is_file() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }
    fs::File::open(path).map_err(unreadable)?;
    Ok(())
}

/// Write `bytes` to `path` atomically.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    let unwritable = |source| FileError::Unwritable {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".imgbatch-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(unwritable)?;
    tmp.write_all(bytes).map_err(unwritable)?;
    tmp.flush().map_err(unwritable)?;

    // Temp files are created owner-only; outputs should look like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(unwritable)?;
    }

    tmp.persist(path).map_err(|e| unwritable(e.error))?;
    Ok(())
}
