//! Save-file layer for the faculty schedule planner.
//!
//! A save file holds one [`Snapshot`] as pretty-printed JSON with the
//! `.cccsched` extension.
//!
//! # Format
//!
//! ```json
//! {
//!   "facultyInfo": { "name": "...", "semester": "..." },
//!   "schedule": { "monday": [ ... ], ..., "saturday": [ ... ] },
//!   "totals": { "teachingHours": 0, "studentHours": 0, ... },
//!   "notes": ""
//! }
//! ```
//!
//! Loading tolerates a missing `notes` field, missing day keys and events
//! without an `id` or `duration`. A missing duration is derived from the
//! event's times; a stored one is kept as-is, even when it has drifted.
//!
//! # Writes
//!
//! [`save`] writes to a sibling temporary file and renames it into place, so
//! a failed save leaves the previous file intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fsched_core::{FacultyInfo, Snapshot};
use thiserror::Error;

/// Save-file extension, without the dot.
pub const EXTENSION: &str = "cccsched";

/// Save-file errors.
#[derive(Debug, Error)]
pub enum FileError {
    /// Reading or writing the file failed.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The content is not a valid save file.
    #[error("invalid schedule file: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    /// The snapshot could not be encoded.
    #[error("failed to encode schedule: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl FileError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parses save-file JSON.
pub fn from_json(json: &str) -> Result<Snapshot, FileError> {
    serde_json::from_str(json).map_err(|source| FileError::Parse { source })
}

/// Encodes a snapshot as pretty-printed save-file JSON.
pub fn to_json(snapshot: &Snapshot) -> Result<String, FileError> {
    serde_json::to_string_pretty(snapshot).map_err(FileError::Serialize)
}

/// Loads a save file.
pub fn load(path: &Path) -> Result<Snapshot, FileError> {
    let content = std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))?;
    let snapshot = from_json(&content)?;
    tracing::debug!(
        path = %path.display(),
        events = snapshot.schedule.len(),
        "loaded schedule file"
    );
    Ok(snapshot)
}

/// Loads a save file, returning `None` if it does not exist.
pub fn load_if_exists(path: &Path) -> Result<Option<Snapshot>, FileError> {
    match std::fs::read_to_string(path) {
        Ok(content) => from_json(&content).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FileError::io(path, e)),
    }
}

/// Writes a save file, creating parent directories as needed.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), FileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FileError::io(parent, e))?;
    }

    let json = to_json(snapshot)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, json).map_err(|e| FileError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(FileError::io(path, e));
    }

    tracing::debug!(path = %path.display(), "saved schedule file");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// `<name>_schedule.cccsched`, with whitespace runs in the name replaced by `_`.
pub fn default_file_name(faculty: &FacultyInfo) -> String {
    format!("{}_schedule.{EXTENSION}", faculty.name_slug())
}
