//! Directory scanning and chronological ordering.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::naming::{NamePattern, has_wav_extension};

/// A recording whose name matched the timestamp pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedFile {
    /// File name within the input directory.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Timestamp parsed from the name.
    pub timestamp: NaiveDateTime,
}

/// Outcome of scanning an input directory.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Matching recordings in chronological order.
    pub files: Vec<TimestampedFile>,
    /// `.wav` names that did not match the pattern.
    pub skipped: Vec<String>,
}

/// List `.wav` recordings in `dir` and order them by their name timestamp.
///
/// Entries without a `.wav` extension are ignored outright. `.wav` entries
/// that do not match `pattern` are reported in [`ScanResult::skipped`].
pub fn scan_recordings(dir: &Path, pattern: &NamePattern) -> Result<ScanResult> {
    let read_err = |e| Error::InputDirRead {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if has_wav_extension(&name) && entry.path().is_file() {
            names.push(name);
        }
    }
    // Directory order is platform-dependent
    names.sort();

    let mut result = ScanResult::default();
    for name in names {
        match pattern.timestamp(&name) {
            Some(timestamp) => result.files.push(TimestampedFile {
                path: dir.join(&name),
                name,
                timestamp,
            }),
            None => {
                debug!("Name does not match {}_YYYYMMDD_HHMMSS.wav: {name}", pattern.prefix());
                result.skipped.push(name);
            }
        }
    }

    sort_chronologically(&mut result.files);
    Ok(result)
}

/// Sort by timestamp, keeping the existing order of equal timestamps.
pub fn sort_chronologically(files: &mut [TimestampedFile]) {
    files.sort_by_key(|f| f.timestamp);
}
