use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// One audio file found during a scan.
///
/// Absent metadata is `None`, never an empty string or zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Seconds, possibly fractional.
    pub duration: Option<f64>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    /// Front cover as a `data:` URL, only when artwork extraction is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
}

impl Track {
    /// A record carrying only the path and the filename stem as title.
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            title: file_stem_title(path),
            artist: None,
            album: None,
            duration: None,
            year: None,
            genre: None,
            album_art: None,
        }
    }
}

pub(crate) fn file_stem_title(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
}

// Non-UTF-8 names are legal on unix; serde's `Path` impl rejects them.
fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

fn lossy_opt_path<S: Serializer>(path: &Option<PathBuf>, serializer: S) -> Result<S::Ok, S::Error> {
    match path {
        Some(p) => lossy_path(p, serializer),
        None => serializer.serialize_none(),
    }
}

/// Point-in-time view of a running scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    pub files_processed: usize,
    pub files_total: usize,
    /// Most recently finished file, if any.
    #[serde(serialize_with = "lossy_opt_path")]
    pub current_path: Option<PathBuf>,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub tracks: Vec<Track>,
    /// Candidate files the walk handed to extraction.
    pub files_total: usize,
    /// The walk stopped at `max_files` while more audio files remained.
    pub truncated: bool,
    /// Files whose tags could not be read; they appear as filename-only tracks.
    pub unreadable: usize,
    /// Directories skipped because they could not be read.
    pub skipped_dirs: usize,
    /// Cancellation stopped the scan early; `tracks` is partial.
    pub cancelled: bool,
}
