//! Tag extraction: one audio file in, one `Track` out.
//!
//! The tag dialect (ID3, Vorbis comments, MP4 atoms, RIFF INFO) is picked
//! per file by [`TagFormat`]. Reading never modifies the file.

mod artwork;
mod filename;
mod format;
mod read;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::config::ScanSettings;
use crate::error::TagError;

use super::model::Track;

pub use format::TagFormat;

/// Knobs that change what a single extraction produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub filename_heuristics: bool,
    pub extract_artwork: bool,
    /// Treat a file as unreadable when parsing takes longer than this.
    ///
    /// A parser still running at the deadline keeps its helper thread until
    /// it returns; each stuck file holds one thread for that long.
    pub timeout: Option<Duration>,
}

impl From<&ScanSettings> for ExtractOptions {
    fn from(settings: &ScanSettings) -> Self {
        Self {
            filename_heuristics: settings.filename_heuristics,
            extract_artwork: settings.extract_artwork,
            timeout: settings.file_timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Reads embedded metadata into `Track`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagExtractor {
    options: ExtractOptions,
}

impl TagExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Read `path`, falling back to a filename-only record on any failure.
    pub fn extract(&self, path: &Path) -> Track {
        match self.try_extract(path) {
            Ok(track) => track,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "tag read failed, using filename");
                self.fallback(path)
            }
        }
    }

    /// Read `path`, reporting why tags could not be read.
    pub fn try_extract(&self, path: &Path) -> Result<Track, TagError> {
        let options = self.options;
        match options.timeout {
            None => contain_panic(|| read::read_track(path, options)),
            Some(limit) => {
                let path = path.to_path_buf();
                with_time_limit(limit, move || read::read_track(&path, options))
            }
        }
    }

    /// The degraded record for a file whose tags could not be read.
    pub fn fallback(&self, path: &Path) -> Track {
        read::fallback_track(path, self.options)
    }
}

/// A parser panic on a malformed file becomes a per-file error.
fn contain_panic<F>(read: F) -> Result<Track, TagError>
where
    F: FnOnce() -> Result<Track, TagError>,
{
    panic::catch_unwind(AssertUnwindSafe(read)).unwrap_or_else(|_| Err(TagError::Panicked))
}

// A read stuck past the limit keeps its helper thread; the result is dropped.
fn with_time_limit<F>(limit: Duration, read: F) -> Result<Track, TagError>
where
    F: FnOnce() -> Result<Track, TagError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("riffle-tag-read".to_string())
        .spawn(move || {
            let _ = tx.send(contain_panic(read));
        })?;

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(TagError::Timeout(
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
        Err(RecvTimeoutError::Disconnected) => Err(TagError::Panicked),
    }
}
