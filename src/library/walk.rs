use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;
use crate::error::{Result, ScanError};

/// Lazily yields absolute paths of audio files under a root directory.
///
/// The walk never follows a symlinked directory unless `follow_links` is set
/// (walkdir then reports loops as errors), and `max_depth` bounds recursion
/// either way. Unreadable directories are logged and skipped. Once
/// `max_files` paths have been yielded the walker stops and, if another
/// candidate existed, reports itself truncated.
///
/// Not restartable: build a new walker to walk again.
pub struct PathWalker {
    root: PathBuf,
    entries: Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + Send>,
    extensions: Vec<String>,
    max_files: usize,
    yielded: usize,
    skipped_dirs: usize,
    truncated: bool,
    done: bool,
}

impl PathWalker {
    /// Validate `root` and prepare a walk over it.
    pub fn new(root: &Path, settings: &LibrarySettings) -> Result<Self> {
        let root = validate_root(root)?;

        let mut walker = WalkDir::new(&root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();

        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let include_hidden = settings.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(move |e| include_hidden || e.depth() == 0 || !is_hidden(e.path()));

        Ok(Self {
            root,
            entries: Box::new(entries),
            extensions: normalize_extensions(&settings.extensions),
            max_files: settings.max_files,
            yielded: 0,
            skipped_dirs: 0,
            truncated: false,
            done: false,
        })
    }

    /// The canonical root being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the walk stopped at `max_files` with files left over.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of entries (almost always directories) that could not be read.
    pub fn skipped_dirs(&self) -> usize {
        self.skipped_dirs
    }

    /// Number of paths yielded so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    fn record_skip(&mut self, err: &walkdir::Error) {
        self.skipped_dirs += 1;
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if let Some(ancestor) = err.loop_ancestor() {
            tracing::warn!(
                path = %path,
                ancestor = %ancestor.display(),
                "symlink loop detected, not descending"
            );
        } else if err.io_error().map(io::Error::kind) == Some(io::ErrorKind::PermissionDenied) {
            tracing::warn!(path = %path, "permission denied, skipping");
        } else {
            tracing::warn!(path = %path, error = %err, "unreadable entry, skipping");
        }
    }
}

impl Iterator for PathWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.done {
            return None;
        }

        loop {
            let entry = match self.entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    self.record_skip(&err);
                    continue;
                }
                None => {
                    self.done = true;
                    return None;
                }
            };

            // `is_file` follows symlinks, so linked regular files count as files.
            let path = entry.path();
            if !path.is_file() || !is_audio_file(path, &self.extensions) {
                continue;
            }

            if self.yielded >= self.max_files {
                self.truncated = true;
                self.done = true;
                tracing::warn!(
                    root = %self.root.display(),
                    max_files = self.max_files,
                    "file cap reached, library truncated"
                );
                return None;
            }

            self.yielded += 1;
            return Some(entry.into_path());
        }
    }
}

/// Resolve `root` to an absolute directory that can be listed.
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    let canonical = root
        .canonicalize()
        .map_err(|e| ScanError::path_invalid(root, e.to_string()))?;

    if !canonical.is_dir() {
        return Err(ScanError::path_invalid(root, "not a directory"));
    }

    fs::read_dir(&canonical).map_err(|e| ScanError::path_invalid(root, e.to_string()))?;

    Ok(canonical)
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Case-insensitive extension check against already-normalized extensions.
pub(crate) fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
