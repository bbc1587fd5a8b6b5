use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::{LibrarySettings, ScanSettings, Settings};
use crate::error::{Result, ScanError};

use super::cancel::{CancelPolicy, CancellationToken};
use super::model::{ScanProgress, ScanReport, Track};
use super::progress::{ProgressCallback, ProgressTracker};
use super::tags::{ExtractOptions, TagExtractor};
use super::walk::PathWalker;

/// Walks a library folder and reads every audio file's tags.
///
/// Each call re-walks and re-reads from scratch; nothing is cached between
/// scans. Only an invalid root (or a hard cancellation) fails the call. Bad
/// files come back as filename-only tracks and unreadable directories are
/// skipped.
#[derive(Clone)]
pub struct LibraryScanner {
    library: LibrarySettings,
    extractor: TagExtractor,
    workers: usize,
    progress_interval: usize,
    on_progress: Option<ProgressCallback>,
    cancel: Option<CancellationToken>,
    cancel_policy: CancelPolicy,
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::new(LibrarySettings::default(), &ScanSettings::default())
    }
}

impl LibraryScanner {
    pub fn new(library: LibrarySettings, scan: &ScanSettings) -> Self {
        Self {
            library,
            extractor: TagExtractor::with_options(ExtractOptions::from(scan)),
            workers: scan.worker_count(),
            progress_interval: scan.progress_interval.max(1),
            on_progress: None,
            cancel: None,
            cancel_policy: CancelPolicy::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.library.clone(), &settings.scan)
    }

    /// Number of extraction workers; `1` scans sequentially in walk order.
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress_interval(mut self, every: usize) -> Self {
        self.progress_interval = every.max(1);
        self
    }

    /// Subscribe to progress snapshots.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken, policy: CancelPolicy) -> Self {
        self.cancel = Some(token);
        self.cancel_policy = policy;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn extractor(&self) -> &TagExtractor {
        &self.extractor
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Scan `root` and return every track found.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let started = Instant::now();
        let mut walker = PathWalker::new(root, &self.library)?;
        tracing::info!(
            root = %walker.root().display(),
            workers = self.workers,
            "scanning library"
        );

        let mut paths: Vec<PathBuf> = Vec::new();
        let mut interrupted = false;
        loop {
            if self.is_cancelled() {
                interrupted = true;
                break;
            }
            match walker.next() {
                Some(path) => paths.push(path),
                None => break,
            }
        }

        let tracker =
            ProgressTracker::new(self.on_progress.clone(), self.progress_interval, paths.len());
        tracker.start();

        let unreadable = AtomicUsize::new(0);
        let process = |path: &PathBuf| -> Option<Track> {
            if self.is_cancelled() {
                return None;
            }
            let track = match self.extractor.try_extract(path) {
                Ok(track) => track,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "tag read failed, using filename");
                    unreadable.fetch_add(1, Ordering::Relaxed);
                    self.extractor.fallback(path)
                }
            };
            tracker.file_done(path);
            Some(track)
        };

        let tracks: Vec<Track> = if self.workers <= 1 || paths.len() <= 1 {
            paths.iter().filter_map(&process).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .thread_name(|i| format!("riffle-scan-{i}"))
                .build()
                .map_err(|e| ScanError::WorkerPool(e.to_string()))?;
            pool.install(|| paths.par_iter().filter_map(&process).collect())
        };

        let cancelled = interrupted || tracks.len() < paths.len();
        tracker.finish(cancelled);

        let report = ScanReport {
            files_total: paths.len(),
            truncated: walker.is_truncated(),
            unreadable: unreadable.into_inner(),
            skipped_dirs: walker.skipped_dirs(),
            cancelled,
            tracks,
        };

        tracing::info!(
            tracks = report.tracks.len(),
            unreadable = report.unreadable,
            skipped_dirs = report.skipped_dirs,
            truncated = report.truncated,
            cancelled = report.cancelled,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan finished"
        );

        if cancelled && self.cancel_policy == CancelPolicy::Fail {
            return Err(ScanError::Cancelled {
                processed: report.tracks.len(),
            });
        }
        Ok(report)
    }
}

/// Scan `root` with default settings and return just the tracks.
pub fn scan(root: &Path) -> Result<Vec<Track>> {
    LibraryScanner::default().scan(root).map(|r| r.tracks)
}
