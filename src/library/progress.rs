//! Progress bookkeeping shared by scan workers.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use super::model::ScanProgress;

/// Subscriber invoked with each progress snapshot. Called from worker threads.
pub type ProgressCallback = Arc<dyn Fn(&ScanProgress) + Send + Sync>;

/// Forward snapshots into an `mpsc` channel; a dropped receiver is ignored.
pub fn channel_callback(tx: mpsc::Sender<ScanProgress>) -> ProgressCallback {
    Arc::new(move |p: &ScanProgress| {
        let _ = tx.send(p.clone());
    })
}

struct Emitted {
    last_processed: Option<usize>,
    last_path: Option<PathBuf>,
}

/// Counts finished files and emits snapshots every `interval` files.
///
/// Emission happens under a lock and is skipped when a later count has
/// already been reported, so a subscriber never sees `files_processed` go
/// backwards even though workers finish out of order.
pub(crate) struct ProgressTracker {
    callback: Option<ProgressCallback>,
    interval: usize,
    total: usize,
    processed: AtomicUsize,
    emitted: Mutex<Emitted>,
}

impl ProgressTracker {
    pub(crate) fn new(callback: Option<ProgressCallback>, interval: usize, total: usize) -> Self {
        Self {
            callback,
            interval: interval.max(1),
            total,
            processed: AtomicUsize::new(0),
            emitted: Mutex::new(Emitted {
                last_processed: None,
                last_path: None,
            }),
        }
    }

    pub(crate) fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// Initial snapshot once the total is known.
    pub(crate) fn start(&self) {
        self.emit(0, self.total, None, false);
    }

    /// Record one finished file, emitting on interval boundaries.
    pub(crate) fn file_done(&self, path: &Path) {
        let n = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        if n % self.interval == 0 {
            self.emit(n, self.total, Some(path), false);
        } else if self.callback.is_some() {
            if let Ok(mut state) = self.emitted.lock() {
                state.last_path = Some(path.to_path_buf());
            }
        }
    }

    /// Final snapshot, always delivered. When the scan stopped early the
    /// total is reported as what was actually processed.
    pub(crate) fn finish(&self, stopped_early: bool) {
        let n = self.processed();
        let total = if stopped_early { n } else { self.total };
        self.emit(n, total, None, true);
    }

    fn emit(&self, processed: usize, total: usize, path: Option<&Path>, force: bool) {
        let Some(callback) = self.callback.as_ref() else {
            return;
        };
        let mut state = match self.emitted.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(p) = path {
            state.last_path = Some(p.to_path_buf());
        }

        let newer = match state.last_processed {
            None => true,
            Some(last) if force => processed >= last,
            Some(last) => processed > last,
        };
        if !newer {
            return;
        }

        state.last_processed = Some(processed);
        callback(&ScanProgress {
            files_processed: processed,
            files_total: total,
            current_path: state.last_path.clone(),
        });
    }
}
