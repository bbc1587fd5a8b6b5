use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop signal, polled between files.
///
/// Clones share the same flag; hand one to the scanner and keep one to cancel.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a cancelled scan returns.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Return the tracks collected so far with `cancelled` set on the report.
    #[default]
    ReturnPartial,
    /// Fail with `ScanError::Cancelled`.
    Fail,
}
