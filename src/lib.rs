//! Local music library scanning.
//!
//! Walk a folder for audio files, read each file's embedded tags into a
//! [`Track`], and report progress while doing it:
//!
//! ```rust,no_run
//! use riffle::{LibraryScanner, ScanProgress};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), riffle::ScanError> {
//! let report = LibraryScanner::default()
//!     .on_progress(|p: &ScanProgress| println!("{}/{}", p.files_processed, p.files_total))
//!     .scan(Path::new("/music"))?;
//! println!("{} tracks, {} unreadable", report.tracks.len(), report.unreadable);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod library;
pub mod runtime;

pub use error::{Result, ScanError, TagError};
pub use library::{
    CancelPolicy, CancellationToken, LibraryScanner, PathWalker, ScanProgress, ScanReport,
    TagExtractor, Track, scan,
};
