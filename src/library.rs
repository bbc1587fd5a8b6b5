//! Local music library scanning.
//!
//! [`PathWalker`] finds audio files, [`TagExtractor`] turns each one into a
//! [`Track`], and [`LibraryScanner`] runs both across a worker pool while
//! reporting [`ScanProgress`].

mod cancel;
mod display;
mod model;
mod progress;
mod scan;
mod tags;
mod walk;

pub use cancel::{CancelPolicy, CancellationToken};
pub use display::{display_from_fields, format_duration};
pub use model::{ScanProgress, ScanReport, Track};
pub use progress::{ProgressCallback, channel_callback};
pub use scan::{LibraryScanner, scan};
pub use tags::{ExtractOptions, TagExtractor, TagFormat};
pub use walk::{PathWalker, validate_root};
