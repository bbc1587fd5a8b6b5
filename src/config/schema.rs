use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/riffle/config.toml` or `~/.config/riffle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RIFFLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub scan: ScanSettings,
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

/// Extensions recognized as audio when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "m4a", "flac", "wav", "ogg", "aac", "wma"];

/// Default recursion cap; also the backstop against symlink cycles.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default cap on the number of audio files a single scan will enumerate.
pub const DEFAULT_MAX_FILES: usize = 50_000;

/// Upper bound for the automatically chosen worker count.
pub const MAX_AUTO_WORKERS: usize = 16;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder scanned when none is given on the command line.
    pub root: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to descend into symlinked directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Cap on directory recursion depth (root is depth 0).
    pub max_depth: Option<usize>,
    /// Cap on the number of audio files enumerated per scan.
    pub max_files: usize,

    /// Which fields to use when printing a track.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
            include_hidden: true,
            recursive: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_files: DEFAULT_MAX_FILES,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Number of extraction workers. `None` picks the number of logical CPUs,
    /// capped at `MAX_AUTO_WORKERS`. `1` scans sequentially in walk order.
    pub concurrency: Option<usize>,
    /// Emit a progress snapshot every this many processed files.
    pub progress_interval: usize,
    /// Clean leading track numbers from fallback titles and guess the artist
    /// from "Artist - Title" filenames.
    pub filename_heuristics: bool,
    /// Attach the front cover as a base64 data URL.
    pub extract_artwork: bool,
    /// Give up on a single file's tags after this many milliseconds.
    pub file_timeout_ms: Option<u64>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: None,
            progress_interval: 50,
            filename_heuristics: false,
            extract_artwork: false,
            file_timeout_ms: None,
        }
    }
}

impl ScanSettings {
    /// Resolve the worker count, honoring an explicit setting.
    pub fn worker_count(&self) -> usize {
        match self.concurrency {
            Some(n) => n.max(1),
            None => num_cpus::get().clamp(1, MAX_AUTO_WORKERS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `riffle=debug`.
    /// `RIFFLE_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One formatted line per track.
    #[default]
    List,
    /// The full scan report as JSON.
    Json,
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Filename,
    Path,
}
