use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{self, Settings};
use crate::error::ScanError;
use crate::library::{LibraryScanner, ScanProgress};

mod logging;
mod output;
mod settings;

pub use output::{summary, write_report};

/// Scan the folder named on the command line (or the configured/default one)
/// and print the result to stdout.
pub fn run() -> ExitCode {
    let (settings, config_warning) = settings::load_settings();
    logging::init(&settings.logging.level);
    if let Some(msg) = config_warning {
        tracing::warn!("{msg}");
    }

    let Some(dir) = resolve_root(&settings) else {
        tracing::error!("no folder given and no music folder found");
        eprintln!("usage: riffle [DIR]");
        return ExitCode::from(2);
    };

    let scanner = LibraryScanner::from_settings(&settings).on_progress(log_progress);

    let report = match scanner.scan(&dir) {
        Ok(report) => report,
        Err(e @ ScanError::PathInvalid { .. }) => {
            tracing::error!(error = %e, "cannot scan");
            eprintln!("riffle: {}", e.user_message());
            return ExitCode::from(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "scan failed");
            eprintln!("riffle: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_report(&mut out, &report, &settings) {
        tracing::error!(error = %e, "failed to write results");
        return ExitCode::FAILURE;
    }

    tracing::info!("{}", summary(&report));
    ExitCode::SUCCESS
}

fn resolve_root(settings: &Settings) -> Option<PathBuf> {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.root.clone())
        .or_else(config::default_music_dir)
}

fn log_progress(p: &ScanProgress) {
    match &p.current_path {
        Some(path) => tracing::info!(
            processed = p.files_processed,
            total = p.files_total,
            current = %path.display(),
            "scan progress"
        ),
        None => tracing::info!(
            processed = p.files_processed,
            total = p.files_total,
            "scan progress"
        ),
    }
}
