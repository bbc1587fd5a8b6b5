use std::io::{self, Write};

use crate::config::{OutputFormat, Settings};
use crate::library::{ScanReport, display_from_fields, format_duration};

/// Write the report to `out` in the configured format.
pub fn write_report(out: &mut impl Write, report: &ScanReport, settings: &Settings) -> io::Result<()> {
    match settings.output.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        OutputFormat::List => {
            for track in &report.tracks {
                let line = display_from_fields(
                    track,
                    &settings.library.display_fields,
                    &settings.library.display_separator,
                );
                match track.duration {
                    Some(d) => writeln!(out, "{line} [{}]", format_duration(d))?,
                    None => writeln!(out, "{line}")?,
                }
            }
            Ok(())
        }
    }
}

/// One-line summary for the end of a scan, e.g. for a status bar.
pub fn summary(report: &ScanReport) -> String {
    let mut parts = vec![format!("{} tracks", report.tracks.len())];
    if report.unreadable > 0 {
        parts.push(format!("{} files could not be fully read", report.unreadable));
    }
    if report.skipped_dirs > 0 {
        parts.push(format!("{} folders skipped", report.skipped_dirs));
    }
    if report.truncated {
        parts.push("file limit reached".to_string());
    }
    if report.cancelled {
        parts.push("cancelled".to_string());
    }
    parts.join(", ")
}
