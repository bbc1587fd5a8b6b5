use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display line for a track according to `fields` and `sep`.
///
/// Fields that are absent on the track are skipped. When nothing remains the
/// filename stem (or the full path) is used.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => non_blank(track.title.as_deref()),
            TrackDisplayField::Artist => non_blank(track.artist.as_deref()),
            TrackDisplayField::Album => non_blank(track.album.as_deref()),
            TrackDisplayField::Genre => non_blank(track.genre.as_deref()),
            TrackDisplayField::Year => track.year.map(|y| y.to_string()),
            TrackDisplayField::Filename => non_blank(
                track
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str()),
            ),
            TrackDisplayField::Path => Some(track.path.display().to_string()),
        };
        if let Some(p) = part {
            parts.push(p);
        }
    }

    if !parts.is_empty() {
        return parts.join(sep);
    }

    track
        .title
        .clone()
        .unwrap_or_else(|| track.path.display().to_string())
}

/// `m:ss`, or `h:mm:ss` for long tracks.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
