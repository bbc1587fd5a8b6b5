//! Guesses from filenames, used only when filename heuristics are enabled.

/// Drop a leading track number like "01 - ", "01. " or "1_".
pub(crate) fn clean_title(stem: &str) -> String {
    let cleaned = stem
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(['-', '.', '_', ' '])
        .trim();

    if cleaned.is_empty() {
        stem.trim().to_string()
    } else {
        cleaned.to_string()
    }
}

/// Take the artist from "Artist - Title" style names.
pub(crate) fn artist_from_stem(stem: &str) -> Option<String> {
    for separator in [" - ", " – ", " _ "] {
        if let Some(idx) = stem.find(separator) {
            let artist = stem[..idx].trim();
            // "01 - Title" is a track number, not an artist.
            if !artist.is_empty() && !artist.chars().all(|c| c.is_ascii_digit()) {
                return Some(artist.to_string());
            }
        }
    }
    None
}
