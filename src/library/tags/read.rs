//! Read embedded tags with lofty and convert them into a `Track`.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};

use super::super::model::{Track, file_stem_title};
use super::artwork::cover_data_url;
use super::filename::{artist_from_stem, clean_title};
use super::format::{SNIFF_LEN, TagFormat};
use super::ExtractOptions;
use crate::error::TagError;

pub(crate) fn read_track(path: &Path, options: ExtractOptions) -> Result<Track, TagError> {
    if !path.is_file() {
        return Err(TagError::NotAFile(path.to_path_buf()));
    }

    let mut file = File::open(path)?;
    let header = read_header(&mut file)?;
    let format = TagFormat::detect(path, &header).ok_or_else(|| {
        TagError::UnsupportedFormat(
            path.extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unknown".to_string()),
        )
    })?;
    if !format.is_readable() {
        return Err(TagError::UnsupportedFormat(format.name().to_string()));
    }

    file.rewind()?;
    let tagged = Probe::new(BufReader::new(file))
        .guess_file_type()?
        .read()?;

    // Dialect-preferred tags first, then anything else the file carries.
    let mut tags: Vec<&Tag> = format
        .preferred_tags()
        .iter()
        .filter_map(|t| tagged.tag(*t))
        .collect();
    for tag in tagged.tags() {
        if !tags.iter().any(|t| t.tag_type() == tag.tag_type()) {
            tags.push(tag);
        }
    }

    let duration = tagged.properties().duration();

    let mut track = Track {
        path: path.to_path_buf(),
        title: first_text(&tags, |t| t.title()),
        artist: first_text(&tags, |t| t.artist()),
        album: first_text(&tags, |t| t.album()),
        duration: (!duration.is_zero()).then(|| duration.as_secs_f64()),
        year: tags.iter().find_map(|t| tag_year(t)),
        genre: first_text(&tags, |t| t.genre()),
        album_art: None,
    };

    if options.extract_artwork {
        track.album_art = cover_data_url(tags.iter().copied());
    }

    fill_from_filename(&mut track, options);
    Ok(track)
}

/// The record used when tags cannot be read at all.
pub(crate) fn fallback_track(path: &Path, options: ExtractOptions) -> Track {
    let mut track = Track::from_path(path);
    if options.filename_heuristics {
        track.title = None;
    }
    fill_from_filename(&mut track, options);
    track
}

fn fill_from_filename(track: &mut Track, options: ExtractOptions) {
    let stem = file_stem_title(&track.path);

    if track.title.is_none() {
        track.title = if options.filename_heuristics {
            stem.as_deref().map(clean_title)
        } else {
            stem.clone()
        };
    }

    if options.filename_heuristics && track.artist.is_none() {
        track.artist = stem.as_deref().and_then(artist_from_stem);
    }
}

fn read_header(file: &mut File) -> Result<Vec<u8>, TagError> {
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}

fn first_text<'a, F>(tags: &[&'a Tag], get: F) -> Option<String>
where
    F: Fn(&'a Tag) -> Option<Cow<'a, str>>,
{
    tags.iter().find_map(|t| clean_text(get(*t)))
}

fn clean_text(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().trim_matches('\0').trim().to_string())
        .filter(|v| !v.is_empty())
}

fn tag_year(tag: &Tag) -> Option<i32> {
    tag.year()
        .filter(|y| *y > 0)
        .and_then(|y| i32::try_from(y).ok())
        .or_else(|| tag.get_string(&ItemKey::RecordingDate).and_then(leading_year))
}

/// "2019", "2019-05-01" and "2019/05" all yield 2019.
pub(crate) fn leading_year(s: &str) -> Option<i32> {
    let s = s.trim();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok().filter(|y| *y > 0)
}
