//! Tag dialect detection.
//!
//! The container is sniffed from its leading bytes first; the extension is
//! only consulted when the signature is not recognized.

use std::path::Path;

use lofty::tag::TagType;

/// Number of leading bytes needed by [`TagFormat::sniff`].
pub(crate) const SNIFF_LEN: usize = 16;

const ASF_HEADER_GUID: [u8; 16] = [
    0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C,
];

/// Which family of embedded tags a file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    /// MP3 and raw AAC: ID3v2, with APE and ID3v1 as older fallbacks.
    Id3,
    /// FLAC and Ogg containers.
    VorbisComment,
    /// MP4/M4A `ilst` atoms.
    Mp4Atom,
    /// WAV: RIFF INFO chunk, often alongside an `id3 ` chunk.
    RiffInfo,
    /// Windows Media (ASF). Recognized so it can be reported, not parsed.
    Asf,
}

impl TagFormat {
    /// Detect from file signature, then from extension.
    pub fn detect(path: &Path, header: &[u8]) -> Option<Self> {
        Self::sniff(header).or_else(|| Self::from_extension(path))
    }

    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(b"ID3") {
            return Some(Self::Id3);
        }
        if header.starts_with(b"fLaC") || header.starts_with(b"OggS") {
            return Some(Self::VorbisComment);
        }
        if header.len() >= 8 && &header[4..8] == b"ftyp" {
            return Some(Self::Mp4Atom);
        }
        if header.len() >= 12 && header.starts_with(b"RIFF") && &header[8..12] == b"WAVE" {
            return Some(Self::RiffInfo);
        }
        if header.starts_with(&ASF_HEADER_GUID) {
            return Some(Self::Asf);
        }
        // MPEG audio / ADTS frame sync.
        if header.len() >= 2 && header[0] == 0xFF && header[1] & 0xE0 == 0xE0 {
            return Some(Self::Id3);
        }
        None
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" | "aac" => Some(Self::Id3),
            "flac" | "ogg" | "oga" | "opus" => Some(Self::VorbisComment),
            "m4a" | "m4b" | "mp4" => Some(Self::Mp4Atom),
            "wav" => Some(Self::RiffInfo),
            "wma" | "asf" => Some(Self::Asf),
            _ => None,
        }
    }

    /// Whether lofty can read this container at all.
    pub fn is_readable(self) -> bool {
        !matches!(self, Self::Asf)
    }

    /// Tag types to consult, most authoritative first.
    pub fn preferred_tags(self) -> &'static [TagType] {
        match self {
            Self::Id3 => &[TagType::Id3v2, TagType::Ape, TagType::Id3v1],
            Self::VorbisComment => &[TagType::VorbisComments],
            Self::Mp4Atom => &[TagType::Mp4Ilst],
            Self::RiffInfo => &[TagType::Id3v2, TagType::RiffInfo],
            Self::Asf => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Id3 => "ID3",
            Self::VorbisComment => "Vorbis comments",
            Self::Mp4Atom => "MP4 atoms",
            Self::RiffInfo => "RIFF INFO",
            Self::Asf => "ASF",
        }
    }
}
