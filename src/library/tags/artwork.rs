use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lofty::picture::{Picture, PictureType};
use lofty::tag::Tag;

/// Front cover (or the first picture) from the given tags as a `data:` URL.
pub(crate) fn cover_data_url<'a>(tags: impl IntoIterator<Item = &'a Tag>) -> Option<String> {
    let pictures: Vec<&Picture> = tags.into_iter().flat_map(|t| t.pictures()).collect();

    let picture = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())?;

    if picture.data().is_empty() {
        return None;
    }

    let mime = picture
        .mime_type()
        .map(|m| m.as_str())
        .filter(|m| m.starts_with("image/"))
        .unwrap_or("image/jpeg");

    Some(to_data_url(mime, picture.data()))
}

pub(crate) fn to_data_url(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}
