//! Re-usable core structures.
// Intended to be for structures that are also suitable to be reused by other
// libraries. As opposed to simply part of the interface.
use crate::utils::constants::{CHANNEL_URL, PLAYLIST_URL, WATCH_URL};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Type safe version of an API resource ID.
pub trait ResourceId<'a> {
    fn get_raw(&self) -> &str;
    fn from_raw<S: Into<Cow<'a, str>>>(raw_str: S) -> Self;
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct VideoId<'a>(Cow<'a, str>);
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct ChannelId<'a>(Cow<'a, str>);
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistId<'a>(Cow<'a, str>);
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct CommentId<'a>(Cow<'a, str>);
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct CaptionId<'a>(Cow<'a, str>);
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct CategoryId<'a>(Cow<'a, str>);
/// A channel handle, e.g. `@youtube`.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct Handle<'a>(Cow<'a, str>);

impl_resource_id!(VideoId<'a>);
impl_resource_id!(ChannelId<'a>);
impl_resource_id!(PlaylistId<'a>);
impl_resource_id!(CommentId<'a>);
impl_resource_id!(CaptionId<'a>);
impl_resource_id!(CategoryId<'a>);
impl_resource_id!(Handle<'a>);

/// Canonical watch page url for a video ID.
pub fn video_url(id: &str) -> String {
    format!("{WATCH_URL}{id}")
}
/// Canonical url for a channel ID.
pub fn channel_url(id: &str) -> String {
    format!("{CHANNEL_URL}{id}")
}
/// Canonical url for a playlist ID.
pub fn playlist_url(id: &str) -> String {
    format!("{PLAYLIST_URL}{id}")
}
/// Watch page url that highlights a specific comment.
pub fn comment_highlight_url(video_id: &str, comment_id: &str) -> String {
    format!("{WATCH_URL}{video_id}&lc={comment_id}")
}

/// A single thumbnail image.
// Width/height are absent for channel thumbnails.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

/// The set of thumbnail sizes the API may provide for a resource. Any or
/// all sizes may be absent.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailSet {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

impl ThumbnailSet {
    /// The largest thumbnail available in the set.
    pub fn highest(&self) -> Option<&Thumbnail> {
        self.maxres
            .as_ref()
            .or(self.standard.as_ref())
            .or(self.high.as_ref())
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
    }
}

/// A title and description pair in a particular language, as found in the
/// `localized` snippet field and the `localizations` map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LocalName {
    pub title: String,
    pub description: Option<String>,
}

/// Translations of a resource's metadata, keyed by BCP-47 language code.
pub type Localizations = BTreeMap<String, LocalName>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonical_urls() {
        assert_eq!(
            video_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(
            comment_highlight_url("dQw4w9WgXcQ", "UgxM"),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=UgxM"
        );
    }
    #[test]
    fn highest_thumbnail_prefers_maxres() {
        let thumb = |url: &str| Thumbnail {
            url: url.to_string(),
            width: Some(120),
            height: Some(90),
        };
        let set = ThumbnailSet {
            default: Some(thumb("default")),
            high: Some(thumb("high")),
            ..Default::default()
        };
        assert_eq!(set.highest().map(|t| t.url.as_str()), Some("high"));
        assert_eq!(ThumbnailSet::default().highest(), None);
    }
}
