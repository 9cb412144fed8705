use crate::common::{
    playlist_url, video_url, ChannelId, LocalName, Localizations, PlaylistId, ThumbnailSet, VideoId,
};
use crate::context::{ApiContext, CallIds};
use crate::enums::{PodcastStatus, PrivacyStatus};
use crate::error::Result;
use crate::types::{
    decode, decode_optional, optional_str, optional_timestamp, require, require_count,
    require_str, require_timestamp, FromItem,
};
use crate::{ops, types};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A YouTube playlist and its public metadata.
#[derive(Debug, Clone)]
pub struct YoutubePlaylist {
    /// The raw item this playlist was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: PlaylistId<'static>,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub channel_id: ChannelId<'static>,
    pub channel_title: Option<String>,
    pub title: String,
    pub description: String,
    pub thumbnails: ThumbnailSet,
    pub default_language: Option<String>,
    pub localized: Option<LocalName>,
    pub visibility: PrivacyStatus,
    pub podcast_status: Option<PodcastStatus>,
    pub item_count: u64,
    pub embed_html: String,
    pub localizations: Option<Localizations>,
    context: ApiContext,
}

impl FromItem for YoutubePlaylist {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        let id = require_str(&item, "/id")?;
        for part in ["/snippet", "/status", "/contentDetails", "/player"] {
            require(&item, part)?;
        }
        Ok(YoutubePlaylist {
            etag: require_str(&item, "/etag")?,
            url: playlist_url(&id),
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            channel_id: ChannelId::from(require_str(&item, "/snippet/channelId")?),
            channel_title: optional_str(&item, "/snippet/channelTitle"),
            title: require_str(&item, "/snippet/title")?,
            description: require_str(&item, "/snippet/description")?,
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            default_language: optional_str(&item, "/snippet/defaultLanguage"),
            localized: decode_optional(&item, "/snippet/localized")?,
            visibility: decode(&item, "/status/privacyStatus")?,
            podcast_status: decode_optional(&item, "/status/podcastStatus")?,
            item_count: require_count(&item, "/contentDetails/itemCount")?,
            embed_html: require_str(&item, "/player/embedHtml")?,
            localizations: decode_optional(&item, "/localizations")?,
            id: PlaylistId::from(id),
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubePlaylist {
    /// Fetch up to `max_items` entries of this playlist, in playlist order.
    pub async fn fetch_items(&self, max_items: Option<usize>) -> Result<Vec<PlaylistItem>> {
        let spec = ops::playlist_items(self.id.to_string(), max_items);
        self.context.call_api(spec).await
    }
    /// Fetch the full video for up to `max_items` entries of this playlist.
    pub async fn fetch_videos(&self, max_items: Option<usize>) -> Result<Vec<types::YoutubeVideo>> {
        let items = self.fetch_items(max_items).await?;
        let ids = items.into_iter().map(|item| item.video_id.to_string()).collect();
        let spec = ops::videos(CallIds::Batched(ids));
        self.context.call_api(spec).await
    }
    /// Fetch the channel that owns this playlist.
    pub async fn fetch_channel(&self) -> Result<types::YoutubeChannel> {
        let spec = ops::channels(CallIds::Single(self.channel_id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
}

/// One entry of a playlist. Holds the video reference and where it sits in
/// the playlist, not the full video metadata.
#[derive(Debug, Clone)]
pub struct PlaylistItem {
    /// The raw item this entry was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    /// The ID of the playlist entry itself, not of the video.
    pub id: String,
    pub playlist_id: PlaylistId<'static>,
    pub position: u64,
    pub video_id: VideoId<'static>,
    /// The watch page url of the referenced video.
    pub url: String,
    /// When the video was added to the playlist.
    pub published_at: DateTime<Utc>,
    /// When the referenced video was published. Absent for videos that are
    /// not visible to the caller.
    pub video_published_at: Option<DateTime<Utc>>,
    /// The channel that added the video to the playlist.
    pub channel_id: ChannelId<'static>,
    pub video_owner_channel_id: Option<ChannelId<'static>>,
    pub title: String,
    pub description: String,
    pub thumbnails: ThumbnailSet,
    pub note: Option<String>,
    pub visibility: PrivacyStatus,
    context: ApiContext,
}

impl FromItem for PlaylistItem {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        for part in ["/snippet", "/status", "/contentDetails"] {
            require(&item, part)?;
        }
        let video_id = require_str(&item, "/contentDetails/videoId")?;
        Ok(PlaylistItem {
            etag: require_str(&item, "/etag")?,
            id: require_str(&item, "/id")?,
            playlist_id: PlaylistId::from(require_str(&item, "/snippet/playlistId")?),
            position: require_count(&item, "/snippet/position")?,
            url: video_url(&video_id),
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            video_published_at: optional_timestamp(&item, "/contentDetails/videoPublishedAt")?,
            channel_id: ChannelId::from(require_str(&item, "/snippet/channelId")?),
            video_owner_channel_id: optional_str(&item, "/snippet/videoOwnerChannelId")
                .map(ChannelId::from),
            title: require_str(&item, "/snippet/title")?,
            description: require_str(&item, "/snippet/description")?,
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            note: optional_str(&item, "/contentDetails/note"),
            visibility: decode(&item, "/status/privacyStatus")?,
            video_id: VideoId::from(video_id),
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl PlaylistItem {
    /// Fetch the full video this entry references.
    pub async fn fetch_video(&self) -> Result<types::YoutubeVideo> {
        let spec = ops::videos(CallIds::Single(self.video_id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch the playlist this entry belongs to.
    pub async fn fetch_playlist(&self) -> Result<YoutubePlaylist> {
        let spec = ops::playlists(CallIds::Single(self.playlist_id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch the channel that uploaded the referenced video, when known.
    pub async fn fetch_video_owner_channel(&self) -> Result<Option<types::YoutubeChannel>> {
        let Some(owner) = &self.video_owner_channel_id else {
            return Ok(None);
        };
        let spec = ops::channels(CallIds::Single(owner.to_string()));
        Ok(Some(self.context.call_api(spec).await?.swap_remove(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::test_support::{context, CALL_URL};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn playlist_item_item() -> Value {
        json!({
            "etag": "etag-3",
            "id": "UEx3WmNJMHpuLUpoZVJodjdqSVY1RGw2SUpRVHVIUjVlLg",
            "snippet": {
                "publishedAt": "2023-06-01T10:00:00Z",
                "channelId": "UC1VSDiiRQZRTbxNvWhIrJfw",
                "title": "Never Gonna Give You Up",
                "description": "the original",
                "thumbnails": {},
                "playlistId": "PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-",
                "position": 2,
                "videoOwnerChannelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
            },
            "contentDetails": {
                "videoId": "dQw4w9WgXcQ",
                "videoPublishedAt": "2009-10-25T06:57:33Z",
            },
            "status": {"privacyStatus": "public"},
        })
    }

    #[test]
    fn playlist_items_decode() {
        let entry = PlaylistItem::from_item(playlist_item_item(), CALL_URL, &context()).unwrap();
        assert_eq!(entry.position, 2);
        assert_eq!(entry.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(
            entry.playlist_id,
            PlaylistId::from("PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-")
        );
        assert_eq!(entry.visibility, PrivacyStatus::Public);
    }
    #[test]
    fn playlist_items_require_a_video_reference() {
        let mut item = playlist_item_item();
        item["contentDetails"].as_object_mut().unwrap().remove("videoId");
        let error = PlaylistItem::from_item(item, CALL_URL, &context()).unwrap_err();
        match error.into_kind() {
            ErrorKind::MissingData { field, .. } => {
                assert_eq!(field, "/contentDetails/videoId");
            }
            other => panic!("expected missing data, got {other}"),
        }
    }
    #[test]
    fn playlists_decode() {
        let item = json!({
            "etag": "etag-4",
            "id": "PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-",
            "snippet": {
                "publishedAt": "2023-06-01T10:00:00Z",
                "channelId": "UC1VSDiiRQZRTbxNvWhIrJfw",
                "channelTitle": "Example Channel",
                "title": "Bangers",
                "description": "",
                "thumbnails": {},
            },
            "status": {"privacyStatus": "unlisted", "podcastStatus": "disabled"},
            "contentDetails": {"itemCount": 17},
            "player": {"embedHtml": "<iframe></iframe>"},
        });
        let playlist = YoutubePlaylist::from_item(item, CALL_URL, &context()).unwrap();
        assert_eq!(
            playlist.url,
            "https://www.youtube.com/playlist?list=PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-"
        );
        assert_eq!(playlist.item_count, 17);
        assert_eq!(playlist.visibility, PrivacyStatus::Unlisted);
        assert_eq!(playlist.podcast_status, Some(PodcastStatus::Disabled));
    }
}
