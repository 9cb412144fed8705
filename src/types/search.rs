use crate::common::{channel_url, playlist_url, video_url, ChannelId, ThumbnailSet};
use crate::context::{ApiContext, CallIds};
use crate::enums::LiveBroadcastContent;
use crate::error::{Error, Result};
use crate::filters::SearchResultKind;
use crate::types::{
    decode_optional, optional_str, optional_timestamp, require_str, FromItem,
};
use crate::{ops, types};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// One result of a search call. Carries the summary snippet only; use the
/// fetch methods to expand it into the full resource.
#[derive(Debug, Clone)]
pub struct YoutubeSearchResult {
    /// The raw item this result was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub kind: SearchResultKind,
    /// The ID of the matched video, channel or playlist.
    pub id: String,
    /// The canonical url of the matched resource.
    pub url: String,
    pub title: String,
    pub description: String,
    pub thumbnails: ThumbnailSet,
    pub channel_id: Option<ChannelId<'static>>,
    pub channel_title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub live_broadcast_content: Option<LiveBroadcastContent>,
    context: ApiContext,
}

impl FromItem for YoutubeSearchResult {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        // The result kind arrives as e.g. "youtube#video", and the matching
        // ID under a kind-specific key ("videoId", ...).
        let kind_token = require_str(&item, "/id/kind")?;
        let kind_token = kind_token
            .split_once('#')
            .map(|(_, kind)| kind)
            .unwrap_or(&kind_token);
        let kind: SearchResultKind =
            serde_json::from_value(Value::String(kind_token.to_string()))
                .map_err(|_| super::field_error(&item, "/id/kind"))?;
        let (id_pointer, url_for): (&str, fn(&str) -> String) = match kind {
            SearchResultKind::Video => ("/id/videoId", video_url),
            SearchResultKind::Channel => ("/id/channelId", channel_url),
            SearchResultKind::Playlist => ("/id/playlistId", playlist_url),
        };
        let id = require_str(&item, id_pointer)?;
        Ok(YoutubeSearchResult {
            etag: require_str(&item, "/etag")?,
            kind,
            url: url_for(&id),
            title: require_str(&item, "/snippet/title")?,
            description: require_str(&item, "/snippet/description")?,
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            channel_id: optional_str(&item, "/snippet/channelId").map(ChannelId::from),
            channel_title: optional_str(&item, "/snippet/channelTitle"),
            published_at: optional_timestamp(&item, "/snippet/publishedAt")?,
            live_broadcast_content: decode_optional(&item, "/snippet/liveBroadcastContent")?,
            id,
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubeSearchResult {
    fn expect_kind(&self, expected: SearchResultKind) -> Result<()> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "search result {} is a {}, not a {}",
                self.id, self.kind, expected
            )))
        }
    }
    /// Fetch the full video this result matched. Fails unless the result
    /// is a video.
    pub async fn fetch_video(&self) -> Result<types::YoutubeVideo> {
        self.expect_kind(SearchResultKind::Video)?;
        let spec = ops::videos(CallIds::Single(self.id.clone()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch the full channel this result matched. Fails unless the result
    /// is a channel.
    pub async fn fetch_channel(&self) -> Result<types::YoutubeChannel> {
        self.expect_kind(SearchResultKind::Channel)?;
        let spec = ops::channels(CallIds::Single(self.id.clone()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch the full playlist this result matched. Fails unless the
    /// result is a playlist.
    pub async fn fetch_playlist(&self) -> Result<types::YoutubePlaylist> {
        self.expect_kind(SearchResultKind::Playlist)?;
        let spec = ops::playlists(CallIds::Single(self.id.clone()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
}
