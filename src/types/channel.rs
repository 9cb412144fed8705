use crate::common::{
    channel_url, playlist_url, ChannelId, LocalName, Localizations, PlaylistId, ThumbnailSet,
    VideoId,
};
use crate::common::ResourceId;
use crate::context::{ApiContext, CallIds};
use crate::enums::{LongUploadsStatus, PrivacyStatus};
use crate::error::{Error, Result};
use crate::types::{
    decode, decode_optional, optional_bool, optional_str, optional_timestamp, require,
    require_bool, require_count, require_str, require_timestamp, FromItem,
};
use crate::{ops, types};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};

// Branding keywords come as one space-separated string where multi-word
// keywords are double quoted.
fn split_keywords(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in raw.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// A YouTube channel and its public metadata.
#[derive(Debug, Clone)]
pub struct YoutubeChannel {
    /// The raw item this channel was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: ChannelId<'static>,
    pub url: String,
    pub title: String,
    pub description: Option<String>,
    /// The channel's custom url, i.e. its handle.
    pub custom_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub thumbnails: ThumbnailSet,
    pub default_language: Option<String>,
    pub localized: Option<LocalName>,
    pub country: Option<String>,
    pub likes_playlist_id: Option<PlaylistId<'static>>,
    pub uploads_playlist_id: Option<PlaylistId<'static>>,
    pub view_count: u64,
    /// Rounded to three significant figures by the API.
    pub subscriber_count: u64,
    pub hidden_subscriber_count: bool,
    pub video_count: u64,
    pub topic_categories: Option<Vec<String>>,
    pub visibility: PrivacyStatus,
    pub is_linked: bool,
    pub long_uploads_status: LongUploadsStatus,
    pub made_for_kids: Option<bool>,
    pub self_declared_made_for_kids: Option<bool>,
    pub keywords: Option<Vec<String>>,
    pub tracking_analytics_account_id: Option<String>,
    pub moderate_comments: Option<bool>,
    pub unsubscribed_trailer_id: Option<VideoId<'static>>,
    pub banner_url: Option<String>,
    pub content_owner: Option<String>,
    pub time_linked: Option<DateTime<Utc>>,
    pub localizations: Option<Localizations>,
    context: ApiContext,
}

impl FromItem for YoutubeChannel {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        let id = require_str(&item, "/id")?;
        for part in [
            "/snippet",
            "/contentDetails",
            "/status",
            "/statistics",
            "/brandingSettings",
        ] {
            require(&item, part)?;
        }
        Ok(YoutubeChannel {
            etag: require_str(&item, "/etag")?,
            url: channel_url(&id),
            title: require_str(&item, "/snippet/title")?,
            description: optional_str(&item, "/snippet/description").filter(|d| !d.is_empty()),
            custom_url: optional_str(&item, "/snippet/customUrl"),
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            default_language: optional_str(&item, "/snippet/defaultLanguage"),
            localized: decode_optional(&item, "/snippet/localized")?,
            country: optional_str(&item, "/snippet/country"),
            likes_playlist_id: optional_str(&item, "/contentDetails/relatedPlaylists/likes")
                .filter(|id| !id.is_empty())
                .map(PlaylistId::from),
            uploads_playlist_id: optional_str(&item, "/contentDetails/relatedPlaylists/uploads")
                .filter(|id| !id.is_empty())
                .map(PlaylistId::from),
            view_count: require_count(&item, "/statistics/viewCount")?,
            subscriber_count: require_count(&item, "/statistics/subscriberCount")?,
            hidden_subscriber_count: require_bool(&item, "/statistics/hiddenSubscriberCount")?,
            video_count: require_count(&item, "/statistics/videoCount")?,
            topic_categories: decode_optional(&item, "/topicDetails/topicCategories")?,
            visibility: decode(&item, "/status/privacyStatus")?,
            is_linked: require_bool(&item, "/status/isLinked")?,
            long_uploads_status: decode(&item, "/status/longUploadsStatus")?,
            made_for_kids: optional_bool(&item, "/status/madeForKids"),
            self_declared_made_for_kids: optional_bool(&item, "/status/selfDeclaredMadeForKids"),
            keywords: optional_str(&item, "/brandingSettings/channel/keywords")
                .map(|raw| split_keywords(&raw)),
            tracking_analytics_account_id: optional_str(
                &item,
                "/brandingSettings/channel/trackingAnalyticsAccountId",
            ),
            moderate_comments: optional_bool(&item, "/brandingSettings/channel/moderateComments"),
            unsubscribed_trailer_id: optional_str(
                &item,
                "/brandingSettings/channel/unsubscribedTrailer",
            )
            .map(VideoId::from),
            banner_url: optional_str(&item, "/brandingSettings/image/bannerExternalUrl"),
            content_owner: optional_str(&item, "/contentOwnerDetails/contentOwner"),
            time_linked: optional_timestamp(&item, "/contentOwnerDetails/timeLinked")?,
            localizations: decode_optional(&item, "/localizations")?,
            id: ChannelId::from(id),
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubeChannel {
    /// The url of the playlist containing the channel's liked videos.
    pub fn likes_url(&self) -> Option<String> {
        self.likes_playlist_id.as_ref().map(|id| playlist_url(id.get_raw()))
    }
    /// The url of the playlist containing the channel's uploads.
    pub fn uploads_url(&self) -> Option<String> {
        self.uploads_playlist_id
            .as_ref()
            .map(|id| playlist_url(id.get_raw()))
    }
    pub fn unsubscribed_trailer_url(&self) -> Option<String> {
        self.unsubscribed_trailer_id
            .as_ref()
            .map(|id| crate::common::video_url(id.get_raw()))
    }
    /// Fetch up to `max_items` of the channel's uploaded videos.
    pub async fn fetch_uploads(
        &self,
        max_items: Option<usize>,
    ) -> Result<Vec<types::PlaylistItem>> {
        let uploads = self
            .uploads_playlist_id
            .as_ref()
            .ok_or_else(|| Error::invalid_input("channel has no uploads playlist"))?;
        let spec = ops::playlist_items(uploads.to_string(), max_items);
        self.context.call_api(spec).await
    }
    /// Fetch up to `max_comments` comment threads related to the channel.
    pub async fn fetch_comments(
        &self,
        max_comments: Option<usize>,
    ) -> Result<Vec<types::YoutubeCommentThread>> {
        let spec = ops::channel_comment_threads(self.id.to_string(), max_comments);
        self.context.call_api(spec).await
    }
    /// Download the channel's banner image. Returns the image bytes and the
    /// file extension implied by its content type.
    pub async fn download_banner(&self) -> Result<(Vec<u8>, String)> {
        let url = self
            .banner_url
            .as_deref()
            .ok_or_else(|| Error::invalid_input("channel has no banner"))?;
        self.context.download_banner(url).await
    }
    /// Download the channel's banner and write it to `path`, appending the
    /// extension implied by the content type when the path has none.
    /// Returns the path written to.
    pub async fn save_banner(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let (bytes, extension) = self.download_banner().await?;
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension(&extension);
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// A channel reference holding only the channel ID, as returned by handle
/// resolution. Upgrade to a full [`YoutubeChannel`] with
/// [`fetch`](Self::fetch).
#[derive(Debug, Clone)]
pub struct PartialChannel {
    /// The raw item this reference was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub id: ChannelId<'static>,
    context: ApiContext,
}

impl FromItem for PartialChannel {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        Ok(PartialChannel {
            id: ChannelId::from(require_str(&item, "/id")?),
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl PartialChannel {
    pub fn url(&self) -> String {
        channel_url(self.id.get_raw())
    }
    /// Fetch the full channel this reference points at.
    pub async fn fetch(&self) -> Result<YoutubeChannel> {
        let spec = ops::channels(CallIds::Single(self.id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::{context, CALL_URL};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn channel_item() -> Value {
        json!({
            "etag": "etag-2",
            "id": "UC1VSDiiRQZRTbxNvWhIrJfw",
            "snippet": {
                "title": "Example Channel",
                "description": "",
                "customUrl": "@example",
                "publishedAt": "2012-03-01T00:00:00Z",
                "thumbnails": {},
                "country": "GB",
            },
            "contentDetails": {
                "relatedPlaylists": {
                    "likes": "",
                    "uploads": "UU1VSDiiRQZRTbxNvWhIrJfw",
                }
            },
            "statistics": {
                "viewCount": "12345678",
                "subscriberCount": "321000",
                "hiddenSubscriberCount": false,
                "videoCount": "444",
            },
            "status": {
                "privacyStatus": "public",
                "isLinked": true,
                "longUploadsStatus": "longUploadsUnspecified",
                "madeForKids": false,
            },
            "brandingSettings": {
                "channel": {
                    "title": "Example Channel",
                    "keywords": "music \"music videos\" live",
                    "unsubscribedTrailer": "dQw4w9WgXcQ",
                },
                "image": {
                    "bannerExternalUrl": "https://yt3.googleusercontent.com/banner",
                }
            },
        })
    }

    #[test]
    fn channels_decode() {
        let channel = YoutubeChannel::from_item(channel_item(), CALL_URL, &context()).unwrap();
        assert_eq!(
            channel.url,
            "https://www.youtube.com/channel/UC1VSDiiRQZRTbxNvWhIrJfw"
        );
        // An empty likes entry means no likes playlist.
        assert_eq!(channel.likes_playlist_id, None);
        assert_eq!(
            channel.uploads_url().as_deref(),
            Some("https://www.youtube.com/playlist?list=UU1VSDiiRQZRTbxNvWhIrJfw")
        );
        assert_eq!(channel.description, None);
        assert_eq!(
            channel.keywords,
            Some(vec![
                "music".to_string(),
                "music videos".to_string(),
                "live".to_string(),
            ])
        );
        assert_eq!(
            channel.unsubscribed_trailer_url().as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        assert_eq!(channel.long_uploads_status, LongUploadsStatus::LongUploadsUnspecified);
    }
    #[test]
    fn partial_channels_only_need_an_id() {
        let item = json!({"kind": "youtube#channel", "etag": "e", "id": "UC1VSDiiRQZRTbxNvWhIrJfw"});
        let channel = PartialChannel::from_item(item, CALL_URL, &context()).unwrap();
        assert_eq!(
            channel.url(),
            "https://www.youtube.com/channel/UC1VSDiiRQZRTbxNvWhIrJfw"
        );
    }
}
