#![cfg_attr(docsrs, feature(doc_cfg))]
//! An asynchronous pure Rust client for the YouTube Data API v3.
//!
//! Fetches videos, channels, playlists, comments, captions and more as
//! typed structs, transparently following result pages and splitting
//! over-long ID lists into multiple calls. Decoded resources can fetch
//! the resources they reference directly, e.g.
//! [`YoutubeVideo::fetch_channel`](types::YoutubeVideo::fetch_channel).
//!
//! # Usage
//! ```no_run
//! #[tokio::main]
//! async fn main() -> Result<(), ytdata_rs::Error> {
//!     let api = ytdata_rs::YtData::new("your api key")?;
//!     let video = api.fetch_video("dQw4w9WgXcQ".into()).await?;
//!     println!("{}: {} views", video.title, video.view_count);
//!     Ok(())
//! }
//! ```
//!
//! # Optional Features
//! ## TLS
//! NOTE: reqwest will prefer to utilise default-tls if multiple features
//! are built when using the standard constructors. Use `YtDataBuilder` to
//! ensure the preferred choice.
//! - **default-tls** *(enabled by default)*: Utilises the default TLS
//!   from reqwest.
//! - **native-tls**: Use the native tls backend for reqwest.
//! - **rustls-tls**: Use the rustls tls backend for reqwest.
#[macro_use]
mod utils;
mod builder;
mod context;
mod ops;

pub mod client;
pub mod common;
pub mod enums;
pub mod error;
pub mod extract;
pub mod filters;
pub mod types;

pub use builder::{ClientOptions, YtDataBuilder};
pub use error::{Error, ErrorKind, ResourceKind, Result};
pub use utils::{censor_key, parse_iso8601_duration};

use common::{CaptionId, CategoryId, ChannelId, Handle, PlaylistId, VideoId};
use context::{ApiContext, CallIds};
use enums::CaptionFormat;
use filters::SearchFilter;
use std::path::{Path, PathBuf};
use types::{
    PartialChannel, PlaylistItem, VideoCaption, VideoCategory, YoutubeChannel, YoutubeComment,
    YoutubeCommentThread, YoutubeLanguage, YoutubePlaylist, YoutubeRegion, YoutubeSearchResult,
    YoutubeSubscription, YoutubeVideo,
};

/// A handle to the YouTube Data API. Cheap to clone; every call is an
/// independent future and no state is shared between requests beyond the
/// connection pool.
#[derive(Debug, Clone)]
pub struct YtData {
    ctx: ApiContext,
}

impl YtData {
    /// Construct a handle authorised with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        YtDataBuilder::new().with_api_key(api_key).build()
    }
    /// Construct a handle authorised with an OAuth bearer token obtained
    /// elsewhere. Required for caption downloads.
    pub fn with_bearer_token(token: impl Into<String>) -> Result<Self> {
        YtDataBuilder::new().with_bearer_token(token).build()
    }
    pub fn builder() -> YtDataBuilder {
        YtDataBuilder::new()
    }
    pub(crate) fn from_context(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Fetch a video by its ID.
    pub async fn fetch_video(&self, id: VideoId<'_>) -> Result<YoutubeVideo> {
        let spec = ops::videos(CallIds::Single(id.to_string()));
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch multiple videos at once, in the order requested. Any unknown
    /// ID fails the whole call with a not-found error naming it.
    pub async fn fetch_videos(&self, ids: &[VideoId<'_>]) -> Result<Vec<YoutubeVideo>> {
        let ids = ids.iter().map(VideoId::to_string).collect();
        self.ctx.call_api(ops::videos(CallIds::Batched(ids))).await
    }
    /// Fetch a playlist by its ID.
    pub async fn fetch_playlist(&self, id: PlaylistId<'_>) -> Result<YoutubePlaylist> {
        let spec = ops::playlists(CallIds::Single(id.to_string()));
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch multiple playlists at once, in the order requested.
    pub async fn fetch_playlists(&self, ids: &[PlaylistId<'_>]) -> Result<Vec<YoutubePlaylist>> {
        let ids = ids.iter().map(PlaylistId::to_string).collect();
        self.ctx
            .call_api(ops::playlists(CallIds::Batched(ids)))
            .await
    }
    /// Fetch up to `max_items` entries of a playlist, in playlist order.
    /// With no cap, every page is fetched.
    pub async fn fetch_playlist_items(
        &self,
        playlist_id: PlaylistId<'_>,
        max_items: Option<usize>,
    ) -> Result<Vec<PlaylistItem>> {
        self.ctx
            .call_api(ops::playlist_items(playlist_id.to_string(), max_items))
            .await
    }
    /// Fetch the full video for up to `max_items` entries of a playlist.
    pub async fn fetch_playlist_videos(
        &self,
        playlist_id: PlaylistId<'_>,
        max_items: Option<usize>,
    ) -> Result<Vec<YoutubeVideo>> {
        let items = self.fetch_playlist_items(playlist_id, max_items).await?;
        let ids = items
            .into_iter()
            .map(|item| item.video_id.to_string())
            .collect();
        self.ctx.call_api(ops::videos(CallIds::Batched(ids))).await
    }
    /// Fetch a channel by its ID.
    pub async fn fetch_channel(&self, id: ChannelId<'_>) -> Result<YoutubeChannel> {
        let spec = ops::channels(CallIds::Single(id.to_string()));
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch multiple channels at once, in the order requested.
    pub async fn fetch_channels(&self, ids: &[ChannelId<'_>]) -> Result<Vec<YoutubeChannel>> {
        let ids = ids.iter().map(ChannelId::to_string).collect();
        self.ctx.call_api(ops::channels(CallIds::Batched(ids))).await
    }
    /// Fetch a channel by its handle (e.g. `@youtube`).
    pub async fn fetch_channel_from_handle(&self, handle: Handle<'_>) -> Result<YoutubeChannel> {
        let spec = ops::channel_by_handle(handle.to_string());
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Resolve a handle to its channel ID without fetching the full
    /// channel metadata.
    pub async fn resolve_handle(&self, handle: Handle<'_>) -> Result<PartialChannel> {
        let spec = ops::resolve_handle(handle.to_string());
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch up to `max_comments` comment threads left on a video.
    pub async fn fetch_video_comments(
        &self,
        video_id: VideoId<'_>,
        max_comments: Option<usize>,
    ) -> Result<Vec<YoutubeCommentThread>> {
        self.ctx
            .call_api(ops::video_comment_threads(video_id.to_string(), max_comments))
            .await
    }
    /// Fetch up to `max_comments` comment threads related to a channel.
    pub async fn fetch_channel_comments(
        &self,
        channel_id: ChannelId<'_>,
        max_comments: Option<usize>,
    ) -> Result<Vec<YoutubeCommentThread>> {
        self.ctx
            .call_api(ops::channel_comment_threads(
                channel_id.to_string(),
                max_comments,
            ))
            .await
    }
    /// Fetch a single comment by its ID.
    pub async fn fetch_comment(&self, id: common::CommentId<'_>) -> Result<YoutubeComment> {
        let spec = ops::comments(CallIds::Single(id.to_string()));
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch multiple comments at once, in the order requested.
    pub async fn fetch_comments(
        &self,
        ids: &[common::CommentId<'_>],
    ) -> Result<Vec<YoutubeComment>> {
        let ids = ids.iter().map(common::CommentId::to_string).collect();
        self.ctx.call_api(ops::comments(CallIds::Batched(ids))).await
    }
    /// Fetch up to `max_replies` replies to a comment.
    pub async fn fetch_comment_replies(
        &self,
        comment_id: common::CommentId<'_>,
        max_replies: Option<usize>,
    ) -> Result<Vec<YoutubeComment>> {
        self.ctx
            .call_api(ops::comment_replies(comment_id.to_string(), max_replies))
            .await
    }
    /// Run a search, returning up to `max_results` results.
    pub async fn search(
        &self,
        query: impl Into<String>,
        max_results: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<YoutubeSearchResult>> {
        self.ctx
            .call_api(ops::search(query.into(), max_results, filter))
            .await
    }
    /// Fetch the caption tracks of a video.
    pub async fn fetch_video_captions(&self, video_id: VideoId<'_>) -> Result<Vec<VideoCaption>> {
        self.ctx
            .call_api(ops::video_captions(video_id.to_string()))
            .await
    }
    /// Fetch up to `max_items` of the channels a channel is subscribed to.
    pub async fn fetch_subscriptions(
        &self,
        channel_id: ChannelId<'_>,
        max_items: Option<usize>,
    ) -> Result<Vec<YoutubeSubscription>> {
        self.ctx
            .call_api(ops::subscriptions(channel_id.to_string(), max_items))
            .await
    }
    /// Fetch a video category by its ID.
    pub async fn fetch_video_category(&self, id: CategoryId<'_>) -> Result<VideoCategory> {
        let spec = ops::video_categories(CallIds::Single(id.to_string()));
        Ok(self.ctx.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch multiple video categories at once, in the order requested.
    pub async fn fetch_video_categories(
        &self,
        ids: &[CategoryId<'_>],
    ) -> Result<Vec<VideoCategory>> {
        let ids = ids.iter().map(CategoryId::to_string).collect();
        self.ctx
            .call_api(ops::video_categories(CallIds::Batched(ids)))
            .await
    }
    /// Fetch the regions YouTube is available in, with names in the given
    /// language (defaults to `en_US`).
    pub async fn fetch_youtube_regions(
        &self,
        language: Option<&str>,
    ) -> Result<Vec<YoutubeRegion>> {
        self.ctx
            .call_api(ops::regions(language.unwrap_or("en_US").to_string()))
            .await
    }
    /// Fetch the languages the YouTube site supports, with names in the
    /// given language (defaults to `en_US`).
    pub async fn fetch_youtube_languages(
        &self,
        language: Option<&str>,
    ) -> Result<Vec<YoutubeLanguage>> {
        self.ctx
            .call_api(ops::languages(language.unwrap_or("en_US").to_string()))
            .await
    }
    /// Download a thumbnail image, e.g. one from a
    /// [`ThumbnailSet`](common::ThumbnailSet).
    pub async fn download_thumbnail(&self, url: &str) -> Result<Vec<u8>> {
        self.ctx.download_thumbnail(url).await
    }
    /// Download a thumbnail image and write it to `path`.
    pub async fn save_thumbnail(&self, url: &str, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.ctx.download_thumbnail(url).await?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        Ok(())
    }
    /// Download a channel banner. Returns the image bytes and the file
    /// extension implied by its content type.
    pub async fn download_banner(&self, url: &str) -> Result<(Vec<u8>, String)> {
        self.ctx.download_banner(url).await
    }
    /// Download a channel banner and write it to `path`, appending the
    /// extension implied by the content type when the path has none.
    /// Returns the path written to.
    pub async fn save_banner(&self, url: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
        let (bytes, extension) = self.ctx.download_banner(url).await?;
        let mut path = path.as_ref().to_path_buf();
        if path.extension().is_none() {
            path.set_extension(&extension);
        }
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
    /// Download a caption track, optionally converted to `format` and
    /// translated to `language`. Requires bearer auth from the video
    /// owner.
    pub async fn download_caption(
        &self,
        id: CaptionId<'_>,
        format: Option<CaptionFormat>,
        language: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.ctx
            .download_caption(&id.to_string(), format, language)
            .await
    }
    /// Download a caption track and write it to `path`.
    pub async fn save_caption(
        &self,
        id: CaptionId<'_>,
        path: impl AsRef<Path>,
        format: Option<CaptionFormat>,
        language: Option<&str>,
    ) -> Result<()> {
        let bytes = self.download_caption(id, format, language).await?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        Ok(())
    }
}
