use crate::common::{CaptionId, VideoId};
use crate::context::ApiContext;
use crate::enums::{
    AudioTrackType, CaptionFailureReason, CaptionFormat, CaptionStatus, CaptionTrackKind,
};
use crate::error::Result;
use crate::types::{
    decode, decode_optional, require, require_bool, require_str, require_timestamp, FromItem,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A caption track of a video.
#[derive(Debug, Clone)]
pub struct VideoCaption {
    /// The raw item this track was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: CaptionId<'static>,
    pub video_id: VideoId<'static>,
    pub last_updated: DateTime<Utc>,
    pub track_kind: CaptionTrackKind,
    /// BCP-47 tag of the caption language.
    pub language: String,
    pub name: String,
    pub audio_track_type: Option<AudioTrackType>,
    pub is_cc: bool,
    pub is_large: bool,
    pub is_easy_reader: bool,
    pub is_draft: bool,
    pub is_auto_synced: bool,
    pub status: Option<CaptionStatus>,
    pub failure_reason: Option<CaptionFailureReason>,
    context: ApiContext,
}

impl FromItem for VideoCaption {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        require(&item, "/snippet")?;
        Ok(VideoCaption {
            etag: require_str(&item, "/etag")?,
            id: CaptionId::from(require_str(&item, "/id")?),
            video_id: VideoId::from(require_str(&item, "/snippet/videoId")?),
            last_updated: require_timestamp(&item, "/snippet/lastUpdated")?,
            track_kind: decode(&item, "/snippet/trackKind")?,
            language: require_str(&item, "/snippet/language")?,
            name: require_str(&item, "/snippet/name")?,
            audio_track_type: decode_optional(&item, "/snippet/audioTrackType")?,
            is_cc: require_bool(&item, "/snippet/isCC")?,
            is_large: require_bool(&item, "/snippet/isLarge")?,
            is_easy_reader: require_bool(&item, "/snippet/isEasyReader")?,
            is_draft: require_bool(&item, "/snippet/isDraft")?,
            is_auto_synced: require_bool(&item, "/snippet/isAutoSynced")?,
            status: decode_optional(&item, "/snippet/status")?,
            failure_reason: decode_optional(&item, "/snippet/failureReason")?,
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl VideoCaption {
    /// Download this caption track, optionally converted to `format` and
    /// translated to `language`. Requires bearer auth from the video owner.
    pub async fn download(
        &self,
        format: Option<CaptionFormat>,
        language: Option<&str>,
    ) -> Result<Vec<u8>> {
        self.context
            .download_caption(&self.id.to_string(), format, language)
            .await
    }
    /// Download this caption track and write it to `path`. Returns the
    /// path written to.
    pub async fn save(
        &self,
        path: impl AsRef<Path>,
        format: Option<CaptionFormat>,
        language: Option<&str>,
    ) -> Result<PathBuf> {
        let bytes = self.download(format, language).await?;
        let path = path.as_ref().to_path_buf();
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}
