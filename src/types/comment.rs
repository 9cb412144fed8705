use crate::common::{comment_highlight_url, ChannelId, CommentId, VideoId};
use crate::context::{ApiContext, CallIds};
use crate::error::Result;
use crate::types::{
    optional, optional_str, require, require_bool, require_count, require_str, require_timestamp,
    FromItem,
};
use crate::{ops, types};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single comment, either top level or a reply.
#[derive(Debug, Clone)]
pub struct YoutubeComment {
    /// The raw item this comment was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: CommentId<'static>,
    /// The video commented on. Absent when the comment came from a channel
    /// level listing.
    pub video_id: Option<VideoId<'static>>,
    /// The parent comment, set on replies only.
    pub parent_id: Option<CommentId<'static>>,
    pub author_display_name: String,
    pub author_profile_image_url: Option<String>,
    pub author_channel_url: Option<String>,
    pub author_channel_id: Option<ChannelId<'static>>,
    /// The comment text as rendered (may contain HTML).
    pub text_display: String,
    /// The raw comment text, when the API provides it.
    pub text_original: Option<String>,
    pub can_rate: bool,
    pub like_count: u64,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    context: ApiContext,
}

impl FromItem for YoutubeComment {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        require(&item, "/snippet")?;
        Ok(YoutubeComment {
            etag: require_str(&item, "/etag")?,
            id: CommentId::from(require_str(&item, "/id")?),
            video_id: optional_str(&item, "/snippet/videoId").map(VideoId::from),
            parent_id: optional_str(&item, "/snippet/parentId").map(CommentId::from),
            author_display_name: require_str(&item, "/snippet/authorDisplayName")?,
            author_profile_image_url: optional_str(&item, "/snippet/authorProfileImageUrl"),
            author_channel_url: optional_str(&item, "/snippet/authorChannelUrl"),
            author_channel_id: optional_str(&item, "/snippet/authorChannelId/value")
                .map(ChannelId::from),
            text_display: require_str(&item, "/snippet/textDisplay")?,
            text_original: optional_str(&item, "/snippet/textOriginal"),
            can_rate: require_bool(&item, "/snippet/canRate")?,
            like_count: require_count(&item, "/snippet/likeCount")?,
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            updated_at: require_timestamp(&item, "/snippet/updatedAt")?,
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubeComment {
    /// The watch page url that scrolls to and highlights this comment.
    /// Only available when the video the comment was left on is known.
    pub fn highlight_url(&self) -> Option<String> {
        self.video_id
            .as_ref()
            .map(|video| comment_highlight_url(&video.to_string(), &self.id.to_string()))
    }
    /// Fetch up to `max_replies` replies to this comment.
    pub async fn fetch_replies(
        &self,
        max_replies: Option<usize>,
    ) -> Result<Vec<YoutubeComment>> {
        let spec = ops::comment_replies(self.id.to_string(), max_replies);
        self.context.call_api(spec).await
    }
    /// Fetch the video this comment was left on, when known.
    pub async fn fetch_video(&self) -> Result<Option<types::YoutubeVideo>> {
        let Some(video_id) = &self.video_id else {
            return Ok(None);
        };
        let spec = ops::videos(CallIds::Single(video_id.to_string()));
        Ok(Some(self.context.call_api(spec).await?.swap_remove(0)))
    }
    /// Fetch the comment author's channel, when known.
    pub async fn fetch_author_channel(&self) -> Result<Option<types::YoutubeChannel>> {
        let Some(author) = &self.author_channel_id else {
            return Ok(None);
        };
        let spec = ops::channels(CallIds::Single(author.to_string()));
        Ok(Some(self.context.call_api(spec).await?.swap_remove(0)))
    }
}

/// A top level comment together with its reply metadata.
#[derive(Debug, Clone)]
pub struct YoutubeCommentThread {
    /// The raw item this thread was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: CommentId<'static>,
    pub video_id: Option<VideoId<'static>>,
    pub channel_id: Option<ChannelId<'static>>,
    pub top_level_comment: YoutubeComment,
    pub can_reply: bool,
    pub total_reply_count: u64,
    pub is_public: bool,
    /// The replies included with the thread. This may be a subset; fetch
    /// the full list through the top level comment when the count says
    /// there are more.
    pub replies: Option<Vec<YoutubeComment>>,
}

impl FromItem for YoutubeCommentThread {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        let top_level = require(&item, "/snippet/topLevelComment")?.clone();
        let replies = match optional(&item, "/replies/comments").and_then(Value::as_array) {
            Some(raw) => Some(
                raw.iter()
                    .map(|comment| YoutubeComment::from_item(comment.clone(), call_url, ctx))
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => None,
        };
        Ok(YoutubeCommentThread {
            etag: require_str(&item, "/etag")?,
            id: CommentId::from(require_str(&item, "/id")?),
            video_id: optional_str(&item, "/snippet/videoId").map(VideoId::from),
            channel_id: optional_str(&item, "/snippet/channelId").map(ChannelId::from),
            top_level_comment: YoutubeComment::from_item(top_level, call_url, ctx)?,
            can_reply: require_bool(&item, "/snippet/canReply")?,
            total_reply_count: require_count(&item, "/snippet/totalReplyCount")?,
            is_public: require_bool(&item, "/snippet/isPublic")?,
            replies,
            call_url: call_url.to_string(),
            metadata: item,
        })
    }
}

impl YoutubeCommentThread {
    /// The watch page url that highlights this thread's top level comment.
    pub fn highlight_url(&self) -> Option<String> {
        self.top_level_comment.highlight_url()
    }
    /// Fetch up to `max_replies` replies to this thread.
    pub async fn fetch_replies(
        &self,
        max_replies: Option<usize>,
    ) -> Result<Vec<YoutubeComment>> {
        self.top_level_comment.fetch_replies(max_replies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::test_support::{context, CALL_URL};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn comment_item(id: &str) -> Value {
        json!({
            "etag": "etag-5",
            "id": id,
            "snippet": {
                "videoId": "dQw4w9WgXcQ",
                "authorDisplayName": "someone",
                "authorChannelId": {"value": "UC1VSDiiRQZRTbxNvWhIrJfw"},
                "textDisplay": "never gonna give this up",
                "canRate": true,
                "likeCount": 7,
                "publishedAt": "2024-05-05T12:00:00Z",
                "updatedAt": "2024-05-05T12:00:00Z",
            },
        })
    }

    #[test]
    fn comments_decode_with_highlight_url() {
        let comment =
            YoutubeComment::from_item(comment_item("UgxMlgSMOq5LGVTF-zV4AaABAg"), CALL_URL, &context())
                .unwrap();
        assert_eq!(
            comment.highlight_url().as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=UgxMlgSMOq5LGVTF-zV4AaABAg")
        );
        assert_eq!(comment.like_count, 7);
    }
    #[test]
    fn threads_decode_top_level_and_replies() {
        let item = json!({
            "etag": "etag-6",
            "id": "UgxMlgSMOq5LGVTF-zV4AaABAg",
            "snippet": {
                "videoId": "dQw4w9WgXcQ",
                "topLevelComment": comment_item("UgxMlgSMOq5LGVTF-zV4AaABAg"),
                "canReply": true,
                "totalReplyCount": 2,
                "isPublic": true,
            },
            "replies": {
                "comments": [comment_item("UgxMlgSMOq5LGVTF-zV4AaABAg.reply1")],
            },
        });
        let thread = YoutubeCommentThread::from_item(item, CALL_URL, &context()).unwrap();
        assert_eq!(thread.total_reply_count, 2);
        assert_eq!(thread.replies.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            thread.top_level_comment.author_display_name,
            "someone".to_string()
        );
    }
}
