use crate::common::{video_url, CategoryId, ChannelId, LocalName, Localizations, ThumbnailSet, VideoId};
use crate::context::{ApiContext, CallIds};
use crate::enums::{
    AcbRating, LiveBroadcastContent, License, PrivacyStatus, UploadFailureReason,
    UploadRejectionReason, UploadStatus, VideoDefinition, VideoProjection,
};
use crate::error::Result;
use crate::types::{
    decode, decode_optional, optional, optional_bool, optional_count, optional_str,
    optional_timestamp, require, require_bool, require_count, require_str, require_timestamp,
    FromItem,
};
use crate::utils::parse_iso8601_duration;
use crate::{ops, types};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Countries a video may or may not be viewed in. Both lists absent means
/// no restriction.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
pub struct RegionRestrictions {
    pub allowed: Option<Vec<String>>,
    pub blocked: Option<Vec<String>>,
}

/// Ratings a video received under the various national classification
/// schemes. Every field is optional; `youtube` is the internal
/// age-restriction marker.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRating {
    pub acb_rating: Option<AcbRating>,
    pub bbfc_rating: Option<String>,
    pub cnc_rating: Option<String>,
    pub djctq_rating: Option<String>,
    pub eirin_rating: Option<String>,
    pub fsk_rating: Option<String>,
    pub kmrb_rating: Option<String>,
    pub mpaa_rating: Option<String>,
    pub oflc_rating: Option<String>,
    pub pegi_rating: Option<String>,
    pub rtc_rating: Option<String>,
    pub tvpg_rating: Option<String>,
    #[serde(rename = "ytRating")]
    pub yt_rating: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct RecordingLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
}

/// The times a live broadcast (or premiere) started and ended.
#[derive(Debug, PartialEq, Clone)]
pub struct LiveStreamingDetails {
    pub actual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub scheduled_start_time: Option<DateTime<Utc>>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub concurrent_viewers: Option<u64>,
}

/// The start time, duration and name of a video chapter.
#[derive(Debug, PartialEq, Clone)]
pub struct VideoChapter {
    pub start: Duration,
    pub duration: Duration,
    pub name: String,
}

/// A YouTube video and its public metadata.
#[derive(Debug, Clone)]
pub struct YoutubeVideo {
    /// The raw item this video was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: VideoId<'static>,
    /// The watch page url of the video.
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub channel_id: ChannelId<'static>,
    pub channel_title: String,
    pub title: String,
    pub description: String,
    pub thumbnails: ThumbnailSet,
    pub tags: Option<Vec<String>>,
    pub category_id: CategoryId<'static>,
    pub live_broadcast_content: LiveBroadcastContent,
    pub default_language: Option<String>,
    pub localized: Option<LocalName>,
    pub default_audio_language: Option<String>,
    /// The length of the video. For an ongoing live broadcast this is the
    /// time elapsed since the stream actually started, measured when the
    /// video was decoded.
    pub duration: Duration,
    pub dimension: String,
    pub definition: VideoDefinition,
    /// Whether captions are available. None when the API did not say.
    pub has_captions: Option<bool>,
    pub licensed_content: bool,
    pub region_restrictions: Option<RegionRestrictions>,
    pub content_rating: ContentRating,
    pub age_restricted: bool,
    pub projection: VideoProjection,
    pub upload_status: UploadStatus,
    pub failure_reason: Option<UploadFailureReason>,
    pub rejection_reason: Option<UploadRejectionReason>,
    pub visibility: PrivacyStatus,
    pub publish_set_at: Option<DateTime<Utc>>,
    pub license: License,
    pub embeddable: bool,
    pub public_stats_viewable: bool,
    pub made_for_kids: Option<bool>,
    pub view_count: u64,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub embed_html: String,
    pub topic_categories: Option<Vec<String>>,
    pub recording_location: Option<RecordingLocation>,
    pub recording_date: Option<DateTime<Utc>>,
    pub live_streaming_details: Option<LiveStreamingDetails>,
    pub has_paid_product_placement: bool,
    pub localizations: Option<Localizations>,
    context: ApiContext,
}

// From https://stackoverflow.com/a/11067610 - up to 59:59:59.
const TIMESTAMP_PATTERN: &str = r"(?:([0-5]?[0-9]):)?([0-5]?[0-9]):([0-5][0-9])";

fn decode_live_details(item: &Value) -> Result<Option<LiveStreamingDetails>> {
    if optional(item, "/liveStreamingDetails").is_none() {
        return Ok(None);
    }
    Ok(Some(LiveStreamingDetails {
        actual_start_time: optional_timestamp(item, "/liveStreamingDetails/actualStartTime")?,
        actual_end_time: optional_timestamp(item, "/liveStreamingDetails/actualEndTime")?,
        scheduled_start_time: optional_timestamp(item, "/liveStreamingDetails/scheduledStartTime")?,
        scheduled_end_time: optional_timestamp(item, "/liveStreamingDetails/scheduledEndTime")?,
        concurrent_viewers: optional_count(item, "/liveStreamingDetails/concurrentViewers"),
    }))
}

impl FromItem for YoutubeVideo {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        let id = require_str(&item, "/id")?;
        // Presence of the requested parts is checked up front so a missing
        // part fails naming the part rather than a field inside it.
        for part in [
            "/snippet",
            "/contentDetails",
            "/status",
            "/statistics",
            "/player",
            "/recordingDetails",
            "/paidProductPlacementDetails",
        ] {
            require(&item, part)?;
        }
        let content_rating: ContentRating =
            decode_optional(&item, "/contentDetails/contentRating")?.unwrap_or_default();
        let live_streaming_details = decode_live_details(&item)?;
        let raw_duration = require_str(&item, "/contentDetails/duration").and_then(|raw| {
            parse_iso8601_duration(&raw)
                .ok_or_else(|| super::field_error(&item, "/contentDetails/duration"))
        });
        // An ongoing live broadcast reports a zero length duration; the
        // elapsed broadcast time is reported instead.
        let duration = match (raw_duration, &live_streaming_details) {
            (Ok(d), Some(live)) if d < Duration::seconds(1) => match live.actual_start_time {
                Some(started) => Utc::now() - started,
                None => d,
            },
            (duration, _) => duration?,
        };
        Ok(YoutubeVideo {
            etag: require_str(&item, "/etag")?,
            url: video_url(&id),
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            channel_id: ChannelId::from(require_str(&item, "/snippet/channelId")?),
            channel_title: require_str(&item, "/snippet/channelTitle")?,
            title: require_str(&item, "/snippet/title")?,
            description: require_str(&item, "/snippet/description")?,
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            tags: decode_optional(&item, "/snippet/tags")?,
            category_id: CategoryId::from(require_str(&item, "/snippet/categoryId")?),
            live_broadcast_content: decode(&item, "/snippet/liveBroadcastContent")?,
            default_language: optional_str(&item, "/snippet/defaultLanguage"),
            localized: decode_optional(&item, "/snippet/localized")?,
            default_audio_language: optional_str(&item, "/snippet/defaultAudioLanguage"),
            duration,
            dimension: require_str(&item, "/contentDetails/dimension")?,
            definition: decode(&item, "/contentDetails/definition")?,
            has_captions: optional_str(&item, "/contentDetails/caption")
                .and_then(|raw| raw.parse().ok()),
            licensed_content: require_bool(&item, "/contentDetails/licensedContent")?,
            region_restrictions: decode_optional(&item, "/contentDetails/regionRestriction")?,
            age_restricted: content_rating.yt_rating.is_some(),
            content_rating,
            projection: decode(&item, "/contentDetails/projection")?,
            upload_status: decode(&item, "/status/uploadStatus")?,
            failure_reason: decode_optional(&item, "/status/failureReason")?,
            rejection_reason: decode_optional(&item, "/status/rejectionReason")?,
            visibility: decode(&item, "/status/privacyStatus")?,
            publish_set_at: optional_timestamp(&item, "/status/publishAt")?,
            license: decode(&item, "/status/license")?,
            embeddable: require_bool(&item, "/status/embeddable")?,
            public_stats_viewable: require_bool(&item, "/status/publicStatsViewable")?,
            made_for_kids: optional_bool(&item, "/status/madeForKids"),
            view_count: require_count(&item, "/statistics/viewCount")?,
            like_count: optional_count(&item, "/statistics/likeCount"),
            comment_count: optional_count(&item, "/statistics/commentCount"),
            embed_html: require_str(&item, "/player/embedHtml")?,
            topic_categories: decode_optional(&item, "/topicDetails/topicCategories")?,
            recording_location: decode_optional(&item, "/recordingDetails/location")?,
            recording_date: optional_timestamp(&item, "/recordingDetails/recordingDate")?,
            live_streaming_details,
            has_paid_product_placement: require_bool(
                &item,
                "/paidProductPlacementDetails/hasPaidProductPlacement",
            )?,
            localizations: decode_optional(&item, "/localizations")?,
            id: VideoId::from(id),
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubeVideo {
    /// The chapters defined by timestamps in the video description, if any.
    ///
    /// Recomputed on every call by scanning the description bottom up; each
    /// chapter ends where the chronologically next one starts, and the last
    /// one ends at the video duration.
    pub fn chapters(&self) -> Option<Vec<VideoChapter>> {
        let pattern = Regex::new(TIMESTAMP_PATTERN).ok()?;
        let mut found: Vec<VideoChapter> = Vec::new();
        for line in self.description.lines().rev() {
            let Some(matched) = pattern.find(line) else {
                continue;
            };
            let seconds: i64 = matched
                .as_str()
                .split(':')
                .rev()
                .enumerate()
                .filter_map(|(index, part)| {
                    part.parse::<i64>().ok().map(|n| n * 60_i64.pow(index as u32))
                })
                .sum();
            let start = Duration::seconds(seconds);
            let end = found.last().map(|c| c.start).unwrap_or(self.duration);
            let name = line.replacen(matched.as_str(), "", 1);
            let name = name.trim_matches([' ', '-', '\n']);
            let name = name.strip_suffix("()").map(str::trim).unwrap_or(name);
            let name = name.strip_prefix("()").map(str::trim).unwrap_or(name);
            found.push(VideoChapter {
                start,
                duration: end - start,
                name: name.to_string(),
            });
        }
        if found.is_empty() {
            return None;
        }
        found.reverse();
        Some(found)
    }
    /// The chapter covering the given position of the video, if any.
    pub fn current_chapter(&self, position: Duration) -> Option<VideoChapter> {
        let chapters = self.chapters()?;
        let last = chapters.len() - 1;
        chapters.into_iter().enumerate().find_map(|(idx, chapter)| {
            let in_chapter =
                chapter.start <= position && position < chapter.start + chapter.duration;
            if in_chapter || (idx == last && position == self.duration) {
                Some(chapter)
            } else {
                None
            }
        })
    }
    /// Fetch the channel that uploaded this video.
    pub async fn fetch_channel(&self) -> Result<types::YoutubeChannel> {
        let spec = ops::channels(CallIds::Single(self.channel_id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
    /// Fetch up to `max_comments` comment threads left on this video.
    pub async fn fetch_comments(
        &self,
        max_comments: Option<usize>,
    ) -> Result<Vec<types::YoutubeCommentThread>> {
        let spec = ops::video_comment_threads(self.id.to_string(), max_comments);
        self.context.call_api(spec).await
    }
    /// Fetch the caption tracks of this video.
    pub async fn fetch_captions(&self) -> Result<Vec<types::VideoCaption>> {
        let spec = ops::video_captions(self.id.to_string());
        self.context.call_api(spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::test_support::{context, CALL_URL};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn video_item(description: &str, duration: &str) -> Value {
        json!({
            "etag": "etag-1",
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "publishedAt": "2009-10-25T06:57:33Z",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "channelTitle": "Rick Astley",
                "title": "Never Gonna Give You Up",
                "description": description,
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg", "width": 120, "height": 90}
                },
                "categoryId": "10",
                "liveBroadcastContent": "none",
            },
            "contentDetails": {
                "duration": duration,
                "dimension": "2d",
                "definition": "hd",
                "caption": "false",
                "licensedContent": true,
                "contentRating": {},
                "projection": "rectangular",
            },
            "status": {
                "uploadStatus": "processed",
                "privacyStatus": "public",
                "license": "youtube",
                "embeddable": true,
                "publicStatsViewable": true,
                "madeForKids": false,
            },
            "statistics": {
                "viewCount": "1700000000",
                "likeCount": "18000000",
                "commentCount": "2300000",
            },
            "player": {
                "embedHtml": "<iframe src=\"//www.youtube.com/embed/dQw4w9WgXcQ\"></iframe>",
            },
            "recordingDetails": {},
            "paidProductPlacementDetails": {"hasPaidProductPlacement": false},
        })
    }

    #[test]
    fn videos_decode() {
        let video =
            YoutubeVideo::from_item(video_item("a song", "PT3M33S"), CALL_URL, &context()).unwrap();
        assert_eq!(video.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(video.duration, Duration::seconds(213));
        assert_eq!(video.has_captions, Some(false));
        assert_eq!(video.view_count, 1_700_000_000);
        assert_eq!(video.visibility, PrivacyStatus::Public);
        assert!(!video.age_restricted);
        assert_eq!(video.call_url, CALL_URL);
    }
    #[test]
    fn missing_snippet_names_the_part() {
        let mut item = video_item("", "PT1S");
        item.as_object_mut().unwrap().remove("snippet");
        let error = YoutubeVideo::from_item(item, CALL_URL, &context()).unwrap_err();
        match error.into_kind() {
            ErrorKind::MissingData { field, .. } => assert_eq!(field, "/snippet"),
            other => panic!("expected missing data, got {other}"),
        }
    }
    #[test]
    fn age_restriction_follows_yt_rating() {
        let mut item = video_item("", "PT1M");
        item["contentDetails"]["contentRating"] = json!({"ytRating": "ytAgeRestricted"});
        let video = YoutubeVideo::from_item(item, CALL_URL, &context()).unwrap();
        assert!(video.age_restricted);
    }
    #[test]
    fn live_videos_report_elapsed_time() {
        let started = Utc::now() - Duration::minutes(10);
        let mut item = video_item("", "PT0S");
        item["liveStreamingDetails"] =
            json!({"actualStartTime": started.to_rfc3339(), "concurrentViewers": "523"});
        let video = YoutubeVideo::from_item(item, CALL_URL, &context()).unwrap();
        assert!(video.duration >= Duration::minutes(10));
        assert!(video.duration < Duration::minutes(11));
        assert_eq!(
            video.live_streaming_details.unwrap().concurrent_viewers,
            Some(523)
        );
    }
    #[test]
    fn chapters_are_extracted_in_order() {
        let description = "A song.\n00:00 - Intro\n1:30 Chorus ()\nlinks below";
        let video =
            YoutubeVideo::from_item(video_item(description, "PT3M33S"), CALL_URL, &context())
                .unwrap();
        let chapters = video.chapters().unwrap();
        assert_eq!(
            chapters,
            vec![
                VideoChapter {
                    start: Duration::seconds(0),
                    duration: Duration::seconds(90),
                    name: "Intro".to_string(),
                },
                VideoChapter {
                    start: Duration::seconds(90),
                    duration: Duration::seconds(123),
                    name: "Chorus".to_string(),
                },
            ]
        );
        assert_eq!(
            video.current_chapter(Duration::seconds(100)).unwrap().name,
            "Chorus"
        );
        assert_eq!(video.current_chapter(Duration::seconds(500)), None);
    }
    #[test]
    fn descriptions_without_timestamps_have_no_chapters() {
        let video = YoutubeVideo::from_item(video_item("no stamps here", "PT3M33S"), CALL_URL, &context())
            .unwrap();
        assert_eq!(video.chapters(), None);
    }
}
