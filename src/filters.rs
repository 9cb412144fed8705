//! Filters that can narrow down a search query.
//!
//! All fields are optional; an unset field leaves the API default in place.
//! Filter validity is not checked client side, invalid combinations come
//! back as a 400 from the API.
use crate::enums::{api_token, impl_token_display};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The order search results are returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Order {
    Date,
    Rating,
    Relevance,
    Title,
    /// Channels sorted by video count, descending.
    VideoCount,
    ViewCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelType {
    Show,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Completed,
    Live,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SafeSearch {
    Moderate,
    None,
    Strict,
}

/// The kind of resource a search can be restricted to. Also the kind
/// reported on each search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchResultKind {
    Video,
    Channel,
    Playlist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoCaptionFilter {
    ClosedCaption,
    None,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoDefinitionFilter {
    High,
    Standard,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoDimension {
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
    #[serde(rename = "any")]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoDurationFilter {
    Long,
    Medium,
    Short,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoEmbeddable {
    True,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoPaidProductPlacement {
    True,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoSyndicated {
    True,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoType {
    Episode,
    Movie,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoLicenseFilter {
    CreativeCommon,
    Youtube,
    Any,
}

impl_token_display!(
    Order,
    ChannelType,
    EventType,
    SafeSearch,
    SearchResultKind,
    VideoCaptionFilter,
    VideoDefinitionFilter,
    VideoDimension,
    VideoDurationFilter,
    VideoEmbeddable,
    VideoPaidProductPlacement,
    VideoSyndicated,
    VideoType,
    VideoLicenseFilter,
);

/// The set of filters active in a search call. Construct with update
/// syntax over [`Default`], setting only the filters of interest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub channel_id: Option<String>,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub region_code: Option<String>,
    pub relevance_language: Option<String>,
    pub topic_id: Option<String>,
    pub video_category_id: Option<String>,
    pub channel_type: Option<ChannelType>,
    pub event_type: Option<EventType>,
    pub order: Option<Order>,
    pub safe_search: Option<SafeSearch>,
    pub kind: Option<SearchResultKind>,
    pub video_caption: Option<VideoCaptionFilter>,
    pub video_definition: Option<VideoDefinitionFilter>,
    pub video_dimension: Option<VideoDimension>,
    pub video_duration: Option<VideoDurationFilter>,
    pub video_embeddable: Option<VideoEmbeddable>,
    pub video_license: Option<VideoLicenseFilter>,
    pub video_paid_product_placement: Option<VideoPaidProductPlacement>,
    pub video_syndicated: Option<VideoSyndicated>,
    pub video_type: Option<VideoType>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }
    /// The key/value query parameters for the active filters, in the
    /// camelCase form the API expects.
    pub(crate) fn to_query_pairs(&self) -> Vec<(String, String)> {
        fn push_token<T: Serialize>(
            pairs: &mut Vec<(String, String)>,
            key: &str,
            value: &Option<T>,
        ) {
            if let Some(token) = value.as_ref().and_then(|v| api_token(v)) {
                pairs.push((key.to_string(), token));
            }
        }
        fn push_str(pairs: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        let mut pairs = Vec::new();
        push_str(&mut pairs, "channelId", &self.channel_id);
        if let Some(at) = self.published_after {
            pairs.push((
                "publishedAfter".to_string(),
                at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ));
        }
        if let Some(at) = self.published_before {
            pairs.push((
                "publishedBefore".to_string(),
                at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ));
        }
        push_str(&mut pairs, "regionCode", &self.region_code);
        push_str(&mut pairs, "relevanceLanguage", &self.relevance_language);
        push_str(&mut pairs, "topicId", &self.topic_id);
        push_str(&mut pairs, "videoCategoryId", &self.video_category_id);
        push_token(&mut pairs, "channelType", &self.channel_type);
        push_token(&mut pairs, "eventType", &self.event_type);
        push_token(&mut pairs, "order", &self.order);
        push_token(&mut pairs, "safeSearch", &self.safe_search);
        push_token(&mut pairs, "type", &self.kind);
        push_token(&mut pairs, "videoCaption", &self.video_caption);
        push_token(&mut pairs, "videoDefinition", &self.video_definition);
        push_token(&mut pairs, "videoDimension", &self.video_dimension);
        push_token(&mut pairs, "videoDuration", &self.video_duration);
        push_token(&mut pairs, "videoEmbeddable", &self.video_embeddable);
        push_token(&mut pairs, "videoLicense", &self.video_license);
        push_token(
            &mut pairs,
            "videoPaidProductPlacement",
            &self.video_paid_product_placement,
        );
        push_token(&mut pairs, "videoSyndicated", &self.video_syndicated);
        push_token(&mut pairs, "videoType", &self.video_type);
        pairs
    }
}
