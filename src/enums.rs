//! The enum vocabulary used across Data API resources.
//!
//! Variants deserialize directly from the camelCase tokens the API emits.
//! An unknown token is a decode failure rather than a silent fallback, so
//! new API vocabulary surfaces as an error naming the offending field.
//! Display output uses the snake_case convention.
use serde::{Deserialize, Serialize};

/// Serialize an enum back to its camelCase wire token.
pub(crate) fn api_token<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_value(value).ok()? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}

macro_rules! impl_token_display {
    ($($t:ty),* $(,)?) => {$(
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let token = crate::enums::api_token(self).ok_or(std::fmt::Error)?;
                write!(f, "{}", crate::utils::camel_to_snake(&token))
            }
        }
    )*};
}
pub(crate) use impl_token_display;

/// Whether a video is an upcoming/active live broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiveBroadcastContent {
    Live,
    Upcoming,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoDefinition {
    Hd,
    Sd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoProjection {
    #[serde(rename = "360")]
    ThreeSixty,
    Rectangular,
}

/// Australian Classification Board rating of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AcbRating {
    AcbC,
    AcbE,
    AcbG,
    AcbM,
    #[serde(rename = "acbMa15plus")]
    AcbMa15Plus,
    AcbP,
    AcbPg,
    #[serde(rename = "acbR18plus")]
    AcbR18Plus,
    AcbUnrated,
}

/// The status of an uploaded video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadStatus {
    Deleted,
    Failed,
    Processed,
    Rejected,
    Uploaded,
}

/// Explains why a video failed to upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadFailureReason {
    Codec,
    Conversion,
    EmptyFile,
    InvalidFile,
    TooSmall,
    UploadAborted,
}

/// Explains why YouTube rejected an uploaded video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadRejectionReason {
    Claim,
    Copyright,
    Duplicate,
    Inappropriate,
    Legal,
    Length,
    TermsOfUse,
    Trademark,
    UploaderAccountClosed,
    UploaderAccountSuspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrivacyStatus {
    Private,
    Public,
    Unlisted,
    PrivacyStatusUnspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PodcastStatus {
    Enabled,
    Disabled,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum License {
    CreativeCommon,
    Youtube,
}

/// Whether a channel is eligible to upload videos longer than 15 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LongUploadsStatus {
    Allowed,
    Disallowed,
    Eligible,
    LongUploadsUnspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionStatus {
    Failed,
    Serving,
    Syncing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionFailureReason {
    ProcessingFailed,
    UnknownFormat,
    UnsupportedFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioTrackType {
    Commentary,
    Descriptive,
    Primary,
    Unknown,
}

/// The kind of a caption track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionTrackKind {
    // The API has emitted this token in both cases.
    #[serde(alias = "ASR")]
    Asr,
    Forced,
    Standard,
}

/// The format a caption track can be downloaded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionFormat {
    Sbv,
    Scc,
    Srt,
    Ttml,
    Vtt,
}

/// The type of activity a subscription is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubscriptionActivityType {
    All,
    Uploads,
}

/// The video's processing status (visible to the video's owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessingStatus {
    Failed,
    Processing,
    Succeeded,
    Terminated,
}

/// Explains why processing of a video failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessingFailureReason {
    Other,
    StreamingFailed,
    TranscodeFailed,
    UploadFailed,
}

impl_token_display!(
    LiveBroadcastContent,
    VideoDefinition,
    VideoProjection,
    AcbRating,
    UploadStatus,
    UploadFailureReason,
    UploadRejectionReason,
    PrivacyStatus,
    PodcastStatus,
    License,
    LongUploadsStatus,
    CaptionStatus,
    CaptionFailureReason,
    AudioTrackType,
    CaptionTrackKind,
    CaptionFormat,
    SubscriptionActivityType,
    ProcessingStatus,
    ProcessingFailureReason,
);
