//! Decoded Data API resources.
//!
//! Each resource is decoded from one element of a response's `items` array.
//! Decoders fail fast: a required field that is missing or malformed
//! produces an error naming the field in JSON pointer notation along with
//! the raw item, rather than a partially filled struct. Optional fields
//! decode to `None` when absent.
//!
//! Resources keep the raw item in `metadata` and the (key-censored) call
//! url in `call_url` for debugging, and hold call capability so related
//! resources can be fetched directly from them.
use crate::context::ApiContext;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

mod caption;
mod channel;
mod comment;
mod misc;
mod playlist;
mod search;
mod subscription;
mod video;

pub use caption::VideoCaption;
pub use channel::{PartialChannel, YoutubeChannel};
pub use comment::{YoutubeComment, YoutubeCommentThread};
pub use misc::{VideoCategory, YoutubeLanguage, YoutubeRegion};
pub use playlist::{PlaylistItem, YoutubePlaylist};
pub use search::YoutubeSearchResult;
pub use subscription::YoutubeSubscription;
pub use video::{VideoChapter, YoutubeVideo};

/// Decode a resource from one item of an API response.
pub(crate) trait FromItem: Sized {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self>;
}

fn field_error(item: &Value, pointer: &str) -> Error {
    Error::missing_data(pointer, Arc::new(item.to_string()))
}

pub(crate) fn require<'a>(item: &'a Value, pointer: &str) -> Result<&'a Value> {
    item.pointer(pointer)
        .filter(|value| !value.is_null())
        .ok_or_else(|| field_error(item, pointer))
}

pub(crate) fn optional<'a>(item: &'a Value, pointer: &str) -> Option<&'a Value> {
    item.pointer(pointer).filter(|value| !value.is_null())
}

pub(crate) fn require_str(item: &Value, pointer: &str) -> Result<String> {
    require(item, pointer)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| field_error(item, pointer))
}

pub(crate) fn optional_str(item: &Value, pointer: &str) -> Option<String> {
    optional(item, pointer)?.as_str().map(str::to_string)
}

pub(crate) fn require_bool(item: &Value, pointer: &str) -> Result<bool> {
    require(item, pointer)?
        .as_bool()
        .ok_or_else(|| field_error(item, pointer))
}

pub(crate) fn optional_bool(item: &Value, pointer: &str) -> Option<bool> {
    optional(item, pointer)?.as_bool()
}

// Counts come back from the API as either JSON numbers or decimal strings
// depending on the resource.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn require_count(item: &Value, pointer: &str) -> Result<u64> {
    as_count(require(item, pointer)?).ok_or_else(|| field_error(item, pointer))
}

pub(crate) fn optional_count(item: &Value, pointer: &str) -> Option<u64> {
    as_count(optional(item, pointer)?)
}

pub(crate) fn require_timestamp(item: &Value, pointer: &str) -> Result<DateTime<Utc>> {
    let raw = require_str(item, pointer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| field_error(item, pointer))
}

pub(crate) fn optional_timestamp(item: &Value, pointer: &str) -> Result<Option<DateTime<Utc>>> {
    match optional_str(item, pointer) {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|at| Some(at.with_timezone(&Utc)))
            .map_err(|_| field_error(item, pointer)),
        None => Ok(None),
    }
}

/// Decode a required sub-object (or enum token) through serde.
pub(crate) fn decode<T: DeserializeOwned>(item: &Value, pointer: &str) -> Result<T> {
    serde_json::from_value(require(item, pointer)?.clone()).map_err(|_| field_error(item, pointer))
}

/// Decode an optional sub-object (or enum token) through serde. Absence is
/// None, presence in the wrong shape is an error.
pub(crate) fn decode_optional<T: DeserializeOwned>(
    item: &Value,
    pointer: &str,
) -> Result<Option<T>> {
    match optional(item, pointer) {
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| field_error(item, pointer)),
        None => Ok(None),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::client::Client;
    use crate::context::{ApiContext, Auth};

    pub fn context() -> ApiContext {
        ApiContext::new(
            Client::new().unwrap(),
            Auth::ApiKey("IMAGINARY_TOKEN".to_string()),
            crate::utils::constants::API_URL.to_string(),
            None,
        )
    }
    pub const CALL_URL: &str =
        "https://www.googleapis.com/youtube/v3/videos?part=snippet&id=dQw4w9WgXcQ&key=API_KEY";
}
