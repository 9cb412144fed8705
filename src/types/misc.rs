use crate::common::{CategoryId, ChannelId};
use crate::context::ApiContext;
use crate::error::Result;
use crate::types::{require, require_bool, require_str, FromItem};
use serde_json::Value;

/// A category assignable to videos, e.g. "Music".
#[derive(Debug, Clone, PartialEq)]
pub struct VideoCategory {
    /// The raw item this category was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: CategoryId<'static>,
    pub title: String,
    /// Whether videos can currently be tagged with this category.
    pub assignable: bool,
    pub channel_id: ChannelId<'static>,
}

impl FromItem for VideoCategory {
    fn from_item(item: Value, call_url: &str, _ctx: &ApiContext) -> Result<Self> {
        require(&item, "/snippet")?;
        Ok(VideoCategory {
            etag: require_str(&item, "/etag")?,
            id: CategoryId::from(require_str(&item, "/id")?),
            title: require_str(&item, "/snippet/title")?,
            assignable: require_bool(&item, "/snippet/assignable")?,
            channel_id: ChannelId::from(require_str(&item, "/snippet/channelId")?),
            call_url: call_url.to_string(),
            metadata: item,
        })
    }
}

/// A region YouTube is available in (an i18nRegion resource).
#[derive(Debug, Clone, PartialEq)]
pub struct YoutubeRegion {
    pub id: String,
    /// ISO 3166-1 alpha-2 country code.
    pub gl: String,
    pub name: String,
}

impl FromItem for YoutubeRegion {
    fn from_item(item: Value, _call_url: &str, _ctx: &ApiContext) -> Result<Self> {
        Ok(YoutubeRegion {
            id: require_str(&item, "/id")?,
            gl: require_str(&item, "/snippet/gl")?,
            name: require_str(&item, "/snippet/name")?,
        })
    }
}

/// A language the YouTube site supports (an i18nLanguage resource).
#[derive(Debug, Clone, PartialEq)]
pub struct YoutubeLanguage {
    pub id: String,
    /// BCP-47 language tag.
    pub hl: String,
    pub name: String,
}

impl FromItem for YoutubeLanguage {
    fn from_item(item: Value, _call_url: &str, _ctx: &ApiContext) -> Result<Self> {
        Ok(YoutubeLanguage {
            id: require_str(&item, "/id")?,
            hl: require_str(&item, "/snippet/hl")?,
            name: require_str(&item, "/snippet/name")?,
        })
    }
}
