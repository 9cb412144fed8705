use crate::common::{channel_url, ChannelId, ThumbnailSet};
use crate::context::{ApiContext, CallIds};
use crate::enums::SubscriptionActivityType;
use crate::error::Result;
use crate::types::{
    decode, decode_optional, optional_str, require, require_count, require_str,
    require_timestamp, FromItem,
};
use crate::{ops, types};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A channel's subscription to another channel.
#[derive(Debug, Clone)]
pub struct YoutubeSubscription {
    /// The raw item this subscription was decoded from.
    pub metadata: Value,
    /// The (key-censored) url used to call the API.
    pub call_url: String,
    pub etag: String,
    pub id: String,
    pub published_at: DateTime<Utc>,
    /// Title of the subscribed-to channel.
    pub title: String,
    pub description: String,
    /// The channel being subscribed to.
    pub channel_id: ChannelId<'static>,
    /// The channel that owns the subscription.
    pub subscriber_channel_id: ChannelId<'static>,
    pub thumbnails: ThumbnailSet,
    pub total_item_count: u64,
    pub new_item_count: u64,
    pub activity_type: SubscriptionActivityType,
    pub subscriber_title: Option<String>,
    pub subscriber_description: Option<String>,
    pub subscriber_thumbnails: Option<ThumbnailSet>,
    context: ApiContext,
}

impl FromItem for YoutubeSubscription {
    fn from_item(item: Value, call_url: &str, ctx: &ApiContext) -> Result<Self> {
        for part in ["/snippet", "/contentDetails"] {
            require(&item, part)?;
        }
        Ok(YoutubeSubscription {
            etag: require_str(&item, "/etag")?,
            id: require_str(&item, "/id")?,
            published_at: require_timestamp(&item, "/snippet/publishedAt")?,
            title: require_str(&item, "/snippet/title")?,
            description: require_str(&item, "/snippet/description")?,
            channel_id: ChannelId::from(require_str(&item, "/snippet/resourceId/channelId")?),
            subscriber_channel_id: ChannelId::from(require_str(&item, "/snippet/channelId")?),
            thumbnails: decode_optional(&item, "/snippet/thumbnails")?.unwrap_or_default(),
            total_item_count: require_count(&item, "/contentDetails/totalItemCount")?,
            new_item_count: require_count(&item, "/contentDetails/newItemCount")?,
            activity_type: decode(&item, "/contentDetails/activityType")?,
            subscriber_title: optional_str(&item, "/subscriberSnippet/title"),
            subscriber_description: optional_str(&item, "/subscriberSnippet/description"),
            subscriber_thumbnails: decode_optional(&item, "/subscriberSnippet/thumbnails")?,
            call_url: call_url.to_string(),
            metadata: item,
            context: ctx.clone(),
        })
    }
}

impl YoutubeSubscription {
    /// The url of the subscribed-to channel.
    pub fn channel_url(&self) -> String {
        channel_url(&self.channel_id.to_string())
    }
    /// Fetch the full subscribed-to channel.
    pub async fn fetch_channel(&self) -> Result<types::YoutubeChannel> {
        let spec = ops::channels(CallIds::Single(self.channel_id.to_string()));
        Ok(self.context.call_api(spec).await?.swap_remove(0))
    }
}
