//! Endpoint descriptors for every supported API call.
//!
//! Shared between the public handle and the chained fetch methods on
//! decoded resources, so an operation's parts and paging behaviour are
//! defined exactly once.
use crate::context::{CallIds, CallSpec};
use crate::error::ResourceKind;
use crate::filters::SearchFilter;
use crate::utils::constants::MAX_IDS_PER_CALL;

const VIDEO_PARTS: &[&str] = &[
    "snippet",
    "status",
    "contentDetails",
    "statistics",
    "player",
    "topicDetails",
    "recordingDetails",
    "liveStreamingDetails",
    "localizations",
    "paidProductPlacementDetails",
];
const CHANNEL_PARTS: &[&str] = &[
    "snippet",
    "status",
    "contentDetails",
    "statistics",
    "topicDetails",
    "brandingSettings",
    "contentOwnerDetails",
    "id",
    "localizations",
];
const PLAYLIST_PARTS: &[&str] = &[
    "snippet",
    "status",
    "contentDetails",
    "player",
    "localizations",
];
const PLAYLIST_ITEM_PARTS: &[&str] = &["snippet", "status", "contentDetails"];
const COMMENT_THREAD_PARTS: &[&str] = &["snippet", "replies", "id"];
const COMMENT_PARTS: &[&str] = &["snippet", "id"];
const CAPTION_PARTS: &[&str] = &["snippet", "id"];

pub(crate) fn videos(ids: CallIds) -> CallSpec<'static> {
    CallSpec {
        kind: "videos",
        id_param: "id",
        ids,
        parts: VIDEO_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Video,
    }
}

pub(crate) fn channels(ids: CallIds) -> CallSpec<'static> {
    CallSpec {
        kind: "channels",
        id_param: "id",
        ids,
        parts: CHANNEL_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Channel,
    }
}

pub(crate) fn channel_by_handle(handle: String) -> CallSpec<'static> {
    CallSpec {
        kind: "channels",
        id_param: "forHandle",
        ids: CallIds::Single(handle),
        parts: CHANNEL_PARTS,
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Channel,
    }
}

/// ID-only channel lookup, as used to resolve a handle cheaply.
pub(crate) fn resolve_handle(handle: String) -> CallSpec<'static> {
    CallSpec {
        kind: "channels",
        id_param: "forHandle",
        ids: CallIds::Single(handle),
        parts: &["id"],
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Channel,
    }
}

pub(crate) fn playlists(ids: CallIds) -> CallSpec<'static> {
    CallSpec {
        kind: "playlists",
        id_param: "id",
        ids,
        parts: PLAYLIST_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Playlist,
    }
}

pub(crate) fn playlist_items(playlist_id: String, cap: Option<usize>) -> CallSpec<'static> {
    CallSpec {
        kind: "playlistItems",
        id_param: "playlistId",
        ids: CallIds::Keyed(playlist_id),
        parts: PLAYLIST_ITEM_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: cap,
        extra: Vec::new(),
        resource: ResourceKind::Playlist,
    }
}

pub(crate) fn video_comment_threads(video_id: String, cap: Option<usize>) -> CallSpec<'static> {
    CallSpec {
        kind: "commentThreads",
        id_param: "videoId",
        ids: CallIds::Keyed(video_id),
        parts: COMMENT_THREAD_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: cap,
        extra: Vec::new(),
        resource: ResourceKind::Video,
    }
}

pub(crate) fn channel_comment_threads(channel_id: String, cap: Option<usize>) -> CallSpec<'static> {
    CallSpec {
        kind: "commentThreads",
        id_param: "allThreadsRelatedToChannelId",
        ids: CallIds::Keyed(channel_id),
        parts: COMMENT_THREAD_PARTS,
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: cap,
        extra: Vec::new(),
        resource: ResourceKind::Channel,
    }
}

pub(crate) fn comments(ids: CallIds) -> CallSpec<'static> {
    CallSpec {
        kind: "comments",
        id_param: "id",
        ids,
        parts: COMMENT_PARTS,
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Comment,
    }
}

pub(crate) fn comment_replies(parent_id: String, cap: Option<usize>) -> CallSpec<'static> {
    CallSpec {
        kind: "comments",
        id_param: "parentId",
        ids: CallIds::Keyed(parent_id),
        parts: COMMENT_PARTS,
        page_size: None,
        item_cap: cap,
        extra: Vec::new(),
        resource: ResourceKind::Comment,
    }
}

pub(crate) fn search(query: String, cap: usize, filter: Option<&SearchFilter>) -> CallSpec<'static> {
    CallSpec {
        kind: "search",
        id_param: "q",
        ids: CallIds::Keyed(query),
        parts: &["snippet"],
        page_size: Some(cap.min(MAX_IDS_PER_CALL) as u32),
        item_cap: Some(cap),
        extra: filter.map(SearchFilter::to_query_pairs).unwrap_or_default(),
        resource: ResourceKind::SearchResult,
    }
}

pub(crate) fn video_captions(video_id: String) -> CallSpec<'static> {
    CallSpec {
        kind: "captions",
        id_param: "videoId",
        ids: CallIds::Keyed(video_id),
        parts: CAPTION_PARTS,
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Caption,
    }
}

pub(crate) fn subscriptions(channel_id: String, cap: Option<usize>) -> CallSpec<'static> {
    CallSpec {
        kind: "subscriptions",
        id_param: "channelId",
        ids: CallIds::Keyed(channel_id),
        parts: &["contentDetails", "snippet", "subscriberSnippet"],
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: cap,
        extra: Vec::new(),
        resource: ResourceKind::Subscription,
    }
}

pub(crate) fn video_categories(ids: CallIds) -> CallSpec<'static> {
    CallSpec {
        kind: "videoCategories",
        id_param: "id",
        ids,
        parts: &["snippet"],
        page_size: Some(MAX_IDS_PER_CALL as u32),
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::VideoCategory,
    }
}

pub(crate) fn regions(language: String) -> CallSpec<'static> {
    CallSpec {
        kind: "i18nRegions",
        id_param: "hl",
        ids: CallIds::Keyed(language),
        parts: &["snippet"],
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Region,
    }
}

pub(crate) fn languages(language: String) -> CallSpec<'static> {
    CallSpec {
        kind: "i18nLanguages",
        id_param: "hl",
        ids: CallIds::Keyed(language),
        parts: &["snippet"],
        page_size: None,
        item_cap: None,
        extra: Vec::new(),
        resource: ResourceKind::Language,
    }
}
