//! Due to quota limits - all live api tests are extracted out into their own
//! integration tests module. Requires a real API key in the `YTDATA_API_KEY`
//! environment variable.
use std::env;
use ytdata_rs::common::{ChannelId, PlaylistId, VideoId};
use ytdata_rs::error::ErrorKind;
use ytdata_rs::filters::{Order, SearchFilter, SearchResultKind};
use ytdata_rs::{Result, YtData};

// Well known, unlikely-to-disappear public resources.
const TEST_VIDEO: &str = "dQw4w9WgXcQ";
const TEST_CHANNEL: &str = "UCuAXFkgsw1L7xaCfnd5JJOw";

fn new_standard_api() -> Result<YtData> {
    YtData::new(env::var("YTDATA_API_KEY").expect("live tests need YTDATA_API_KEY set"))
}

#[tokio::test]
async fn test_fetch_video() {
    let api = new_standard_api().unwrap();
    let video = api.fetch_video(VideoId::from(TEST_VIDEO)).await.unwrap();
    assert_eq!(video.channel_id, ChannelId::from(TEST_CHANNEL));
    assert!(video.view_count > 0);
    assert!(!video.call_url.contains(&env::var("YTDATA_API_KEY").unwrap()));
}

#[tokio::test]
async fn test_fetch_videos_reports_unknown_ids() {
    let api = new_standard_api().unwrap();
    let ids = [
        VideoId::from(TEST_VIDEO),
        VideoId::from("aaaaaaaaaaa"),
    ];
    let error = api.fetch_videos(&ids).await.unwrap_err();
    match error.into_kind() {
        ErrorKind::ResourceNotFound { ids, .. } => {
            assert_eq!(ids, vec!["aaaaaaaaaaa".to_string()])
        }
        other => panic!("Expected not found, got {other}"),
    }
}

#[tokio::test]
async fn test_fetch_channel_and_uploads() {
    let api = new_standard_api().unwrap();
    let channel = api
        .fetch_channel(ChannelId::from(TEST_CHANNEL))
        .await
        .unwrap();
    let uploads = channel.fetch_uploads(Some(5)).await.unwrap();
    assert!(!uploads.is_empty());
    assert!(uploads.len() <= 5);
}

#[tokio::test]
async fn test_fetch_playlist_items_follows_pages() {
    let api = new_standard_api().unwrap();
    // A large editorial playlist, to force at least two pages.
    let items = api
        .fetch_playlist_items(PlaylistId::from("PLFgquLnL59alCl_2TQvOiD5Vgm1hCaGSI"), Some(120))
        .await
        .unwrap();
    assert!(items.len() > 50);
    assert!(items.len() <= 120);
}

#[tokio::test]
async fn test_search_with_filter() {
    let api = new_standard_api().unwrap();
    let filter = SearchFilter {
        kind: Some(SearchResultKind::Video),
        order: Some(Order::Relevance),
        ..Default::default()
    };
    let results = api
        .search("never gonna give you up", 10, Some(&filter))
        .await
        .unwrap();
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.kind == SearchResultKind::Video));
}

#[tokio::test]
async fn test_fetch_video_comments() {
    let api = new_standard_api().unwrap();
    let threads = api
        .fetch_video_comments(VideoId::from(TEST_VIDEO), Some(10))
        .await
        .unwrap();
    assert!(!threads.is_empty());
    assert!(threads
        .iter()
        .all(|t| t.top_level_comment.highlight_url().is_some()));
}

#[tokio::test]
async fn test_fetch_regions() {
    let api = new_standard_api().unwrap();
    let regions = api.fetch_youtube_regions(None).await.unwrap();
    assert!(regions.iter().any(|r| r.gl == "GB"));
}

#[tokio::test]
async fn test_download_thumbnail() {
    let api = new_standard_api().unwrap();
    let video = api.fetch_video(VideoId::from(TEST_VIDEO)).await.unwrap();
    let thumbnail = video.thumbnails.highest().unwrap();
    let bytes = api.download_thumbnail(&thumbnail.url).await.unwrap();
    assert!(!bytes.is_empty());
}
