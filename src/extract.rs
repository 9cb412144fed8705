//! Extraction of resource identifiers out of YouTube urls.
//!
//! Each function accepts the url forms YouTube hands out in the wild
//! (watch pages, short links, embeds, share redirects) as well as a bare
//! identifier, which passes through unchanged. `attribution_link` redirect
//! urls carry the real target percent-encoded in their `u`/`url` parameter
//! and are unwrapped before extraction.
use crate::utils::constants::YOUTUBE_URL;
use url::Url;

enum Target<'a> {
    Bare(&'a str),
    Link(Url),
}

fn looks_like_bare_id(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn unwrap_attribution(url: Url) -> Url {
    if url.path() != "/attribution_link" {
        return url;
    }
    let inner = url
        .query_pairs()
        .find(|(key, _)| key == "u" || key == "url")
        .map(|(_, value)| value.into_owned());
    match inner {
        Some(inner) => Url::parse(YOUTUBE_URL)
            .and_then(|base| base.join(&inner))
            .unwrap_or(url),
        None => url,
    }
}

fn normalize(input: &str) -> Option<Target<'_>> {
    match Url::parse(input) {
        Ok(url) => Some(Target::Link(unwrap_attribution(url))),
        Err(url::ParseError::RelativeUrlWithoutBase) if looks_like_bare_id(input) => {
            Some(Target::Bare(input))
        }
        Err(_) => None,
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn is_youtube_host(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("www.youtube.com" | "youtube.com" | "m.youtube.com" | "music.youtube.com")
    )
}

/// Extract a video ID from a url, or pass a bare ID through unchanged.
pub fn extract_video_id(input: &str) -> Option<String> {
    let url = match normalize(input)? {
        Target::Bare(id) => return Some(id.to_string()),
        Target::Link(url) => url,
    };
    if url.host_str() == Some("youtu.be") {
        let segment = url.path_segments()?.next()?;
        // Short links are sometimes mangled with query parts appended
        // straight onto the path.
        let id = segment.split('&').next()?;
        return (!id.is_empty()).then(|| id.to_string());
    }
    if !is_youtube_host(&url) {
        return None;
    }
    let mut segments = url.path_segments()?;
    match segments.next()? {
        "watch" => query_param(&url, "v"),
        "embed" | "v" | "shorts" | "live" => segments
            .next()
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
        _ => None,
    }
}

/// Extract a playlist ID from a url, or pass a bare ID through unchanged.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let url = match normalize(input)? {
        Target::Bare(id) => return Some(id.to_string()),
        Target::Link(url) => url,
    };
    if !is_youtube_host(&url) && url.host_str() != Some("youtu.be") {
        return None;
    }
    query_param(&url, "list")
}

/// Extract a channel ID from a url, or pass a bare ID through unchanged.
pub fn extract_channel_id(input: &str) -> Option<String> {
    let url = match normalize(input)? {
        Target::Bare(id) => return Some(id.to_string()),
        Target::Link(url) => url,
    };
    if !is_youtube_host(&url) {
        return None;
    }
    let mut segments = url.path_segments()?;
    match segments.next()? {
        "channel" => segments
            .next()
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string()),
        _ => None,
    }
}

/// Extract a comment ID from a url, or pass a bare ID through unchanged.
/// Comment links are watch urls with the comment in the `lc` parameter.
pub fn extract_comment_id(input: &str) -> Option<String> {
    let url = match normalize(input)? {
        Target::Bare(id) => return Some(id.to_string()),
        Target::Link(url) => url,
    };
    if !is_youtube_host(&url) && url.host_str() != Some("youtu.be") {
        return None;
    }
    query_param(&url, "lc")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn video_id_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
    #[test]
    fn video_id_from_mangled_short_link() {
        assert_eq!(
            extract_video_id("https://youtu.be/oTJRivZTMLs&feature=channel").as_deref(),
            Some("oTJRivZTMLs")
        );
    }
    #[test]
    fn video_id_from_embed_and_shorts() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }
    #[test]
    fn video_id_from_attribution_link() {
        assert_eq!(
            extract_video_id(
                "https://www.youtube.com/attribution_link?a=qeBIoZZWnGE&u=%2Fwatch%3Fv%3DEhxJLojIE_o%26feature%3Dshare"
            )
            .as_deref(),
            Some("EhxJLojIE_o")
        );
    }
    #[test]
    fn video_id_is_idempotent() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    }
    #[test]
    fn unrecognizable_input_yields_none() {
        assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
    }
    #[test]
    fn playlist_id_from_urls() {
        let expected = "PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-";
        assert_eq!(
            extract_playlist_id(
                "https://www.youtube.com/playlist?list=PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-"
            )
            .as_deref(),
            Some(expected)
        );
        assert_eq!(
            extract_playlist_id(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-"
            )
            .as_deref(),
            Some(expected)
        );
        assert_eq!(
            extract_playlist_id(
                "https://www.youtube.com/attribution_link?a=qeBIoZZWnGE&u=%2Fplaylist%3Flist%3DPLwZcI0zn-JheRhv7jIV5Dl6IJQTuHR5e-%26feature%3Dshare"
            )
            .as_deref(),
            Some(expected)
        );
    }
    #[test]
    fn channel_id_from_urls() {
        let expected = "UC1VSDiiRQZRTbxNvWhIrJfw";
        assert_eq!(
            extract_channel_id("https://www.youtube.com/channel/UC1VSDiiRQZRTbxNvWhIrJfw")
                .as_deref(),
            Some(expected)
        );
        assert_eq!(
            extract_channel_id(
                "https://www.youtube.com/attribution_link?a=qeBIoZZWnGE&u=%2Fchannel%2FUC1VSDiiRQZRTbxNvWhIrJfw%3Ffeature%3Dshare"
            )
            .as_deref(),
            Some(expected)
        );
    }
    #[test]
    fn comment_id_from_urls() {
        let expected = "UgxMlgSMOq5LGVTF-zV4AaABAg";
        assert_eq!(
            extract_comment_id(
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&lc=UgxMlgSMOq5LGVTF-zV4AaABAg"
            )
            .as_deref(),
            Some(expected)
        );
        assert_eq!(
            extract_comment_id(
                "https://www.youtube.com/attribution_link?a=qeBIoZZWnGE&u=%2Fwatch%3Fv%3DdQw4w9WgXcQ%26lc%3DUgxMlgSMOq5LGVTF-zV4AaABAg"
            )
            .as_deref(),
            Some(expected)
        );
    }
}
