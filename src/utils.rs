pub mod constants {
    use const_format::concatcp;

    pub const YOUTUBE_URL: &str = "https://www.youtube.com";
    pub const API_VERSION: &str = "3";
    pub const API_BASE: &str = "https://www.googleapis.com/youtube/v";
    pub const API_URL: &str = concatcp!(API_BASE, API_VERSION, "/");
    pub const WATCH_URL: &str = concatcp!(YOUTUBE_URL, "/watch?v=");
    pub const CHANNEL_URL: &str = concatcp!(YOUTUBE_URL, "/channel/");
    pub const PLAYLIST_URL: &str = concatcp!(YOUTUBE_URL, "/playlist?list=");
    pub const CENSORED_KEY: &str = "API_KEY";
    /// The API returns at most this many items per page, and accepts at most
    /// this many IDs per call.
    pub const MAX_IDS_PER_CALL: usize = 50;
}
use itertools::Itertools;
use std::borrow::Cow;

/// Replace the value of any `key` query parameter with a placeholder,
/// leaving the rest of the url untouched. Used on the call urls stored on
/// decoded resources so the API key is not leaked through debug output.
pub fn censor_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let censored = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("key", _)) => Cow::Owned(format!("key={}", constants::CENSORED_KEY)),
            _ => Cow::Borrowed(pair),
        })
        .join("&");
    format!("{base}?{censored}")
}

/// Convert a camelCase API token to the snake_case convention used in this
/// library's display output.
pub fn camel_to_snake(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse an ISO-8601 duration of the form the Data API emits
/// (e.g. `PT1H2M3S`, `P1DT12H`, `PT0S`). Years and months are rejected as
/// they have no fixed length. Returns None on any malformed input.
pub fn parse_iso8601_duration(s: &str) -> Option<chrono::Duration> {
    let rest = s.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (rest, None),
    };
    let mut millis: i64 = 0;
    let mut parse_fields = |part: &str, designators: &[(char, i64)]| -> Option<()> {
        let mut num = String::new();
        let mut last_idx = usize::MAX;
        for c in part.chars() {
            if c.is_ascii_digit() || c == '.' {
                num.push(c);
                continue;
            }
            let idx = designators.iter().position(|(d, _)| *d == c)?;
            // Designators must appear at most once, in order.
            if num.is_empty() || (last_idx != usize::MAX && idx <= last_idx) {
                return None;
            }
            let value: f64 = num.parse().ok()?;
            millis += (value * designators[idx].1 as f64 * 1000.0).round() as i64;
            num.clear();
            last_idx = idx;
        }
        if num.is_empty() {
            Some(())
        } else {
            None
        }
    };
    parse_fields(date_part, &[('W', 604_800), ('D', 86_400)])?;
    if let Some(time_part) = time_part {
        if time_part.is_empty() {
            return None;
        }
        parse_fields(time_part, &[('H', 3600), ('M', 60), ('S', 1)])?;
    }
    Some(chrono::Duration::milliseconds(millis))
}

macro_rules! impl_resource_id {
    ($id:ident<$lt:lifetime>) => {
        impl<$lt> crate::common::ResourceId<$lt> for $id<$lt> {
            fn get_raw(&self) -> &str {
                &self.0
            }
            fn from_raw<S: Into<std::borrow::Cow<$lt, str>>>(raw_str: S) -> Self {
                Self(raw_str.into())
            }
        }
        impl<$lt> From<&$lt str> for $id<$lt> {
            fn from(raw_str: &$lt str) -> Self {
                Self(raw_str.into())
            }
        }
        impl From<String> for $id<'static> {
            fn from(raw_str: String) -> Self {
                Self(raw_str.into())
            }
        }
        impl<$lt> std::fmt::Display for $id<$lt> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::{camel_to_snake, censor_key, parse_iso8601_duration};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn censor_key_replaces_only_the_key_value() {
        let url = "https://www.googleapis.com/youtube/v3/videos?part=snippet%2CcontentDetails&id=dQw4w9WgXcQ&key=IMAGINARY_TOKEN";
        assert_eq!(
            censor_key(url),
            "https://www.googleapis.com/youtube/v3/videos?part=snippet%2CcontentDetails&id=dQw4w9WgXcQ&key=API_KEY"
        );
    }
    #[test]
    fn censor_key_without_query_is_untouched() {
        let url = "https://www.googleapis.com/youtube/v3/videos";
        assert_eq!(censor_key(url), url);
    }
    #[test]
    fn camel_tokens_become_snake() {
        assert_eq!(camel_to_snake("creativeCommon"), "creative_common");
        assert_eq!(camel_to_snake("streamingFailed"), "streaming_failed");
        assert_eq!(camel_to_snake("none"), "none");
    }
    #[test]
    fn durations_parse() {
        assert_eq!(parse_iso8601_duration("PT3M33S"), Some(Duration::seconds(213)));
        assert_eq!(
            parse_iso8601_duration("P1DT2H3M4S"),
            Some(Duration::seconds(86400 + 7384))
        );
        assert_eq!(parse_iso8601_duration("PT0S"), Some(Duration::zero()));
        assert_eq!(parse_iso8601_duration("P2W"), Some(Duration::weeks(2)));
        assert_eq!(
            parse_iso8601_duration("PT1.5S"),
            Some(Duration::milliseconds(1500))
        );
    }
    #[test]
    fn malformed_durations_rejected() {
        assert_eq!(parse_iso8601_duration(""), None);
        assert_eq!(parse_iso8601_duration("PT"), None);
        assert_eq!(parse_iso8601_duration("P1Y"), None);
        assert_eq!(parse_iso8601_duration("PT3M33"), None);
        assert_eq!(parse_iso8601_duration("3M33S"), None);
        assert_eq!(parse_iso8601_duration("PT33S3M"), None);
    }
}
