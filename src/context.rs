//! The call orchestrator shared by the public handle and decoded resources.
//!
//! Decoded resources hold an [`ApiContext`] so their chained fetch methods
//! (e.g. video -> channel) can call the API without a reference back to the
//! public handle. The context exposes call and download capability only.
use crate::client::{BytesResponse, Client};
use crate::enums::{api_token, CaptionFormat};
use crate::error::{Error, ResourceKind, Result};
use crate::types::FromItem;
use crate::utils::censor_key;
use crate::utils::constants::MAX_IDS_PER_CALL;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// The credential requests are authorised with.
#[derive(Debug, Clone)]
pub(crate) enum Auth {
    /// Sent as the `key` query parameter.
    ApiKey(String),
    /// Sent as an `Authorization: Bearer` header.
    Bearer(String),
}

#[derive(Debug)]
struct ContextInner {
    client: Client,
    auth: Auth,
    base_url: String,
    timeout: Option<Duration>,
}

/// Shared call/download capability. Clone is low cost.
#[derive(Debug, Clone)]
pub(crate) struct ApiContext {
    inner: Arc<ContextInner>,
}

/// The identifiers one logical call acts on.
pub(crate) enum CallIds {
    /// Resource IDs, batched 50 at a time. Results are reconciled against
    /// the request and any ID the API had no record of raises not-found.
    Batched(Vec<String>),
    /// One resource ID expected to yield exactly one item.
    Single(String),
    /// One key (playlist ID, video ID, search term, ...) yielding any
    /// number of items.
    Keyed(String),
}

/// Description of one logical API call.
pub(crate) struct CallSpec<'a> {
    pub kind: &'a str,
    pub id_param: &'a str,
    pub ids: CallIds,
    pub parts: &'a [&'a str],
    pub page_size: Option<u32>,
    pub item_cap: Option<usize>,
    pub extra: Vec<(String, String)>,
    pub resource: ResourceKind,
}

impl ApiContext {
    pub(crate) fn new(
        client: Client,
        auth: Auth,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                client,
                auth,
                base_url,
                timeout,
            }),
        }
    }
    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.inner.base_url
    }
    fn headers(&self) -> Vec<(&str, Cow<'_, str>)> {
        match &self.inner.auth {
            Auth::ApiKey(_) => Vec::new(),
            Auth::Bearer(token) => vec![("Authorization", Cow::Owned(format!("Bearer {token}")))],
        }
    }
    fn build_url(
        &self,
        spec: &CallSpec<'_>,
        ids: &str,
        page_token: Option<&str>,
    ) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.inner.base_url, spec.kind))
            .map_err(|_| Error::invalid_input(format!("invalid endpoint {}", spec.kind)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("part", &spec.parts.join(","));
            pairs.append_pair(spec.id_param, ids);
            for (key, value) in &spec.extra {
                pairs.append_pair(key, value);
            }
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
            if let Some(size) = spec.page_size {
                pairs.append_pair("maxResults", &size.to_string());
            }
            if let Auth::ApiKey(key) = &self.inner.auth {
                pairs.append_pair("key", key);
            }
        }
        Ok(url)
    }
    async fn fetch_page(
        &self,
        url: &Url,
        resource: ResourceKind,
        requested_ids: &[String],
    ) -> Result<Value> {
        // Bearer credentials travel as a header so the token never appears
        // in stored call urls.
        let response = self
            .inner
            .client
            .get_query(
                url.as_str(),
                self.headers(),
                &[] as &[(&str, &str)],
                self.inner.timeout,
            )
            .await?;
        let json: Value = match serde_json::from_str(&response.text) {
            Ok(json) => json,
            Err(_) if (200..300).contains(&response.status_code) => {
                return Err(Error::response(&response.text))
            }
            Err(_) => return Err(Error::http(response.status_code, &response.text)),
        };
        if let Some(error) = classify_api_error(&json, response.status_code, resource, requested_ids)
        {
            return Err(error);
        }
        if !(200..300).contains(&response.status_code) {
            return Err(Error::http(response.status_code, &response.text));
        }
        Ok(json)
    }
    /// Execute a call, following result pages and splitting over-long ID
    /// lists, and decode every returned item in request order.
    pub(crate) async fn call_api<T: FromItem>(&self, spec: CallSpec<'_>) -> Result<Vec<T>> {
        let (chunks, reconcile) = match &spec.ids {
            CallIds::Batched(ids) => {
                if ids.is_empty() || ids.iter().any(|id| id.is_empty()) {
                    return Err(Error::invalid_input("no IDs were provided"));
                }
                let chunks: Vec<Vec<String>> = ids
                    .chunks(MAX_IDS_PER_CALL)
                    .map(|chunk| chunk.to_vec())
                    .collect();
                (chunks, true)
            }
            CallIds::Single(id) | CallIds::Keyed(id) => {
                if id.is_empty() {
                    return Err(Error::invalid_input("no ID was provided"));
                }
                (vec![vec![id.clone()]], false)
            }
        };
        let all_ids: Vec<String> = chunks.iter().flatten().cloned().collect();
        let mut out = Vec::new();
        for chunk in &chunks {
            let joined = chunk.join(",");
            let mut page_token: Option<String> = None;
            let mut returned_ids: Vec<String> = Vec::new();
            loop {
                let url = self.build_url(&spec, &joined, page_token.as_deref())?;
                let json = self.fetch_page(&url, spec.resource, chunk).await?;
                let censored_url = censor_key(url.as_str());
                if let Some(items) = json.get("items").and_then(Value::as_array) {
                    for item in items {
                        if let Some(id) = item.get("id").and_then(Value::as_str) {
                            returned_ids.push(id.to_string());
                        }
                        out.push(T::from_item(item.clone(), &censored_url, self)?);
                    }
                }
                page_token = json
                    .get("nextPageToken")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let cap_reached = spec
                    .item_cap
                    .map(|cap| out.len() >= cap)
                    .unwrap_or(false);
                if page_token.is_none() || cap_reached {
                    break;
                }
            }
            if reconcile {
                let missing: Vec<String> = chunk
                    .iter()
                    .filter(|id| !returned_ids.iter().any(|r| r == *id))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    return Err(Error::not_found(spec.resource, missing));
                }
            }
        }
        // A listing legitimately comes back empty (a search with no hits, a
        // video with no comment threads). Only a single-resource lookup
        // yielding nothing means the resource does not exist.
        if out.is_empty() && matches!(spec.ids, CallIds::Single(_)) {
            return Err(Error::not_found(spec.resource, all_ids));
        }
        if let Some(cap) = spec.item_cap {
            out.truncate(cap);
        }
        Ok(out)
    }
    async fn download(&self, url: &str, with_auth: bool) -> Result<BytesResponse> {
        let headers = if with_auth { self.headers() } else { Vec::new() };
        let response = self
            .inner
            .client
            .get_bytes(url, headers, self.inner.timeout)
            .await?;
        if !(200..300).contains(&response.status_code) {
            return Err(Error::http(
                response.status_code,
                String::from_utf8_lossy(&response.bytes),
            ));
        }
        Ok(response)
    }
    /// Download a thumbnail image. The API serves thumbnails as jpeg; any
    /// other content type is treated as an error.
    pub(crate) async fn download_thumbnail(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.download(url, false).await?;
        match response.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/jpeg") => Ok(response.bytes),
            other => Err(Error::http(
                response.status_code,
                format!("Expected image/jpeg, got {}", other.unwrap_or("no content type")),
            )),
        }
    }
    /// Download a channel banner. Returns the image bytes along with the
    /// file extension implied by the response content type.
    pub(crate) async fn download_banner(&self, url: &str) -> Result<(Vec<u8>, String)> {
        let response = self.download(url, false).await?;
        let extension = response
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .and_then(|ct| ct.split('/').nth(1))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::http(response.status_code, "Response carried no content type")
            })?;
        Ok((response.bytes, extension))
    }
    /// Download a caption track in the requested format. Caption downloads
    /// are only served to the video owner's bearer token.
    pub(crate) async fn download_caption(
        &self,
        caption_id: &str,
        format: Option<CaptionFormat>,
        language: Option<&str>,
    ) -> Result<Vec<u8>> {
        if !matches!(self.inner.auth, Auth::Bearer(_)) {
            return Err(Error::no_auth());
        }
        let mut url = Url::parse(&format!("{}captions/{caption_id}", self.inner.base_url))
            .map_err(|_| Error::invalid_input(format!("invalid caption ID {caption_id}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(token) = format.as_ref().and_then(api_token) {
                pairs.append_pair("tfmt", &token);
            }
            if let Some(language) = language {
                pairs.append_pair("tlang", language);
            }
        }
        let response = self.download(url.as_str(), true).await?;
        Ok(response.bytes)
    }
}

/// Classify an error object embedded in an API response. Reasons ending in
/// `NotFound` map to the resource-specific not-found error carrying the
/// requested IDs.
fn classify_api_error(
    json: &Value,
    status: u16,
    resource: ResourceKind,
    requested_ids: &[String],
) -> Option<Error> {
    let error = json.get("error")?;
    let not_found = error
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("reason").and_then(Value::as_str))
                .any(|reason| reason.ends_with("NotFound"))
        })
        .unwrap_or(false);
    if not_found {
        return Some(Error::not_found(resource, requested_ids.to_vec()));
    }
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error");
    let code = error
        .get("code")
        .and_then(Value::as_u64)
        .map(|code| code as u16)
        .unwrap_or(status);
    Some(Error::http(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn test_context() -> ApiContext {
        ApiContext::new(
            Client::new().unwrap(),
            Auth::ApiKey("IMAGINARY_TOKEN".to_string()),
            crate::utils::constants::API_URL.to_string(),
            None,
        )
    }
    fn spec(ids: CallIds) -> CallSpec<'static> {
        CallSpec {
            kind: "videos",
            id_param: "id",
            ids,
            parts: &["snippet"],
            page_size: Some(50),
            item_cap: None,
            extra: Vec::new(),
            resource: ResourceKind::Video,
        }
    }

    #[test]
    fn urls_carry_parts_ids_and_censored_key() {
        let ctx = test_context();
        let url = ctx
            .build_url(&spec(CallIds::Single("dQw4w9WgXcQ".to_string())), "dQw4w9WgXcQ", None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/videos?part=snippet&id=dQw4w9WgXcQ&maxResults=50&key=IMAGINARY_TOKEN"
        );
        assert_eq!(
            censor_key(url.as_str()),
            "https://www.googleapis.com/youtube/v3/videos?part=snippet&id=dQw4w9WgXcQ&maxResults=50&key=API_KEY"
        );
    }
    #[test]
    fn page_tokens_appear_in_urls() {
        let ctx = test_context();
        let url = ctx
            .build_url(&spec(CallIds::Keyed("PL123".to_string())), "PL123", Some("CAUQAA"))
            .unwrap();
        assert!(url.as_str().contains("pageToken=CAUQAA"));
    }
    #[test]
    fn embedded_not_found_reasons_classify() {
        let body = json!({
            "error": {
                "code": 404,
                "message": "The video identified by the id parameter cannot be found.",
                "errors": [{"reason": "videoNotFound"}],
            }
        });
        let ids = vec!["gone".to_string()];
        let error = classify_api_error(&body, 200, ResourceKind::Video, &ids).unwrap();
        match error.into_kind() {
            ErrorKind::ResourceNotFound { kind, ids } => {
                assert_eq!(kind, ResourceKind::Video);
                assert_eq!(ids, vec!["gone".to_string()]);
            }
            other => panic!("expected not found, got {other}"),
        }
    }
    #[test]
    fn embedded_errors_classify_to_http() {
        let body = json!({
            "error": {
                "code": 403,
                "message": "quotaExceeded",
                "errors": [{"reason": "quotaExceeded"}],
            }
        });
        let error = classify_api_error(&body, 200, ResourceKind::Video, &[]).unwrap();
        match error.into_kind() {
            ErrorKind::HttpError { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "quotaExceeded");
            }
            other => panic!("expected http error, got {other}"),
        }
    }
    #[test]
    fn clean_responses_are_not_classified() {
        assert!(classify_api_error(&json!({"items": []}), 200, ResourceKind::Video, &[]).is_none());
    }
    // Answers `requests` HTTP requests, echoing back an item per requested
    // ID, and logs the ID list each request carried.
    async fn serve_item_lists(
        requests: usize,
    ) -> (String, std::sync::Arc<std::sync::Mutex<Vec<Vec<String>>>>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let log = std::sync::Arc::clone(&seen);
        tokio::spawn(async move {
            for _ in 0..requests {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 16384];
                let n = stream.read(&mut buf).await.unwrap();
                let request = String::from_utf8_lossy(&buf[..n]).into_owned();
                let target = request.split_whitespace().nth(1).unwrap().to_string();
                let url = Url::parse(&format!("http://stub{target}")).unwrap();
                let ids: Vec<String> = url
                    .query_pairs()
                    .find(|(key, _)| key == "id")
                    .map(|(_, value)| value.split(',').map(str::to_string).collect())
                    .unwrap_or_default();
                log.lock().unwrap().push(ids.clone());
                let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
                let body = json!({"items": items}).to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{}",
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.unwrap();
            }
        });
        (format!("http://{addr}/"), seen)
    }
    // Answers one HTTP request with a fixed body.
    async fn serve_once(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16384];
            let _ = stream.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/")
    }
    fn stub_context(base_url: String) -> ApiContext {
        ApiContext::new(
            Client::new().unwrap(),
            Auth::ApiKey("IMAGINARY_TOKEN".to_string()),
            base_url,
            None,
        )
    }

    #[tokio::test]
    async fn keyed_listings_may_be_empty() {
        let base = serve_once(r#"{"items": []}"#).await;
        let ctx = stub_context(base);
        let listing = CallSpec {
            kind: "commentThreads",
            id_param: "videoId",
            ids: CallIds::Keyed("dQw4w9WgXcQ".to_string()),
            parts: &["snippet"],
            page_size: Some(50),
            item_cap: None,
            extra: Vec::new(),
            resource: ResourceKind::Video,
        };
        let out: Vec<crate::types::PartialChannel> = ctx.call_api(listing).await.unwrap();
        assert!(out.is_empty());
    }
    #[tokio::test]
    async fn single_lookups_with_no_items_are_not_found() {
        let base = serve_once(r#"{"items": []}"#).await;
        let ctx = stub_context(base);
        let error = ctx
            .call_api::<crate::types::PartialChannel>(spec(CallIds::Single(
                "dQw4w9WgXcQ".to_string(),
            )))
            .await
            .unwrap_err();
        match error.into_kind() {
            ErrorKind::ResourceNotFound { kind, ids } => {
                assert_eq!(kind, ResourceKind::Video);
                assert_eq!(ids, vec!["dQw4w9WgXcQ".to_string()]);
            }
            other => panic!("expected not found, got {other}"),
        }
    }
    #[tokio::test]
    async fn over_long_id_lists_are_split_and_merged_in_order() {
        let (base, seen) = serve_item_lists(2).await;
        let ctx = stub_context(base);
        let ids: Vec<String> = (0..51).map(|n| format!("UC{n:03}")).collect();
        let batched = CallSpec {
            kind: "channels",
            id_param: "id",
            ids: CallIds::Batched(ids.clone()),
            parts: &["id"],
            page_size: Some(50),
            item_cap: None,
            extra: Vec::new(),
            resource: ResourceKind::Channel,
        };
        let out: Vec<crate::types::PartialChannel> = ctx.call_api(batched).await.unwrap();
        let returned: Vec<String> = out.iter().map(|channel| channel.id.to_string()).collect();
        assert_eq!(returned, ids);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].len(), 50);
        assert_eq!(seen[1], vec!["UC050".to_string()]);
    }
    #[tokio::test]
    async fn empty_id_input_is_invalid() {
        let ctx = test_context();
        let result = ctx
            .call_api::<crate::types::PartialChannel>(spec(CallIds::Batched(Vec::new())))
            .await;
        assert!(matches!(
            result.unwrap_err().into_kind(),
            ErrorKind::InvalidInput { .. }
        ));
    }
}
