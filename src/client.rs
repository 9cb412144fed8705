//! This module contains the basic HTTP client used in this library.
use crate::error::{Error, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::time::Duration;

/// Basic HTTP client using TLS wrapping a `reqwest::Client`,
/// with the minimum required features to call the Data API.
/// Clone is low cost, internals of `reqwest::Client` are wrapped in an Arc.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::Client,
}

/// Represents a basic response from our basic HTTP client.
pub struct QueryResponse {
    pub text: String,
    pub status_code: u16,
}

/// Represents a raw binary response from our basic HTTP client, as used for
/// thumbnail, banner and caption track downloads.
pub struct BytesResponse {
    pub bytes: Vec<u8>,
    pub status_code: u16,
    pub content_type: Option<String>,
}

impl QueryResponse {
    async fn try_from_reqwest_response(response: reqwest::Response) -> Result<Self> {
        let status_code = response.status().as_u16();
        let text = response.text().await?;
        Ok(QueryResponse { text, status_code })
    }
}

impl BytesResponse {
    async fn try_from_reqwest_response(response: reqwest::Response) -> Result<Self> {
        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_owned());
        let bytes = response.bytes().await?.to_vec();
        Ok(BytesResponse {
            bytes,
            status_code,
            content_type,
        })
    }
}

// Requests time out individually, so a timeout error needs to report the
// limit the caller configured rather than a reqwest internal.
fn map_send_error(e: reqwest::Error, timeout: Option<Duration>) -> Error {
    match (e.is_timeout(), timeout) {
        (true, Some(limit)) => Error::timeout(limit),
        _ => Error::from(e),
    }
}

impl Client {
    /// Utilises reqwest's default tls choice for the enabled set of options.
    pub fn new() -> Result<Self> {
        let inner = reqwest::Client::builder().build()?;
        Ok(Self { inner })
    }
    #[cfg(feature = "rustls-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rustls-tls")))]
    /// Force the use of rustls-tls
    pub fn new_rustls_tls() -> Result<Self> {
        let inner = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { inner })
    }
    #[cfg(feature = "native-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "native-tls")))]
    /// Force the use of native-tls
    pub fn new_native_tls() -> Result<Self> {
        let inner = reqwest::Client::builder().use_native_tls().build()?;
        Ok(Self { inner })
    }
    pub(crate) fn from_reqwest_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
        let inner = builder.build()?;
        Ok(Self { inner })
    }
    /// Run a GET query, with url, key/value params, headers and an optional
    /// per-request timeout.
    pub async fn get_query<'a, I>(
        &self,
        url: impl AsRef<str>,
        headers: impl IntoIterator<IntoIter = I>,
        params: &(impl Serialize + ?Sized),
        timeout: Option<Duration>,
    ) -> Result<QueryResponse>
    where
        I: Iterator<Item = (&'a str, Cow<'a, str>)>,
    {
        let mut request_builder = self.inner.get(url.as_ref()).query(params);
        for (header, value) in headers {
            request_builder = request_builder.header(header, value.as_ref());
        }
        if let Some(limit) = timeout {
            request_builder = request_builder.timeout(limit);
        }
        let response = request_builder
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;
        QueryResponse::try_from_reqwest_response(response).await
    }
    /// Run a GET query returning the raw response body, with url, headers and
    /// an optional per-request timeout.
    pub async fn get_bytes<'a, I>(
        &self,
        url: impl AsRef<str>,
        headers: impl IntoIterator<IntoIter = I>,
        timeout: Option<Duration>,
    ) -> Result<BytesResponse>
    where
        I: Iterator<Item = (&'a str, Cow<'a, str>)>,
    {
        let mut request_builder = self.inner.get(url.as_ref());
        for (header, value) in headers {
            request_builder = request_builder.header(header, value.as_ref());
        }
        if let Some(limit) = timeout {
            request_builder = request_builder.timeout(limit);
        }
        let response = request_builder
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;
        BytesResponse::try_from_reqwest_response(response).await
    }
}
