use crate::client::Client;
use crate::context::{ApiContext, Auth};
use crate::error::{Error, Result};
use crate::utils::constants::{API_BASE, API_VERSION};
use crate::YtData;
use std::time::Duration;

pub enum ClientOptions {
    Default,
    #[cfg(feature = "rustls-tls")]
    Rustls,
    #[cfg(feature = "native-tls")]
    Native,
    Existing(Client),
}

/// Configures and constructs a [`YtData`] handle.
///
/// At least one credential must be supplied before [`build`](Self::build):
/// an API key, a bearer token, or both. With both, the key is used unless
/// [`prefer_bearer_auth`](Self::prefer_bearer_auth) is set.
pub struct YtDataBuilder {
    tls: ClientOptions,
    api_key: Option<String>,
    bearer_token: Option<String>,
    prefer_bearer: bool,
    timeout: Option<Duration>,
    api_version: String,
    accept_invalid_certs: bool,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

impl Default for YtDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDataBuilder {
    pub fn new() -> Self {
        YtDataBuilder {
            tls: ClientOptions::Default,
            api_key: None,
            bearer_token: None,
            prefer_bearer: false,
            timeout: Some(DEFAULT_TIMEOUT),
            api_version: API_VERSION.to_string(),
            accept_invalid_certs: false,
        }
    }
    pub fn with_client(mut self, client: Client) -> Self {
        self.tls = ClientOptions::Existing(client);
        self
    }
    #[cfg(feature = "rustls-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rustls-tls")))]
    pub fn with_rustls_tls(mut self) -> Self {
        self.tls = ClientOptions::Rustls;
        self
    }
    #[cfg(feature = "native-tls")]
    #[cfg_attr(docsrs, doc(cfg(feature = "native-tls")))]
    pub fn with_native_tls(mut self) -> Self {
        self.tls = ClientOptions::Native;
        self
    }
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
    /// Authorise with the bearer token even when an API key is also set.
    pub fn prefer_bearer_auth(mut self) -> Self {
        self.prefer_bearer = true;
        self
    }
    /// Per-request time limit. Defaults to 5 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn with_no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
    /// Call a different version of the Data API. Defaults to version 3.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
    /// Disable certificate verification. Only of use against intercepting
    /// proxies during debugging.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
    pub fn build(self) -> Result<YtData> {
        let YtDataBuilder {
            tls,
            api_key,
            bearer_token,
            prefer_bearer,
            timeout,
            api_version,
            accept_invalid_certs,
        } = self;
        let auth = match (api_key, bearer_token) {
            (_, Some(token)) if prefer_bearer => Auth::Bearer(token),
            (Some(key), _) => Auth::ApiKey(key),
            (None, Some(token)) => Auth::Bearer(token),
            (None, None) => return Err(Error::no_auth()),
        };
        let client = build_client(tls, accept_invalid_certs)?;
        let base_url = format!("{API_BASE}{api_version}/");
        Ok(YtData::from_context(ApiContext::new(
            client, auth, base_url, timeout,
        )))
    }
}

fn build_client(tls: ClientOptions, accept_invalid_certs: bool) -> Result<Client> {
    if !accept_invalid_certs {
        return match tls {
            ClientOptions::Default => Client::new(),
            #[cfg(feature = "rustls-tls")]
            ClientOptions::Rustls => Client::new_rustls_tls(),
            #[cfg(feature = "native-tls")]
            ClientOptions::Native => Client::new_native_tls(),
            ClientOptions::Existing(client) => Ok(client),
        };
    }
    let builder = match tls {
        ClientOptions::Default => reqwest::Client::builder(),
        #[cfg(feature = "rustls-tls")]
        ClientOptions::Rustls => reqwest::Client::builder().use_rustls_tls(),
        #[cfg(feature = "native-tls")]
        ClientOptions::Native => reqwest::Client::builder().use_native_tls(),
        ClientOptions::Existing(client) => return Ok(client),
    };
    Client::from_reqwest_builder(builder.danger_accept_invalid_certs(true))
}
