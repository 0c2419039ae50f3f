//! HTTP transport settings and the request executor.
//!
//! [`RequestExecutor`] performs exactly one HTTP exchange per call and folds the
//! outcome into an [`ApiResponse`]. It holds no per-call state, so a single
//! executor can be shared by any number of concurrent callers.

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::response::{server_message, ApiResponse, StatusInfo};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default timeout for establishing a TCP connection, in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default `User-Agent` sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("connect-client/", env!("CARGO_PKG_VERSION"));

const APPLICATION_JSON: &str = "application/json";

/// HTTP client configuration.
///
/// Only used when the executor builds its own `reqwest::Client`; callers that
/// bring their own client configure it directly.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout; requests may wait indefinitely when absent
    pub timeout: Option<Duration>,

    /// Connection establishment timeout
    pub connect_timeout: Duration,

    /// User agent header value
    pub user_agent: String,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Build a `reqwest::Client` from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TLS backend cannot be initialised.
    pub fn build_http_client(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if !self.enable_compression {
            builder = builder.no_gzip();
        }

        builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes single HTTP requests and normalizes their outcome.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: Client,
    credentials: Option<Credentials>,
}

impl RequestExecutor {
    /// Create an executor on top of an existing HTTP client.
    #[must_use]
    pub fn new(http: Client, credentials: Option<Credentials>) -> Self {
        Self { http, credentials }
    }

    /// Create an executor with a client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig, credentials: Option<Credentials>) -> Result<Self> {
        Ok(Self::new(config.build_http_client()?, credentials))
    }

    /// True when requests carry basic authentication.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(Credentials::is_complete)
    }

    /// Prepare a request with the JSON and authentication headers applied.
    pub fn build_request(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> RequestBuilder {
        let sends_body = method == Method::POST || method == Method::PUT;
        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, APPLICATION_JSON);

        if sends_body {
            request = request.header(CONTENT_TYPE, APPLICATION_JSON);
        }

        if let Some(credentials) = self.credentials.as_ref().filter(|c| c.is_complete()) {
            request = request.basic_auth(credentials.username(), Some(credentials.password()));
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        request
    }

    /// Perform one request and decode a successful, non-empty body into `T`.
    pub async fn execute<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        debug!(%method, %url, "Connect request");

        let response = match self
            .build_request(method.clone(), url.clone(), body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(%method, %url, error = %err, "Connect request failed");
                return ApiResponse::failed(Error::from(err));
            }
        };

        let code = response.status();
        let status = StatusInfo::from_status(code);
        debug!(%method, %url, status = code.as_u16(), "Connect response");

        if code.as_u16() >= 400 {
            let message = match response.bytes().await {
                Ok(bytes) => server_message(&bytes),
                Err(_) => None,
            };
            return ApiResponse::status_only(status.with_server_message(message));
        }

        if !code.is_success() {
            return ApiResponse::status_only(status);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                return ApiResponse::undecodable(
                    status,
                    Error::ParseError(format!("Failed to read response body for `{url}`: {err}")),
                );
            }
        };

        if bytes.is_empty() {
            return ApiResponse::status_only(status);
        }

        match serde_json::from_slice::<T>(&bytes) {
            Ok(payload) => ApiResponse::success(payload, status),
            Err(err) => {
                warn!(%method, %url, error = %err, "Failed to decode Connect response");
                ApiResponse::undecodable(
                    status,
                    Error::ParseError(format!("Failed to decode response for `{url}`: {err}")),
                )
            }
        }
    }

    /// Encode `body` as JSON and [`execute`](Self::execute) the request.
    pub async fn execute_json<B, T>(&self, method: Method, url: Url, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.execute(method, url, Some(bytes)).await,
            Err(err) => ApiResponse::failed(Error::EncodeError(err.to_string())),
        }
    }
}
