//! Configuration structures for Kafka Connect clients.
//!
//! This module provides the worker endpoint configuration, optional basic
//! authentication credentials, and their validation.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Username and password sent as HTTP basic authentication.
///
/// Credentials are only attached to requests when both parts are non-empty.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    /// True when both username and password are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.expose_secret().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for a Kafka Connect client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConnectClientConfig {
    /// Base URL of the Connect worker REST API
    #[validate(url)]
    pub url: String,

    /// Optional basic authentication username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Optional basic authentication password
    #[serde(default, skip_serializing, deserialize_with = "deserialize_secret")]
    pub password: Option<SecretString>,

    /// Request timeout in seconds; no timeout when absent
    #[validate(range(min = 1, max = 300))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(SecretString::from))
}

impl ConnectClientConfig {
    /// Create a new client configuration for the given worker URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the Connect REST API (e.g., "http://connect:8083")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            username: None,
            password: None,
            request_timeout_secs: None,
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }

    /// Set basic authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Get the request timeout as a Duration, if set.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Credentials, when both username and password are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Parse and validate the worker URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or is not an HTTP(S) URL.
    pub fn parse_url(&self) -> Result<Url, Error> {
        parse_base_url(&self.url)
    }
}

impl Default for ConnectClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8083".to_string(),
            username: None,
            password: None,
            request_timeout_secs: None,
        }
    }
}

/// Parse a worker base URL, accepting only `http` and `https`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the URL cannot serve as a base for resource paths.
pub fn parse_base_url(url: &str) -> Result<Url, Error> {
    let parsed =
        Url::parse(url).map_err(|e| Error::ConfigError(format!("Invalid Connect URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::ConfigError(format!(
            "Unsupported URL scheme `{scheme}` in `{url}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = ConnectClientConfig::new("http://connect:8083").unwrap();
        assert_eq!(config.url, "http://connect:8083");
        assert!(config.credentials().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_config_invalid_url() {
        let result = ConnectClientConfig::new("not-a-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = ConnectClientConfig::new("https://connect.example.com")
            .unwrap()
            .with_credentials("admin", "s3cret")
            .with_timeout(45);

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.username(), "admin");
        assert_eq!(credentials.password(), "s3cret");
        assert!(credentials.is_complete());
        assert_eq!(config.timeout(), Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_config_default() {
        let config = ConnectClientConfig::default();
        assert_eq!(config.url, "http://localhost:8083");
        assert!(config.username.is_none());
        assert!(config.password.is_none());
    }

    #[test]
    fn test_parse_url() {
        let config = ConnectClientConfig::new("https://connect.example.com:8083").unwrap();
        let url = config.parse_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("connect.example.com"));
        assert_eq!(url.port(), Some(8083));
    }

    #[test]
    fn test_parse_url_rejects_other_schemes() {
        let err = parse_base_url("ftp://connect.example.com").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_incomplete_credentials() {
        assert!(!Credentials::new("", "").is_complete());
        assert!(!Credentials::new("admin", "").is_complete());
        assert!(!Credentials::new("", "s3cret").is_complete());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("admin", "s3cret"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_config_deserialization() {
        let config: ConnectClientConfig = serde_json::from_str(
            r#"{"url":"http://connect:8083","username":"admin","password":"s3cret","request_timeout_secs":10}"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.credentials().unwrap().password(), "s3cret");
        assert_eq!(config.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_config_serialization_omits_password() {
        let config = ConnectClientConfig::new("http://connect:8083")
            .unwrap()
            .with_credentials("admin", "s3cret");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("admin"));
        assert!(!json.contains("s3cret"));

        let deserialized: ConnectClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.url, config.url);
        assert!(deserialized.password.is_none());
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = ConnectClientConfig::default();
        config.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.request_timeout_secs = Some(301);
        assert!(config.validate().is_err());

        config.request_timeout_secs = Some(30);
        assert!(config.validate().is_ok());

        config.request_timeout_secs = None;
        assert!(config.validate().is_ok());
    }
}
