//! Asynchronous Kafka Connect client implementation.

use crate::endpoint::Endpoint;
use crate::models::{
    ClusterInfo, ConfigValidation, Connector, ConnectorConfig, ConnectorExpansions,
    ConnectorPlugin, ConnectorStatus, ConnectorTopics, TaskInfo, TaskStatus,
};
use crate::Result;
use connect_core::client::{ClientConfig, RequestExecutor};
use connect_core::config::{parse_base_url, ConnectClientConfig, Credentials};
use connect_core::ApiResponse;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::debug;
use url::Url;

/// Builder for [`ConnectClient`].
#[derive(Debug, Clone)]
pub struct ConnectClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    http_client: Option<Client>,
    credentials: Option<Credentials>,
}

impl ConnectClientBuilder {
    /// Create a new builder with the provided Connect worker base URL.
    ///
    /// The URL should include the protocol and hostname (e.g. `http://connect:8083`),
    /// and may carry a path prefix when the API sits behind a proxy.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_ref())?;

        Ok(Self {
            base_url,
            http_config: ClientConfig::new(),
            http_client: None,
            credentials: None,
        })
    }

    /// Create a builder from a validated [`ConnectClientConfig`].
    pub fn from_config(config: &ConnectClientConfig) -> Result<Self> {
        let mut builder = Self::new(&config.url)?;
        if let Some(timeout) = config.timeout() {
            builder.http_config = builder.http_config.with_timeout(timeout);
        }
        builder.credentials = config.credentials();
        Ok(builder)
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use an existing `reqwest::Client` instead of building one.
    ///
    /// Timeouts, TLS settings and proxies then come from that client and the
    /// HTTP configuration of this builder is ignored.
    #[must_use]
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Configure HTTP basic authentication.
    ///
    /// Requests only carry the header when both values are non-empty.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    /// Build the Connect client.
    pub fn build(self) -> Result<ConnectClient> {
        let executor = match self.http_client {
            Some(http) => RequestExecutor::new(http, self.credentials),
            None => RequestExecutor::from_config(&self.http_config, self.credentials)?,
        };

        debug!(
            base_url = %self.base_url,
            authenticated = executor.has_credentials(),
            "Connect client ready"
        );

        Ok(ConnectClient {
            base_url: self.base_url,
            executor,
        })
    }
}

/// Asynchronous Kafka Connect client.
///
/// Every method performs one request and returns an [`ApiResponse`]. HTTP error
/// statuses are reported through the response status, not as errors.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    base_url: Url,
    executor: RequestExecutor,
}

impl ConnectClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ConnectClientBuilder::new(base_url)?.build()
    }

    /// Create a new client with basic authentication credentials.
    pub fn with_credentials(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        ConnectClientBuilder::new(base_url)?
            .with_basic_auth(username, password)
            .build()
    }

    /// Construct a client directly from the configuration.
    pub fn from_config(config: &ConnectClientConfig) -> Result<Self> {
        ConnectClientBuilder::from_config(config)?.build()
    }

    /// Start a builder for the given base URL.
    pub fn builder(base_url: impl AsRef<str>) -> Result<ConnectClientBuilder> {
        ConnectClientBuilder::new(base_url)
    }

    /// Access the underlying base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL an endpoint resolves to for this client.
    pub fn endpoint_url(&self, endpoint: &Endpoint<'_>) -> Result<Url> {
        endpoint.url(&self.base_url)
    }

    /// Worker version and Kafka cluster ID.
    pub async fn cluster(&self) -> ApiResponse<ClusterInfo> {
        self.call(Endpoint::Cluster).await
    }

    /// Names of all connectors.
    pub async fn connectors(&self) -> ApiResponse<Vec<String>> {
        self.call(Endpoint::Connectors).await
    }

    /// All connectors with their status and/or definition.
    pub async fn connectors_expanded(
        &self,
        status: bool,
        info: bool,
    ) -> ApiResponse<ConnectorExpansions> {
        self.call(Endpoint::ConnectorsExpanded { status, info }).await
    }

    /// Definition of a connector.
    pub async fn connector(&self, name: &str) -> ApiResponse<Connector> {
        self.call(Endpoint::Connector(name)).await
    }

    /// Configuration of a connector.
    pub async fn connector_config(&self, name: &str) -> ApiResponse<ConnectorConfig> {
        self.call(Endpoint::ConnectorConfig(name)).await
    }

    /// Status of a connector and its tasks.
    pub async fn connector_status(&self, name: &str) -> ApiResponse<ConnectorStatus> {
        self.call(Endpoint::ConnectorStatus(name)).await
    }

    /// Pause a connector and its tasks.
    pub async fn pause_connector(&self, name: &str) -> ApiResponse<()> {
        self.call_without_payload(Endpoint::PauseConnector(name)).await
    }

    /// Resume a paused connector.
    pub async fn resume_connector(&self, name: &str) -> ApiResponse<()> {
        self.call_without_payload(Endpoint::ResumeConnector(name)).await
    }

    /// Restart a connector, optionally with its tasks or only failed instances.
    ///
    /// Workers answer with the new status when tasks are involved, and with an
    /// empty body otherwise.
    pub async fn restart_connector(
        &self,
        name: &str,
        include_tasks: bool,
        only_failed: bool,
    ) -> ApiResponse<ConnectorStatus> {
        self.call(Endpoint::RestartConnector {
            name,
            include_tasks,
            only_failed,
        })
        .await
    }

    /// Delete a connector.
    pub async fn delete_connector(&self, name: &str) -> ApiResponse<()> {
        self.call_without_payload(Endpoint::DeleteConnector(name)).await
    }

    /// Create a connector.
    pub async fn create_connector(&self, connector: &Connector) -> ApiResponse<Connector> {
        self.call_json(Endpoint::CreateConnector, connector).await
    }

    /// Create or replace the configuration of a connector.
    pub async fn update_connector_config(
        &self,
        name: &str,
        config: &ConnectorConfig,
    ) -> ApiResponse<Connector> {
        self.call_json(Endpoint::UpdateConnectorConfig(name), config).await
    }

    /// Tasks of a connector with their configuration.
    pub async fn tasks(&self, name: &str) -> ApiResponse<Vec<TaskInfo>> {
        self.call(Endpoint::Tasks(name)).await
    }

    /// Status of a single task.
    pub async fn task_status(&self, name: &str, task: u32) -> ApiResponse<TaskStatus> {
        self.call(Endpoint::TaskStatus { name, task }).await
    }

    /// Restart a single task.
    pub async fn restart_task(&self, name: &str, task: u32) -> ApiResponse<()> {
        self.call_without_payload(Endpoint::RestartTask { name, task }).await
    }

    /// Topics a connector has used.
    pub async fn connector_topics(&self, name: &str) -> ApiResponse<ConnectorTopics> {
        self.call(Endpoint::ConnectorTopics(name)).await
    }

    /// Clear the set of topics recorded for a connector.
    pub async fn reset_connector_topics(&self, name: &str) -> ApiResponse<()> {
        self.call_without_payload(Endpoint::ResetConnectorTopics(name)).await
    }

    /// Connector plugins installed on the worker.
    pub async fn connector_plugins(&self) -> ApiResponse<Vec<ConnectorPlugin>> {
        self.call(Endpoint::ConnectorPlugins).await
    }

    /// Validate a configuration against a plugin without creating a connector.
    ///
    /// `plugin` is the class name, either fully qualified or the simple name.
    pub async fn validate_connector_config(
        &self,
        plugin: &str,
        config: &ConnectorConfig,
    ) -> ApiResponse<ConfigValidation> {
        self.call_json(Endpoint::ValidateConfig(plugin), config).await
    }

    async fn call<T>(&self, endpoint: Endpoint<'_>) -> ApiResponse<T>
    where
        T: DeserializeOwned,
    {
        match endpoint.url(&self.base_url) {
            Ok(url) => self.executor.execute(endpoint.method(), url, None).await,
            Err(err) => ApiResponse::failed(err),
        }
    }

    async fn call_json<B, T>(&self, endpoint: Endpoint<'_>, body: &B) -> ApiResponse<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match endpoint.url(&self.base_url) {
            Ok(url) => {
                self.executor
                    .execute_json(endpoint.method(), url, body)
                    .await
            }
            Err(err) => ApiResponse::failed(err),
        }
    }

    async fn call_without_payload(&self, endpoint: Endpoint<'_>) -> ApiResponse<()> {
        self.call::<IgnoredAny>(endpoint).await.without_payload()
    }
}
