//! Kafka Connect REST client.
//!
//! This crate exposes typed models and an asynchronous client for managing
//! connectors and tasks through the Kafka Connect REST API. Every operation
//! returns a [`connect_core::ApiResponse`] carrying the decoded payload, the HTTP
//! status and any error, so callers see worker-side failures (unknown
//! connector, rebalance in progress) as data rather than as errors.
//!
//! ```no_run
//! use connect_client::ConnectClient;
//!
//! # async fn example() -> connect_client::Result<()> {
//! let client = ConnectClient::with_credentials("http://connect:8083", "admin", "secret")?;
//!
//! let response = client.connector_status("local-file-source").await;
//! if let Some(error) = response.error {
//!     eprintln!("request failed: {error}");
//! } else if let Some(status) = response.payload {
//!     println!("{} is {}", status.name, status.connector.state);
//! } else if let Some(status) = response.status {
//!     println!("worker answered {status}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod endpoint;
pub mod models;

pub use client::{ConnectClient, ConnectClientBuilder};
pub use connect_core::{ApiResponse, ConnectClientConfig, Error, StatusInfo};
pub use endpoint::Endpoint;
pub use models::{
    ClusterInfo, ConfigValidation, Connector, ConnectorConfig, ConnectorExpansion, ConnectorPlugin,
    ConnectorState, ConnectorStatus, ConnectorTopics, ConnectorType, ServerError, TaskId, TaskInfo,
    TaskState, TaskStatus, TopicSet,
};

/// Convenient result alias matching the shared Connect error type.
pub type Result<T> = connect_core::Result<T>;
