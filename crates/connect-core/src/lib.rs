//! # connect-core
//!
//! Request execution and response normalization for the Kafka Connect REST API.
//!
//! Every endpoint of the API is driven through a single [`RequestExecutor`], which
//! turns one HTTP exchange into an [`ApiResponse`]: an optional payload, an optional
//! [`StatusInfo`], and an optional [`Error`].
//!
//! ## Modules
//!
//! - [`error`] - Error types for construction, transport and decoding failures
//! - [`response`] - `StatusInfo`, `ApiResponse` and the server error record
//! - [`config`] - Worker endpoint configuration and credentials
//! - [`client`] - HTTP client settings and the request executor
//! - [`query`] - Query string assembly

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod response;

// Re-export commonly used types
pub use client::{ClientConfig, RequestExecutor};
pub use config::{ConnectClientConfig, Credentials};
pub use error::{Error, Result};
pub use query::QueryParams;
pub use response::{ApiResponse, ServerError, StatusInfo};
