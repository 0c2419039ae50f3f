//! Resource table of the Connect REST API.
//!
//! Each [`Endpoint`] knows its HTTP method, its path below the worker base URL,
//! and its query string. Names are inserted as single, percent-encoded path
//! segments.

use connect_core::{Error, QueryParams, Result};
use reqwest::Method;
use url::Url;

/// One operation of the Connect REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /`
    Cluster,
    /// `GET /connectors`
    Connectors,
    /// `GET /connectors?expand=status&expand=info`
    ConnectorsExpanded {
        /// Include connector status.
        status: bool,
        /// Include connector definition.
        info: bool,
    },
    /// `POST /connectors/`
    CreateConnector,
    /// `GET /connectors/{name}`
    Connector(&'a str),
    /// `DELETE /connectors/{name}`
    DeleteConnector(&'a str),
    /// `GET /connectors/{name}/config`
    ConnectorConfig(&'a str),
    /// `PUT /connectors/{name}/config`
    UpdateConnectorConfig(&'a str),
    /// `GET /connectors/{name}/status`
    ConnectorStatus(&'a str),
    /// `PUT /connectors/{name}/pause`
    PauseConnector(&'a str),
    /// `PUT /connectors/{name}/resume`
    ResumeConnector(&'a str),
    /// `POST /connectors/{name}/restart?includeTasks={bool}&onlyFailed={bool}`
    RestartConnector {
        /// Connector name.
        name: &'a str,
        /// Restart the tasks as well as the connector.
        include_tasks: bool,
        /// Only restart instances in the `FAILED` state.
        only_failed: bool,
    },
    /// `GET /connectors/{name}/tasks`
    Tasks(&'a str),
    /// `GET /connectors/{name}/tasks/{task}/status`
    TaskStatus {
        /// Connector name.
        name: &'a str,
        /// Task number.
        task: u32,
    },
    /// `POST /connectors/{name}/tasks/{task}/restart`
    RestartTask {
        /// Connector name.
        name: &'a str,
        /// Task number.
        task: u32,
    },
    /// `GET /connectors/{name}/topics`
    ConnectorTopics(&'a str),
    /// `PUT /connectors/{name}/topics/reset`
    ResetConnectorTopics(&'a str),
    /// `GET /connector-plugins`
    ConnectorPlugins,
    /// `PUT /connector-plugins/{class}/config/validate`
    ValidateConfig(&'a str),
}

impl Endpoint<'_> {
    /// HTTP method of the operation.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Cluster
            | Self::Connectors
            | Self::ConnectorsExpanded { .. }
            | Self::Connector(_)
            | Self::ConnectorConfig(_)
            | Self::ConnectorStatus(_)
            | Self::Tasks(_)
            | Self::TaskStatus { .. }
            | Self::ConnectorTopics(_)
            | Self::ConnectorPlugins => Method::GET,
            Self::CreateConnector | Self::RestartConnector { .. } | Self::RestartTask { .. } => {
                Method::POST
            }
            Self::UpdateConnectorConfig(_)
            | Self::PauseConnector(_)
            | Self::ResumeConnector(_)
            | Self::ResetConnectorTopics(_)
            | Self::ValidateConfig(_) => Method::PUT,
            Self::DeleteConnector(_) => Method::DELETE,
        }
    }

    /// Path segments below the base URL.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        let connector = |name: &str, rest: &[&str]| {
            let mut segments = vec!["connectors".to_string(), name.to_string()];
            segments.extend(rest.iter().map(|segment| (*segment).to_string()));
            segments
        };

        match *self {
            Self::Cluster => Vec::new(),
            Self::Connectors | Self::ConnectorsExpanded { .. } => vec!["connectors".to_string()],
            // The trailing empty segment keeps the `/connectors/` form.
            Self::CreateConnector => vec!["connectors".to_string(), String::new()],
            Self::Connector(name) | Self::DeleteConnector(name) => connector(name, &[]),
            Self::ConnectorConfig(name) | Self::UpdateConnectorConfig(name) => {
                connector(name, &["config"])
            }
            Self::ConnectorStatus(name) => connector(name, &["status"]),
            Self::PauseConnector(name) => connector(name, &["pause"]),
            Self::ResumeConnector(name) => connector(name, &["resume"]),
            Self::RestartConnector { name, .. } => connector(name, &["restart"]),
            Self::Tasks(name) => connector(name, &["tasks"]),
            Self::TaskStatus { name, task } => {
                connector(name, &["tasks", task.to_string().as_str(), "status"])
            }
            Self::RestartTask { name, task } => {
                connector(name, &["tasks", task.to_string().as_str(), "restart"])
            }
            Self::ConnectorTopics(name) => connector(name, &["topics"]),
            Self::ResetConnectorTopics(name) => connector(name, &["topics", "reset"]),
            Self::ConnectorPlugins => vec!["connector-plugins".to_string()],
            Self::ValidateConfig(class) => vec![
                "connector-plugins".to_string(),
                class.to_string(),
                "config".to_string(),
                "validate".to_string(),
            ],
        }
    }

    /// Query string of the operation.
    #[must_use]
    pub fn query(&self) -> QueryParams {
        match *self {
            Self::RestartConnector {
                include_tasks,
                only_failed,
                ..
            } => QueryParams::new()
                .with("includeTasks", include_tasks)
                .with("onlyFailed", only_failed),
            Self::ConnectorsExpanded { status, info } => {
                let mut params = QueryParams::new();
                if status {
                    params = params.with("expand", "status");
                }
                if info {
                    params = params.with("expand", "info");
                }
                params
            }
            _ => QueryParams::new(),
        }
    }

    /// Absolute URL of the operation below `base`.
    ///
    /// A path prefix on `base` (e.g. `http://proxy/connect/`) is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if `base` cannot carry a path, or if
    /// a connector or plugin name is `.` or `..`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let segments = self.segments();
        // Dot segments are normalized away by the URL parser and would address
        // another resource.
        if let Some(segment) = segments
            .iter()
            .find(|segment| matches!(segment.as_str(), "." | ".."))
        {
            return Err(Error::InvalidEndpoint(format!("`{segment}` is not a valid resource name")));
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(format!("Connect URL `{base}` cannot be a base")))?
            .pop_if_empty()
            .extend(segments);

        self.query().apply(&mut url);
        Ok(url)
    }
}
