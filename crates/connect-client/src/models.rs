//! Kafka Connect resource models.
//!
//! These mirror the JSON documents served by the Connect REST API. Fields the
//! client does not know about are ignored when decoding, and state strings are
//! passed through untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use connect_core::ServerError;

/// Connector or task configuration, keyed by property name.
pub type ConnectorConfig = BTreeMap<String, String>;

/// Topics used by each connector, keyed by connector name.
pub type ConnectorTopics = BTreeMap<String, TopicSet>;

/// Expanded connector listing, keyed by connector name.
pub type ConnectorExpansions = BTreeMap<String, ConnectorExpansion>;

/// Worker and cluster identification returned by `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterInfo {
    /// Connect worker version.
    pub version: String,
    /// Git commit the worker was built from.
    pub commit: String,
    /// ID of the backing Kafka cluster.
    #[serde(default)]
    pub kafka_cluster_id: String,
}

/// Connector kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    /// Reads from an external system into Kafka.
    Source,
    /// Writes from Kafka into an external system.
    Sink,
    /// Type not reported or not recognised.
    #[serde(other)]
    Unknown,
}

/// A connector definition.
///
/// Used both as the body of `POST /connectors/` and as the response of the
/// connector lookup and configuration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connector {
    /// Connector name.
    pub name: String,
    /// Connector configuration.
    #[serde(default)]
    pub config: ConnectorConfig,
    /// Tasks currently assigned to the connector.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskId>,
    /// Connector kind, when reported by the worker.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,
}

impl Connector {
    /// Create a connector definition to submit to the cluster.
    pub fn new(name: impl Into<String>, config: ConnectorConfig) -> Self {
        Self {
            name: name.into(),
            config,
            tasks: Vec::new(),
            connector_type: None,
        }
    }
}

/// Runtime state of a connector instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorState {
    /// State name (`RUNNING`, `PAUSED`, `FAILED`, ...).
    pub state: String,
    /// Worker hosting the connector.
    pub worker_id: String,
    /// Stack trace of the failure, for failed connectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Runtime state of one task inside a connector status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskState {
    /// Task number.
    pub id: u32,
    /// State name.
    pub state: String,
    /// Worker hosting the task.
    pub worker_id: String,
    /// Stack trace of the failure, for failed tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Status of a connector and its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorStatus {
    /// Connector name.
    pub name: String,
    /// Connector instance state.
    pub connector: ConnectorState,
    /// Task states.
    #[serde(default)]
    pub tasks: Vec<TaskState>,
    /// Connector kind.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,
}

impl ConnectorStatus {
    /// Tasks reported in the `FAILED` state.
    pub fn failed_tasks(&self) -> impl Iterator<Item = &TaskState> {
        self.tasks.iter().filter(|task| task.state == "FAILED")
    }
}

/// Identifies a task within its connector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId {
    /// Owning connector.
    pub connector: String,
    /// Task number.
    pub task: u32,
}

/// A task and its configuration, as listed by `GET /connectors/{name}/tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskInfo {
    /// Task identity.
    pub id: TaskId,
    /// Task configuration.
    #[serde(default)]
    pub config: ConnectorConfig,
}

/// Status of a single task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    /// Task number.
    pub id: u32,
    /// State name.
    pub state: String,
    /// Worker hosting the task.
    pub worker_id: String,
    /// Stack trace of the failure, for failed tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Connector listing entry produced by `GET /connectors?expand=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorExpansion {
    /// Connector definition, when `info` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Connector>,
    /// Connector status, when `status` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectorStatus>,
}

/// Topics a connector has used since it was created or last reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicSet {
    /// Topic names.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// A connector plugin installed on the worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorPlugin {
    /// Fully qualified class name.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Plugin kind.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub plugin_type: Option<ConnectorType>,
    /// Plugin version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Result of validating a connector configuration against a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigValidation {
    /// Plugin class name.
    pub name: String,
    /// Number of properties with errors.
    pub error_count: u32,
    /// Configuration groups defined by the plugin.
    #[serde(default)]
    pub groups: Vec<String>,
    /// Per-property definitions and validation results.
    #[serde(default)]
    pub configs: Vec<ConfigInfo>,
}

impl ConfigValidation {
    /// True when no property failed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }

    /// Property names paired with their error messages, skipping valid properties.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.configs
            .iter()
            .filter(|info| !info.value.errors.is_empty())
            .map(|info| (info.value.name.as_str(), info.value.errors.as_slice()))
    }
}

/// Definition and validated value of one configuration property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigInfo {
    /// Property definition.
    pub definition: ConfigKeyInfo,
    /// Validated value.
    pub value: ConfigValueInfo,
}

/// Definition of a configuration property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigKeyInfo {
    /// Property name.
    pub name: String,
    /// Property type (`STRING`, `INT`, ...).
    #[serde(rename = "type")]
    pub config_type: String,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Importance (`HIGH`, `MEDIUM`, `LOW`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<String>,
    /// Documentation string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Group the property belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Validated value of a configuration property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigValueInfo {
    /// Property name.
    pub name: String,
    /// Value as submitted or defaulted.
    #[serde(default)]
    pub value: Option<String>,
    /// Values the plugin recommends.
    #[serde(default)]
    pub recommended_values: Vec<String>,
    /// Validation errors.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Whether the property applies given the rest of the configuration.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

const fn default_visible() -> bool {
    true
}
