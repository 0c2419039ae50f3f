//! Integration tests for parsing Kafka Connect data.
//!
//! These tests validate that the connect-client models can correctly deserialize
//! response documents captured from Connect workers.

use connect_client::models::{
    ClusterInfo, Connector, ConnectorPlugin, ConnectorStatus, ConnectorType, TaskInfo,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load and decode a fixture from disk.
fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let fixture_path = fixtures_dir().join(name);
    let json_data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });

    serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!("Failed to deserialize {}: {}\nJSON: {}", name, e, json_data)
    })
}

#[test]
fn test_deserialize_cluster_info() {
    let cluster: ClusterInfo = load_fixture("cluster.json");

    assert_eq!(cluster.version, "3.7.0");
    assert_eq!(cluster.commit, "2ae524ed625438c5");
    assert_eq!(cluster.kafka_cluster_id, "J8fDfZtFT7WI3DO8E6Rtbw");
}

#[test]
fn test_deserialize_connector() {
    let connector: Connector = load_fixture("connector.json");

    assert_eq!(connector.name, "orders-jdbc-sink");
    assert_eq!(connector.connector_type, Some(ConnectorType::Sink));
    assert_eq!(
        connector.config.get("tasks.max").map(String::as_str),
        Some("3")
    );
    assert_eq!(connector.tasks.len(), 3, "Expected 3 tasks in test data");
    assert!(connector
        .tasks
        .iter()
        .all(|task| task.connector == "orders-jdbc-sink"));
}

#[test]
fn test_connector_config_round_trip() {
    let connector: Connector = load_fixture("connector.json");

    let encoded = serde_json::to_string(&connector.config).unwrap();
    let decoded: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, connector.config);
}

#[test]
fn test_deserialize_connector_status() {
    let status: ConnectorStatus = load_fixture("connector_status.json");

    assert_eq!(status.name, "orders-jdbc-sink");
    assert_eq!(status.connector.state, "RUNNING");
    assert_eq!(status.connector.worker_id, "10.20.1.14:8083");
    assert!(status.connector.trace.is_none());
    assert_eq!(status.tasks.len(), 3);

    let failed: Vec<_> = status.failed_tasks().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].id, 1);
    let trace = failed[0].trace.as_deref().unwrap_or_default();
    assert!(trace.starts_with("org.apache.kafka.connect.errors.ConnectException"));
}

#[test]
fn test_deserialize_tasks() {
    let tasks: Vec<TaskInfo> = load_fixture("connector_tasks.json");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].id.task, 1);
    assert_eq!(
        tasks[0].config.get("insert.mode").map(String::as_str),
        Some("upsert")
    );
}

#[test]
fn test_deserialize_plugins() {
    let plugins: Vec<ConnectorPlugin> = load_fixture("connector_plugins.json");

    assert_eq!(plugins.len(), 3);
    let sources = plugins
        .iter()
        .filter(|plugin| plugin.plugin_type == Some(ConnectorType::Source))
        .count();
    assert_eq!(sources, 2);
    assert_eq!(plugins[0].version.as_deref(), Some("10.7.4"));
}
