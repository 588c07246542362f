//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: plugin config → CMDB request → validated
//! payload → registered inventory → `--list` / `--host` JSON.

use clap::Parser;
use cmdb_inventory::cli::{Cli, Runner};
use cmdb_inventory::config::{PluginConfigFile, PluginOptions};
use cmdb_inventory::{ErrorKind, Inventory, InventoryPlugin};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456abcdefgH";

fn scenario_payload() -> Value {
    json!({
        "hosts": [
            {"primary_address": "node-02", "group_list": ["Compute!"], "enabled": true},
            {"primary_address": "node-01", "group_list": [null], "enabled": false}
        ]
    })
}

async fn mount_hosts(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path("/route/"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn write_config(server: &MockServer) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cluster.portal.yml");
    let yaml = format!(
        "plugin: uofuchpc.cmdb.portal\ncmdb_api_bearer_token: \"{TOKEN}\"\ncmdb_api_url: \"{}/route/\"\n",
        server.uri()
    );
    std::fs::write(&path, yaml).unwrap();
    (dir, path)
}

// ============================================================================
// Plugin Integration Tests
// ============================================================================

#[tokio::test]
async fn test_parse_from_config_file() {
    let server = MockServer::start().await;
    mount_hosts(&server, 200, scenario_payload()).await;
    let (_dir, config_path) = write_config(&server);

    let plugin = InventoryPlugin::new().unwrap();
    assert!(plugin.verify_file(&config_path));

    let mut inventory = Inventory::new();
    plugin.parse(&mut inventory, &config_path).await.unwrap();

    assert_eq!(inventory.host_names(), vec!["node-01", "node-02"]);
    assert_eq!(inventory.group_names(), vec!["all", "compute_", "ungrouped"]);
    assert_eq!(inventory.group_hosts("compute_").unwrap(), vec!["node-02"]);
    assert_eq!(inventory.group_hosts("ungrouped").unwrap(), vec!["node-01"]);
    assert_eq!(
        inventory.host_vars_json("node-01"),
        json!({"ansible_host": "node-01", "enabled": false})
    );
}

#[tokio::test]
async fn test_non_200_is_fetch_error_without_mutation() {
    let server = MockServer::start().await;
    mount_hosts(&server, 401, json!({"detail": "invalid token"})).await;
    let (_dir, config_path) = write_config(&server);

    let plugin = InventoryPlugin::new().unwrap();
    let mut inventory = Inventory::new();
    let err = plugin.parse(&mut inventory, &config_path).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Fetch);
    assert!(err.to_string().contains(&format!("{}/route/", server.uri())));
    assert!(inventory.host_names().is_empty());
}

#[tokio::test]
async fn test_missing_primary_address_is_validation_error() {
    let server = MockServer::start().await;
    mount_hosts(
        &server,
        200,
        json!({
            "hosts": [
                {"primary_address": "node-01", "group_list": ["a"], "enabled": true},
                {"group_list": ["b"], "enabled": true}
            ]
        }),
    )
    .await;
    let (_dir, config_path) = write_config(&server);

    let plugin = InventoryPlugin::new().unwrap();
    let mut inventory = Inventory::new();
    let err = plugin.parse(&mut inventory, &config_path).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err
        .to_string()
        .contains("'primary_address' is a required property at hosts[1]"));
    assert!(inventory.host_names().is_empty());
    assert!(!inventory.has_group("a"));
}

#[tokio::test]
async fn test_wrong_plugin_name_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portal.yml");
    std::fs::write(&path, "plugin: constructed\n").unwrap();

    let plugin = InventoryPlugin::new().unwrap();
    let mut inventory = Inventory::new();
    let err = plugin.parse(&mut inventory, &path).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
}

// ============================================================================
// CLI Integration Tests
// ============================================================================

#[tokio::test]
async fn test_cli_list_output() {
    let server = MockServer::start().await;
    mount_hosts(&server, 200, scenario_payload()).await;
    let (_dir, config_path) = write_config(&server);

    let cli = Cli::try_parse_from([
        "cmdb-inventory",
        "--list",
        "-i",
        config_path.to_str().unwrap(),
    ])
    .unwrap();
    let runner = Runner::new(cli);
    let options = runner.load_options().unwrap();
    let output = runner.render(&options).await.unwrap();

    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed,
        json!({
            "_meta": {
                "hostvars": {
                    "node-01": {"ansible_host": "node-01", "enabled": false},
                    "node-02": {"ansible_host": "node-02", "enabled": true}
                }
            },
            "all": {"children": ["compute_", "ungrouped"]},
            "compute_": {"hosts": ["node-02"]},
            "ungrouped": {"hosts": ["node-01"]}
        })
    );
}

#[tokio::test]
async fn test_cli_host_output() {
    let server = MockServer::start().await;
    mount_hosts(&server, 200, scenario_payload()).await;

    let file = PluginConfigFile {
        plugin: "portal".to_string(),
        cmdb_api_bearer_token: Some(TOKEN.to_string()),
        cmdb_api_url: Some(format!("{}/route/", server.uri())),
    };
    let options = PluginOptions::resolve(Some(&file), |_| None, None).unwrap();

    let cli = Cli::try_parse_from(["cmdb-inventory", "--host", "node-02", "--pretty"]).unwrap();
    let output = Runner::new(cli).render(&options).await.unwrap();

    assert!(output.contains('\n'));
    let parsed: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, json!({"ansible_host": "node-02", "enabled": true}));
}

#[test]
fn test_cli_rejects_non_plugin_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.yml");
    std::fs::write(&path, "plugin: portal\n").unwrap();

    let cli = Cli::try_parse_from(["cmdb-inventory", "-i", path.to_str().unwrap()]).unwrap();
    let err = Runner::new(cli).load_options().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains("is not a portal inventory file"));
}
