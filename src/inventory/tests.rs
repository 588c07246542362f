//! Inventory tests

use super::*;
use crate::error::{Error, Result};
use crate::transform::{transform, RawPayload};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Records every call so the registration order can be checked
#[derive(Debug, Default)]
struct RecordingSink {
    calls: Vec<String>,
}

impl InventorySink for RecordingSink {
    fn add_group(&mut self, name: &str) -> Result<()> {
        self.calls.push(format!("add_group {name}"));
        Ok(())
    }

    fn add_host(&mut self, host: &str, group: Option<&str>) -> Result<()> {
        self.calls
            .push(format!("add_host {host} {}", group.unwrap_or("-")));
        Ok(())
    }

    fn set_variable(&mut self, host: &str, key: &str, value: Value) -> Result<()> {
        self.calls.push(format!("set_variable {host} {key}={value}"));
        Ok(())
    }
}

fn scenario() -> crate::transform::Transformed {
    let payload = RawPayload::from_value(json!({
        "hosts": [
            {"primary_address": "node-02", "group_list": ["Compute!"], "enabled": true},
            {"primary_address": "node-01", "group_list": [null], "enabled": false}
        ]
    }))
    .unwrap();
    transform(payload).unwrap()
}

#[test]
fn test_register_call_sequence() {
    let mut sink = RecordingSink::default();
    register(&mut sink, &scenario()).unwrap();

    assert_eq!(
        sink.calls,
        vec![
            "add_group compute_",
            "add_host node-01 all",
            "set_variable node-01 ansible_host=\"node-01\"",
            "set_variable node-01 enabled=false",
            "add_host node-02 all",
            "set_variable node-02 ansible_host=\"node-02\"",
            "add_host node-02 compute_",
            "set_variable node-02 enabled=true",
        ]
    );
}

#[test]
fn test_register_into_inventory() {
    let mut inventory = Inventory::new();
    register(&mut inventory, &scenario()).unwrap();

    assert_eq!(inventory.host_names(), vec!["node-01", "node-02"]);
    assert_eq!(inventory.group_names(), vec!["all", "compute_", "ungrouped"]);

    assert_eq!(inventory.host_groups("node-01").unwrap(), &[] as &[String]);
    assert_eq!(
        inventory.host_groups("node-02").unwrap(),
        &["compute_".to_string()]
    );

    assert_eq!(inventory.group_hosts("compute_").unwrap(), vec!["node-02"]);
    assert_eq!(inventory.group_hosts("ungrouped").unwrap(), vec!["node-01"]);
    assert_eq!(
        inventory.group_hosts("all").unwrap(),
        vec!["node-01", "node-02"]
    );

    assert_eq!(inventory.host_vars_json("node-01"), json!({"ansible_host": "node-01", "enabled": false}));
    assert_eq!(inventory.host_vars_json("node-02"), json!({"ansible_host": "node-02", "enabled": true}));
}

#[test]
fn test_list_json() {
    let mut inventory = Inventory::new();
    register(&mut inventory, &scenario()).unwrap();

    assert_eq!(
        inventory.to_list_json(),
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

#[test]
fn test_empty_inventory_list_json() {
    let inventory = Inventory::new();
    assert_eq!(
        inventory.to_list_json(),
        json!({
            "_meta": {"hostvars": {}},
            "all": {"children": ["ungrouped"]},
            "ungrouped": {}
        })
    );
}

#[test]
fn test_unknown_host_vars_is_empty_object() {
    let inventory = Inventory::new();
    assert_eq!(inventory.host_vars_json("ghost"), json!({}));
    assert!(inventory.host_vars("ghost").is_none());
}

#[test]
fn test_add_group_is_idempotent() {
    let mut inventory = Inventory::new();
    inventory.add_group("ops").unwrap();
    inventory.add_host("h1", Some("all")).unwrap();
    inventory.add_host("h1", Some("ops")).unwrap();
    inventory.add_group("ops").unwrap();
    inventory.add_host("h1", Some("ops")).unwrap();

    assert_eq!(inventory.group_hosts("ops").unwrap(), vec!["h1"]);
    assert_eq!(inventory.host_groups("h1").unwrap(), &["ops".to_string()]);
}

#[test]
fn test_add_host_without_group_lands_in_all() {
    let mut inventory = Inventory::new();
    inventory.add_host("h1", None).unwrap();

    assert!(inventory.has_host("h1"));
    assert_eq!(inventory.group_hosts("ungrouped").unwrap(), vec!["h1"]);
}

#[test]
fn test_add_host_to_missing_group_fails() {
    let mut inventory = Inventory::new();
    let err = inventory.add_host("h1", Some("nope")).unwrap_err();
    assert!(matches!(err, Error::Inventory { .. }));
    assert!(err.to_string().contains("Could not find group nope"));
}

#[test]
fn test_add_host_to_ungrouped_explicitly() {
    let mut inventory = Inventory::new();
    inventory.add_host("h1", Some("all")).unwrap();
    inventory.add_host("h1", Some("ungrouped")).unwrap();

    assert_eq!(inventory.host_groups("h1").unwrap(), &["ungrouped".to_string()]);
    assert_eq!(inventory.group_hosts("ungrouped").unwrap(), vec!["h1"]);
}

#[test]
fn test_register_cmdb_ungrouped_group() {
    let payload = RawPayload::from_value(json!({
        "hosts": [
            {"primary_address": "a", "group_list": ["Compute"], "enabled": true},
            {"primary_address": "b", "group_list": ["Ungrouped"], "enabled": true}
        ]
    }))
    .unwrap();
    let transformed = transform(payload).unwrap();

    let mut inventory = Inventory::new();
    register(&mut inventory, &transformed).unwrap();

    assert_eq!(inventory.group_names(), vec!["all", "compute", "ungrouped"]);
    assert_eq!(inventory.group_hosts("compute").unwrap(), vec!["a"]);
    assert_eq!(inventory.group_hosts("ungrouped").unwrap(), vec!["b"]);
    assert_eq!(
        inventory.to_list_json()["ungrouped"],
        json!({"hosts": ["b"]})
    );
}

#[test]
fn test_empty_names_rejected() {
    let mut inventory = Inventory::new();
    assert!(inventory.add_group("").is_err());
    assert!(inventory.add_host("", None).is_err());
}

#[test]
fn test_set_variable_on_unknown_host_fails() {
    let mut inventory = Inventory::new();
    let err = inventory
        .set_variable("ghost", "enabled", Value::Bool(true))
        .unwrap_err();
    assert!(err.to_string().contains("Could not identify host ghost"));
}

#[test]
fn test_group_name_starting_with_digit_is_accepted() {
    let mut inventory = Inventory::new();
    inventory.add_group("42_racks").unwrap();
    assert!(inventory.has_group("42_racks"));
}
