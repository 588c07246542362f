//! In-memory inventory

use super::sink::{InventorySink, ALL_GROUP, UNGROUPED_GROUP};
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::warn;

/// Group names the host runtime accepts without warning
static VALID_GROUP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, Default)]
struct Group {
    hosts: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct Host {
    groups: Vec<String>,
    vars: Map<String, Value>,
}

/// In-memory inventory with implicit `all` and `ungrouped` groups
#[derive(Debug, Clone)]
pub struct Inventory {
    groups: BTreeMap<String, Group>,
    hosts: BTreeMap<String, Host>,
    host_order: Vec<String>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    /// Create an inventory holding only the implicit groups
    pub fn new() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(ALL_GROUP.to_string(), Group::default());
        groups.insert(UNGROUPED_GROUP.to_string(), Group::default());
        Self {
            groups,
            hosts: BTreeMap::new(),
            host_order: Vec::new(),
        }
    }

    /// Group names, sorted
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Host names in registration order
    pub fn host_names(&self) -> Vec<&str> {
        self.host_order.iter().map(String::as_str).collect()
    }

    /// Check if a group exists
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Check if a host exists
    pub fn has_host(&self, name: &str) -> bool {
        self.hosts.contains_key(name)
    }

    /// Direct members of a group, in registration order
    ///
    /// `ungrouped` holds hosts whose only membership is `all`, plus hosts
    /// added to it explicitly.
    pub fn group_hosts(&self, name: &str) -> Option<Vec<&str>> {
        if name == UNGROUPED_GROUP {
            return Some(
                self.host_order
                    .iter()
                    .filter(|h| {
                        self.hosts.get(*h).is_some_and(|host| {
                            host.groups.is_empty()
                                || host.groups.iter().any(|g| g == UNGROUPED_GROUP)
                        })
                    })
                    .map(String::as_str)
                    .collect(),
            );
        }

        if name == ALL_GROUP {
            return Some(self.host_names());
        }

        self.groups
            .get(name)
            .map(|g| g.hosts.iter().map(String::as_str).collect())
    }

    /// Explicit groups a host belongs to, excluding `all`
    pub fn host_groups(&self, host: &str) -> Option<&[String]> {
        self.hosts.get(host).map(|h| h.groups.as_slice())
    }

    /// Variables of a host
    pub fn host_vars(&self, host: &str) -> Option<&Map<String, Value>> {
        self.hosts.get(host).map(|h| &h.vars)
    }

    /// Render the `--host` output for one host
    ///
    /// Unknown hosts render as an empty object.
    pub fn host_vars_json(&self, host: &str) -> Value {
        self.host_vars(host)
            .map_or_else(|| json!({}), |vars| Value::Object(vars.clone()))
    }

    /// Render the `--list` output
    pub fn to_list_json(&self) -> Value {
        let mut out = Map::new();

        let hostvars: Map<String, Value> = self
            .host_order
            .iter()
            .filter_map(|name| {
                self.hosts
                    .get(name)
                    .map(|h| (name.clone(), Value::Object(h.vars.clone())))
            })
            .collect();
        out.insert("_meta".to_string(), json!({ "hostvars": hostvars }));

        let children: Vec<&str> = self
            .groups
            .keys()
            .filter(|name| name.as_str() != ALL_GROUP)
            .map(String::as_str)
            .collect();
        out.insert(ALL_GROUP.to_string(), json!({ "children": children }));

        for name in self.groups.keys().filter(|n| n.as_str() != ALL_GROUP) {
            let members = self.group_hosts(name).unwrap_or_default();
            let entry = if members.is_empty() {
                json!({})
            } else {
                json!({ "hosts": members })
            };
            out.insert(name.clone(), entry);
        }

        Value::Object(out)
    }
}

impl InventorySink for Inventory {
    fn add_group(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::inventory("Invalid empty group name provided"));
        }

        if !VALID_GROUP_NAME.is_match(name) {
            warn!("Invalid characters were found in group name: {}", name);
        }

        self.groups.entry(name.to_string()).or_default();
        Ok(())
    }

    fn add_host(&mut self, host: &str, group: Option<&str>) -> Result<()> {
        if host.is_empty() {
            return Err(Error::inventory("Invalid empty host name provided"));
        }

        let group = group.unwrap_or(ALL_GROUP);
        if !self.groups.contains_key(group) {
            return Err(Error::inventory(format!(
                "Could not find group {group} in inventory"
            )));
        }

        if !self.hosts.contains_key(host) {
            self.hosts.insert(host.to_string(), Host::default());
            self.host_order.push(host.to_string());
        }

        if group != ALL_GROUP {
            if let Some(entry) = self.hosts.get_mut(host) {
                if !entry.groups.iter().any(|g| g == group) {
                    entry.groups.push(group.to_string());
                }
            }
            if let Some(members) = self.groups.get_mut(group) {
                if !members.hosts.iter().any(|h| h == host) {
                    members.hosts.push(host.to_string());
                }
            }
        }

        Ok(())
    }

    fn set_variable(&mut self, host: &str, key: &str, value: Value) -> Result<()> {
        let entry = self
            .hosts
            .get_mut(host)
            .ok_or_else(|| Error::inventory(format!("Could not identify host {host}")))?;
        entry.vars.insert(key.to_string(), value);
        Ok(())
    }
}
