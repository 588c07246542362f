//! Sink trait and registration sequence

use crate::error::Result;
use crate::transform::Transformed;
use serde_json::Value;
use tracing::debug;

/// Implicit group every host belongs to
pub const ALL_GROUP: &str = "all";

/// Implicit group for hosts with no explicit membership
pub const UNGROUPED_GROUP: &str = "ungrouped";

/// Inventory registry owned by the host runtime
pub trait InventorySink {
    /// Create a group; creating an existing group is a no-op
    fn add_group(&mut self, name: &str) -> Result<()>;

    /// Add a host, optionally into an existing group
    fn add_host(&mut self, host: &str, group: Option<&str>) -> Result<()>;

    /// Set a variable on an existing host
    fn set_variable(&mut self, host: &str, key: &str, value: Value) -> Result<()>;
}

/// Register a transform result into a sink
///
/// Groups are created first, then each host in order: added to `all`,
/// given `ansible_host`, added to each of its groups, then given `enabled`.
pub fn register(sink: &mut dyn InventorySink, transformed: &Transformed) -> Result<()> {
    for group in &transformed.groups {
        sink.add_group(group)?;
    }

    for record in &transformed.records {
        let hostname = record.hostname.as_str();

        sink.add_host(hostname, Some(ALL_GROUP))?;
        sink.set_variable(
            hostname,
            "ansible_host",
            Value::String(record.variables.ansible_host.clone()),
        )?;

        for group in &record.groups {
            sink.add_host(hostname, Some(group.as_str()))?;
        }

        sink.set_variable(hostname, "enabled", Value::Bool(record.variables.enabled))?;
    }

    debug!(
        "Registered {} hosts in {} groups",
        transformed.records.len(),
        transformed.groups.len()
    );

    Ok(())
}
