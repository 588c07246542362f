//! Transform module
//!
//! Turns a validated CMDB payload into an ordered list of host
//! registrations plus the set of groups that must exist first.
//!
//! # Steps
//!
//! 1. Sort hosts by `primary_address` (stable)
//! 2. Sanitize and deduplicate every group name
//! 3. Build one [`RegistrationRecord`] per host

mod sanitize;
mod types;

pub use sanitize::sanitize_group_name;
pub use types::{HostVariables, RawHostRecord, RawPayload, RegistrationRecord, Transformed};

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Host attribute used as inventory hostname and sort key
pub const PRIMARY_KEY: &str = "primary_address";

/// Transform a payload into registrations
///
/// A host whose `group_list` is exactly `[null]` belongs to no explicit
/// group. A `null` anywhere else in a group list is rejected.
pub fn transform(payload: RawPayload) -> Result<Transformed> {
    let mut hosts = payload.hosts;
    hosts.sort_by(|a, b| a.primary_address.cmp(&b.primary_address));

    trace!(
        "Sorted hosts by {}: {:?}",
        PRIMARY_KEY,
        hosts
            .iter()
            .map(|h| h.primary_address.as_str())
            .collect::<Vec<_>>()
    );

    let mut groups = BTreeSet::new();
    let mut records = Vec::with_capacity(hosts.len());

    for host in hosts {
        let memberships = host_groups(&host)?;
        groups.extend(memberships.iter().cloned());

        records.push(RegistrationRecord {
            variables: HostVariables {
                ansible_host: host.primary_address.clone(),
                enabled: host.enabled,
            },
            hostname: host.primary_address,
            groups: memberships,
        });
    }

    debug!(
        "Transformed {} hosts into {} groups",
        records.len(),
        groups.len()
    );

    Ok(Transformed { groups, records })
}

/// Sanitized group memberships of one host, in first-seen order
fn host_groups(host: &RawHostRecord) -> Result<Vec<String>> {
    if host.has_no_groups_placeholder() {
        return Ok(Vec::new());
    }

    let mut memberships: Vec<String> = Vec::with_capacity(host.group_list.len());
    for entry in &host.group_list {
        let raw = entry.as_deref().ok_or_else(|| {
            Error::transform(format!(
                "host '{}' has a null entry in group_list alongside other groups",
                host.primary_address
            ))
        })?;

        let name = sanitize_group_name(raw);
        if !memberships.contains(&name) {
            memberships.push(name);
        }
    }

    Ok(memberships)
}
