//! Payload and registration types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

// ============================================================================
// Raw Payload
// ============================================================================

/// Top-level CMDB response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPayload {
    /// Host records in API order
    pub hosts: Vec<RawHostRecord>,
}

impl RawPayload {
    /// Convert a schema-validated JSON document into typed records
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::validation(e.to_string()))
    }
}

/// One host as returned by the CMDB
///
/// Fields beyond these three are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHostRecord {
    /// Unique address, used as inventory hostname
    pub primary_address: String,

    /// Group memberships; `[null]` means "no groups"
    pub group_list: Vec<Option<String>>,

    /// Passed through as a host variable
    pub enabled: bool,
}

impl RawHostRecord {
    /// True when `group_list` is exactly the single-`null` placeholder
    pub fn has_no_groups_placeholder(&self) -> bool {
        matches!(self.group_list.as_slice(), [None])
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Fixed per-host variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVariables {
    /// Address the runtime connects to
    pub ansible_host: String,
    /// Whether the CMDB marks the host as enabled
    pub enabled: bool,
}

/// Everything needed to register one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Inventory hostname
    pub hostname: String,
    /// Sanitized group memberships, excluding `all`
    pub groups: Vec<String>,
    /// Host variables
    pub variables: HostVariables,
}

/// Output of a transform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    /// Deduplicated sanitized groups to create before any host
    pub groups: BTreeSet<String>,
    /// Registrations sorted by hostname
    pub records: Vec<RegistrationRecord>,
}
