//! # CMDB Inventory
//!
//! Dynamic inventory for configuration-management runs, sourced from the
//! CHPC portal CMDB.
//!
//! One inventory load is a single pass:
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌──────────┐   ┌───────────┐   ┌──────────────┐
//! │  config  │ → │  fetch  │ → │ validate │ → │ transform │ → │ InventorySink│
//! │ file/env │   │GET+token│   │  schema  │   │ sort/group│   │  (registry)  │
//! └──────────┘   └─────────┘   └──────────┘   └───────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cmdb_inventory::{Inventory, InventoryPlugin, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let plugin = InventoryPlugin::new()?;
//!
//!     let mut inventory = Inventory::new();
//!     plugin.parse(&mut inventory, "inventory/cluster.portal.yml").await?;
//!
//!     println!("{}", inventory.to_list_json());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Plugin configuration file and options
pub mod config;

/// HTTP client for the CMDB API
pub mod http;

/// Bundled schema and payload validation
pub mod schema;

/// Payload to registration transform
pub mod transform;

/// Inventory sink trait and in-memory inventory
pub mod inventory;

/// Plugin entry point
pub mod plugin;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use inventory::{Inventory, InventorySink};
pub use plugin::{InventoryPlugin, PayloadSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
