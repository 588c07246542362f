//! Inventory module
//!
//! The sink side of an inventory load.
//!
//! [`InventorySink`] is the callback surface the host runtime exposes
//! (`add_group`, `add_host`, `set_variable`). [`register`] drives a sink from
//! a transform result, and [`Inventory`] is the in-memory sink used by the
//! executable inventory to render `--list` / `--host` output.

mod model;
mod sink;

pub use model::Inventory;
pub use sink::{register, InventorySink, ALL_GROUP, UNGROUPED_GROUP};

#[cfg(test)]
mod tests;
