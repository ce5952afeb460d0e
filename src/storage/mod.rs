//! Storage layer.
//!
//! [`InventoryStore`] maps generated [`InventoryId`](crate::InventoryId)s to
//! encoded inventories in a `SQLite` database.

// Allow significant_drop_tightening - cached statements are returned to the
// cache at the end of each call.
#![allow(clippy::significant_drop_tightening)]

mod inventory;
pub mod sqlite;

pub use inventory::{InventoryDbStats, InventoryStore};
