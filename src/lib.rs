//! # Inventory Vault
//!
//! Binary serialization and `SQLite` persistence for slotted item inventories.
//!
//! An inventory is a fixed-size ordered sequence of slots, each empty or
//! holding an item, plus an optional holder. This crate encodes one inventory
//! into a compact, versionless blob and stores it under a random 128-bit
//! identifier.
//!
//! ## Layers
//!
//! - [`models`]: the identifier type and the reference inventory types
//! - [`host`]: collaborator traits the embedding runtime implements
//! - [`serializer`]: the blob format
//! - [`storage`]: the `SQLite`-backed [`InventoryStore`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use inventory_vault::host::{Container, StandardHost};
//! use inventory_vault::models::{Inventory, ItemStack};
//! use inventory_vault::InventoryStore;
//!
//! let mut store = InventoryStore::open("inventories.sqlite3", StandardHost::new())?;
//!
//! let mut inventory = Inventory::custom(None, 36, "Super inventory");
//! inventory.set_item(3, Some(ItemStack::new("PUMPKIN", 48)));
//!
//! let id = store.create(&inventory, "Super inventory")?;
//! let restored = store.read(id)?;
//! assert_eq!(restored.as_ref().map(Inventory::contents), Some(inventory.contents()));
//!
//! store.close()?;
//! # Ok::<(), inventory_vault::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod host;
pub mod models;
pub mod observability;
pub mod serializer;
pub mod storage;

pub use config::StoreConfig;
pub use models::InventoryId;
pub use storage::{InventoryDbStats, InventoryStore};

/// Error type for inventory-vault operations.
///
/// A missing record is not an error: [`InventoryStore::read`] returns
/// `Ok(None)` and [`InventoryStore::update`]/[`InventoryStore::delete`] return
/// `Ok(false)`.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `MalformedIdentifier` | Identifier bytes are not exactly 16 long |
/// | `Encoding` | Title over 255 bytes, holder without stable identity, item codec failure |
/// | `Decoding` | Truncated or corrupt blob, item codec failure |
/// | `StorageFailed` | `SQLite` open, statement or close failures |
/// | `StoreClosed` | Any store call after [`InventoryStore::close`] |
/// | `InvalidInput` | Unparsable identifier text |
/// | `InvalidConfig` | Unreadable or unparsable configuration |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Identifier bytes had the wrong length.
    #[error("malformed identifier: expected 16 bytes, got {len}")]
    MalformedIdentifier {
        /// The length that was supplied.
        len: usize,
    },

    /// A container could not be encoded. No write was attempted.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// A stored blob could not be decoded.
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// The backing database reported an error.
    ///
    /// Raised when:
    /// - the database file cannot be opened or the schema cannot be created
    /// - a statement cannot be prepared or executed (including primary key
    ///   collisions on insert)
    /// - closing the connection fails
    #[error("storage operation '{operation}' failed: {cause}")]
    StorageFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The store has been closed.
    #[error("store is closed")]
    StoreClosed,

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns the message without the variant prefix, for re-wrapping.
    pub(crate) fn detail(&self) -> String {
        match self {
            Self::Encoding(msg) | Self::Decoding(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for inventory-vault operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedIdentifier { len: 15 };
        assert_eq!(
            err.to_string(),
            "malformed identifier: expected 16 bytes, got 15"
        );

        let err = Error::StorageFailed {
            operation: "insert_inventory".to_string(),
            cause: "UNIQUE constraint failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "storage operation 'insert_inventory' failed: UNIQUE constraint failed"
        );

        assert_eq!(Error::StoreClosed.to_string(), "store is closed");
    }

    #[test]
    fn test_detail_strips_prefix() {
        assert_eq!(Error::Encoding("bad".to_string()).detail(), "bad");
        assert_eq!(Error::Decoding("worse".to_string()).detail(), "worse");
        assert_eq!(Error::StoreClosed.detail(), "store is closed");
    }
}
