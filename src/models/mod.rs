//! Data models.
//!
//! The identifier type used as the storage key, plus the reference host's
//! container, item and holder types.

mod holder;
mod id;
mod inventory;
mod item;

pub use holder::{InventoryHolder, Player};
pub use id::{ID_LEN, InventoryId};
pub use inventory::{Inventory, InventoryKind};
pub use item::{ItemStack, RESERVED_ATTRIBUTES};
