//! Inventory holders.

use crate::host::Holder;
use uuid::Uuid;

/// A player known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable player identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl Player {
    /// Creates a player.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The entity an [`Inventory`](super::Inventory) belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryHolder {
    /// A player's personal inventory.
    Player(Player),
    /// A block in the world, such as a chest. Blocks have no stable identity
    /// and cannot be persisted as holders.
    Block {
        /// World name.
        world: String,
        /// Block x coordinate.
        x: i32,
        /// Block y coordinate.
        y: i32,
        /// Block z coordinate.
        z: i32,
    },
}

impl Holder for InventoryHolder {
    fn stable_id(&self) -> Option<Uuid> {
        match self {
            Self::Player(player) => Some(player.id),
            Self::Block { .. } => None,
        }
    }
}
