//! Directory of online players.

use super::HolderDirectory;
use crate::models::{InventoryHolder, Player};
use std::collections::HashMap;
use uuid::Uuid;

/// Players currently present on the host.
///
/// Resolving an identity that is not online yields `None`, so inventories
/// restored while their owner is offline come back without a holder.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    online: HashMap<Uuid, Player>,
}

impl PlayerDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a player as online.
    pub fn join(&mut self, player: Player) {
        self.online.insert(player.id, player);
    }

    /// Marks a player as offline, returning it if it was online.
    pub fn leave(&mut self, id: Uuid) -> Option<Player> {
        self.online.remove(&id)
    }

    /// Returns the number of online players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.online.len()
    }

    /// Returns `true` if nobody is online.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.online.is_empty()
    }
}

impl HolderDirectory for PlayerDirectory {
    type Holder = InventoryHolder;

    fn resolve(&self, id: Uuid) -> Option<InventoryHolder> {
        self.online.get(&id).cloned().map(InventoryHolder::Player)
    }
}
