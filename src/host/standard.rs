//! Reference host built from [`crate::models`].

use super::{ContainerFactory, HolderDirectory, Host, ItemCodec, JsonItemCodec, PlayerDirectory};
use crate::models::{Inventory, InventoryHolder, ItemStack};

/// Builds [`Inventory`] values for restored blobs.
///
/// Restored inventories are chest-kind custom inventories, since the blob
/// records only a size and a title.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryFactory;

impl ContainerFactory for InventoryFactory {
    type Container = Inventory;

    fn create_container(
        &self,
        holder: Option<InventoryHolder>,
        size: usize,
        title: &str,
    ) -> Inventory {
        Inventory::custom(holder, size, title)
    }

    fn default_title(&self, container: &Inventory) -> String {
        container.kind().default_title().to_string()
    }
}

/// Host wiring [`Inventory`], [`JsonItemCodec`] and [`PlayerDirectory`].
#[derive(Debug, Clone, Default)]
pub struct StandardHost {
    codec: JsonItemCodec,
    players: PlayerDirectory,
    factory: InventoryFactory,
}

impl StandardHost {
    /// Creates a host with nobody online.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host with the given player directory.
    #[must_use]
    pub fn with_players(players: PlayerDirectory) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    /// Returns the online players.
    #[must_use]
    pub const fn players(&self) -> &PlayerDirectory {
        &self.players
    }

    /// Returns the online players for modification.
    pub fn players_mut(&mut self) -> &mut PlayerDirectory {
        &mut self.players
    }
}

impl Host for StandardHost {
    type Container = Inventory;

    fn item_codec(&self) -> &dyn ItemCodec<Item = ItemStack> {
        &self.codec
    }

    fn holder_directory(&self) -> &dyn HolderDirectory<Holder = InventoryHolder> {
        &self.players
    }

    fn container_factory(&self) -> &dyn ContainerFactory<Container = Inventory> {
        &self.factory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Container;
    use crate::models::{InventoryKind, Player};
    use uuid::Uuid;

    #[test]
    fn test_factory_builds_custom_inventory() {
        let inventory = InventoryFactory.create_container(None, 18, "Loot");
        assert_eq!(inventory.kind(), InventoryKind::Chest);
        assert_eq!(inventory.size(), 18);
        assert_eq!(inventory.title(), "Loot");
    }

    #[test]
    fn test_default_title_follows_kind() {
        let furnace = Inventory::new(InventoryKind::Furnace, None);
        assert_eq!(InventoryFactory.default_title(&furnace), "Furnace");
    }

    #[test]
    fn test_host_exposes_players() {
        let mut host = StandardHost::new();
        let steve = Player::new(Uuid::new_v4(), "Steve");
        host.players_mut().join(steve.clone());

        assert_eq!(
            host.holder_directory().resolve(steve.id),
            Some(InventoryHolder::Player(steve))
        );
        assert_eq!(host.players().len(), 1);
    }
}
