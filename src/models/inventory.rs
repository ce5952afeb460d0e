//! The reference inventory container.

use super::{InventoryHolder, ItemStack};
use crate::host::Container;
use std::fmt;

/// Kinds of inventory the host can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InventoryKind {
    /// Single chest. Also used for custom inventories created from a size.
    #[default]
    Chest,
    /// Dispenser.
    Dispenser,
    /// Dropper.
    Dropper,
    /// Furnace.
    Furnace,
    /// Crafting table.
    Workbench,
    /// Enchanting table.
    Enchanting,
    /// Brewing stand.
    Brewing,
    /// Player inventory.
    Player,
    /// Ender chest.
    EnderChest,
    /// Hopper.
    Hopper,
    /// Barrel.
    Barrel,
    /// Shulker box.
    ShulkerBox,
}

impl InventoryKind {
    /// Title shown when no custom title is given.
    #[must_use]
    pub const fn default_title(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Dispenser => "Dispenser",
            Self::Dropper => "Dropper",
            Self::Furnace => "Furnace",
            Self::Workbench => "Crafting",
            Self::Enchanting => "Enchanting",
            Self::Brewing => "Brewing",
            Self::Player => "Player",
            Self::EnderChest => "Ender Chest",
            Self::Hopper => "Item Hopper",
            Self::Barrel => "Barrel",
            Self::ShulkerBox => "Shulker Box",
        }
    }

    /// Number of slots the kind has by default.
    #[must_use]
    pub const fn default_size(self) -> usize {
        match self {
            Self::Chest | Self::EnderChest | Self::Barrel | Self::ShulkerBox => 27,
            Self::Dispenser | Self::Dropper => 9,
            Self::Furnace => 3,
            Self::Workbench => 10,
            Self::Enchanting => 2,
            Self::Brewing | Self::Hopper => 5,
            Self::Player => 41,
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_title())
    }
}

/// A fixed-size ordered sequence of item slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    kind: InventoryKind,
    holder: Option<InventoryHolder>,
    title: String,
    slots: Vec<Option<ItemStack>>,
}

impl Inventory {
    /// Creates an empty inventory of the kind's default size and title.
    #[must_use]
    pub fn new(kind: InventoryKind, holder: Option<InventoryHolder>) -> Self {
        Self {
            kind,
            holder,
            title: kind.default_title().to_string(),
            slots: vec![None; kind.default_size()],
        }
    }

    /// Creates an empty chest-kind inventory with a custom size and title.
    #[must_use]
    pub fn custom(holder: Option<InventoryHolder>, size: usize, title: impl Into<String>) -> Self {
        Self {
            kind: InventoryKind::Chest,
            holder,
            title: title.into(),
            slots: vec![None; size],
        }
    }

    /// Returns the inventory kind.
    #[must_use]
    pub const fn kind(&self) -> InventoryKind {
        self.kind
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns all slots in order.
    #[must_use]
    pub fn contents(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

impl Container for Inventory {
    type Item = ItemStack;
    type Holder = InventoryHolder;

    fn size(&self) -> usize {
        self.slots.len()
    }

    fn holder(&self) -> Option<&InventoryHolder> {
        self.holder.as_ref()
    }

    fn item(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Writes to an in-range slot; out-of-range indices are ignored.
    fn set_item(&mut self, index: usize, item: Option<ItemStack>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = item;
        }
    }
}
