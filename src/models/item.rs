//! Item stacks held in inventory slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names of [`ItemStack`] as they appear in its serialized form. An
/// [`ItemStack::extra`] entry under one of these names cannot round-trip.
pub const RESERVED_ATTRIBUTES: [&str; 5] =
    ["material", "amount", "display_name", "lore", "enchantments"];

/// A stack of items occupying one inventory slot.
///
/// Attributes this crate does not model are kept in [`ItemStack::extra`] so
/// that items written by newer hosts survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material name, e.g. `PUMPKIN`.
    pub material: String,
    /// Number of items in the stack.
    pub amount: u16,
    /// Custom display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Lore lines shown under the name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<String>,
    /// Enchantment name to level.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub enchantments: BTreeMap<String, u16>,
    /// Unrecognized attributes, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ItemStack {
    /// Creates a plain stack of `amount` items of `material`.
    #[must_use]
    pub fn new(material: impl Into<String>, amount: u16) -> Self {
        Self {
            material: material.into(),
            amount,
            display_name: None,
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Appends a lore line.
    #[must_use]
    pub fn with_lore(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }

    /// Adds an enchantment at the given level.
    #[must_use]
    pub fn with_enchantment(mut self, name: impl Into<String>, level: u16) -> Self {
        self.enchantments.insert(name.into(), level);
        self
    }

    /// Returns the first [`ItemStack::extra`] key that shadows a named field.
    #[must_use]
    pub fn shadowed_attribute(&self) -> Option<&str> {
        self.extra
            .keys()
            .map(String::as_str)
            .find(|key| RESERVED_ATTRIBUTES.contains(key))
    }
}
