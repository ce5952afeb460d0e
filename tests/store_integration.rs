//! Integration tests for the `SQLite` inventory store.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use inventory_vault::host::{Container, PlayerDirectory, StandardHost};
use inventory_vault::models::{Inventory, InventoryHolder, ItemStack, Player};
use inventory_vault::{Error, InventoryId, InventoryStore, StoreConfig};
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

fn open_store(temp_dir: &TempDir) -> InventoryStore<StandardHost> {
    InventoryStore::open(temp_dir.path().join("inventories.sqlite3"), StandardHost::new())
        .expect("Failed to open store")
}

#[test]
fn test_super_inventory_scenario() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = open_store(&temp_dir);

    let title = "Super inventory";
    let mut inventory = Inventory::custom(None, 36, title);
    inventory.set_item(3, Some(ItemStack::new("PUMPKIN", 48)));

    let id = store.create(&inventory, title).unwrap();

    inventory.set_item(5, Some(ItemStack::new("DIAMOND_HOE", 1)));
    assert!(store.update(id, &inventory, title).unwrap());

    let restored = store.read(id).unwrap().expect("inventory should exist");
    assert_eq!(restored.title(), title);
    assert_eq!(restored.size(), 36);
    assert_eq!(restored.contents(), inventory.contents());
    for index in 0..36 {
        match index {
            3 => assert_eq!(restored.item(3), Some(&ItemStack::new("PUMPKIN", 48))),
            5 => assert_eq!(restored.item(5), Some(&ItemStack::new("DIAMOND_HOE", 1))),
            _ => assert_eq!(restored.item(index), None, "slot {index} should be empty"),
        }
    }

    assert!(store.delete(id).unwrap());
    assert!(store.read(id).unwrap().is_none());

    store.close().unwrap();
}

#[test]
fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut inventory = Inventory::custom(None, 27, "Vault");
    inventory.set_item(
        0,
        Some(
            ItemStack::new("NETHERITE_SWORD", 1)
                .with_display_name("Oathkeeper")
                .with_lore("Never broken")
                .with_enchantment("sharpness", 5),
        ),
    );

    let id = {
        let mut store = open_store(&temp_dir);
        let id = store.create(&inventory, "Vault").unwrap();
        store.close().unwrap();
        id
    };

    // Reopening runs CREATE TABLE IF NOT EXISTS again and must keep the data.
    let store = open_store(&temp_dir);
    let restored = store.read(id).unwrap().expect("inventory should survive reopen");
    assert_eq!(restored, inventory);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_crud_on_unknown_ids() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = open_store(&temp_dir);
    let unknown = InventoryId::generate();
    let inventory = Inventory::custom(None, 9, "Nothing");

    assert!(store.read(unknown).unwrap().is_none());
    assert!(!store.update(unknown, &inventory, "Nothing").unwrap());
    assert!(!store.delete(unknown).unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_delete_is_not_repeatable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = open_store(&temp_dir);
    let id = store
        .create(&Inventory::custom(None, 9, "Once"), "Once")
        .unwrap();

    assert!(store.delete(id).unwrap());
    assert!(!store.delete(id).unwrap());
}

#[test]
fn test_ids_are_unique_within_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = open_store(&temp_dir);
    let inventory = Inventory::custom(None, 1, "t");

    let mut ids: Vec<InventoryId> = (0..50)
        .map(|_| store.create(&inventory, "t").unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
    assert_eq!(store.count().unwrap(), 50);
}

#[test]
fn test_player_holder_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let steve = Player::new(Uuid::new_v4(), "Steve");
    let mut players = PlayerDirectory::new();
    players.join(steve.clone());

    let mut store = InventoryStore::open(
        temp_dir.path().join("inventories.sqlite3"),
        StandardHost::with_players(players),
    )
    .unwrap();

    let holder = InventoryHolder::Player(steve.clone());
    let mut inventory = Inventory::custom(Some(holder.clone()), 9, "Steve's bag");
    inventory.set_item(0, Some(ItemStack::new("BREAD", 16)));
    let id = store.create(&inventory, "Steve's bag").unwrap();

    assert_eq!(store.read(id).unwrap().unwrap().holder(), Some(&holder));

    // Owner goes offline: the inventory comes back shared, contents intact.
    store.host_mut().players_mut().leave(steve.id);
    let restored = store.read(id).unwrap().unwrap();
    assert_eq!(restored.holder(), None);
    assert_eq!(restored.contents(), inventory.contents());
}

#[test]
fn test_open_with_config_creates_parent_dirs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("nested").join("dir").join("inv.sqlite3");
    let config = StoreConfig {
        busy_timeout: Duration::from_millis(250),
        ..StoreConfig::default().with_db_path(&db_path)
    };

    let mut store = InventoryStore::open_with_config(&config, StandardHost::new()).unwrap();
    assert_eq!(store.db_path(), db_path.as_path());
    assert!(db_path.exists());
    store.close().unwrap();
}

#[test]
fn test_open_fails_on_directory_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = InventoryStore::open(temp_dir.path(), StandardHost::new());
    assert!(matches!(result, Err(Error::StorageFailed { .. })));
}

#[test]
fn test_close_then_everything_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = open_store(&temp_dir);
    let inventory = Inventory::custom(None, 9, "t");
    let id = store.create(&inventory, "t").unwrap();

    store.close().unwrap();

    assert!(matches!(store.read(id), Err(Error::StoreClosed)));
    assert!(matches!(store.create(&inventory, "t"), Err(Error::StoreClosed)));
    assert!(matches!(store.update(id, &inventory, "t"), Err(Error::StoreClosed)));
    assert!(matches!(store.delete(id), Err(Error::StoreClosed)));
    assert!(matches!(store.stats(), Err(Error::StoreClosed)));
    assert!(matches!(store.close(), Err(Error::StoreClosed)));

    // The data is still on disk for the next session.
    let store = open_store(&temp_dir);
    assert!(store.contains(id).unwrap());
}
