//! Golden byte-layout tests for the container format.
//!
//! Stored blobs outlive the code that wrote them, so these pin the exact
//! bytes of a few known containers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use inventory_vault::host::{Container, InventoryFactory, JsonItemCodec, PlayerDirectory};
use inventory_vault::models::{Inventory, InventoryHolder, ItemStack, Player};
use inventory_vault::serializer;
use uuid::Uuid;

const STONE_JSON: &[u8] = br#"{"material":"STONE","amount":64}"#;

/// Two-slot chest titled "Chest": slot 0 empty, slot 1 a stack of stone.
fn golden_chest() -> Vec<u8> {
    let mut expected = vec![0u8; 16];
    expected.push(5);
    expected.extend_from_slice(b"Chest");
    expected.extend_from_slice(&[0, 0, 0, 2]);
    expected.push(0x00);
    expected.push(0x01);
    expected.extend_from_slice(&[0, 0, 0, 32]);
    expected.extend_from_slice(STONE_JSON);
    expected
}

#[test]
fn test_golden_two_slot_chest() {
    let mut inventory = Inventory::custom(None, 2, "Chest");
    inventory.set_item(1, Some(ItemStack::new("STONE", 64)));

    let bytes = serializer::encode(&inventory, "Chest", &JsonItemCodec).unwrap();
    assert_eq!(bytes, golden_chest());
}

#[test]
fn test_golden_blob_decodes() {
    let decoded = serializer::decode(&golden_chest(), &JsonItemCodec).unwrap();
    assert_eq!(decoded.holder_id, None);
    assert_eq!(decoded.title, "Chest");
    assert_eq!(decoded.items, vec![None, Some(ItemStack::new("STONE", 64))]);
}

#[test]
fn test_golden_empty_container() {
    let inventory = Inventory::custom(None, 0, "");
    let bytes = serializer::encode(&inventory, "", &JsonItemCodec).unwrap();

    let mut expected = vec![0u8; 16];
    expected.push(0);
    expected.extend_from_slice(&[0, 0, 0, 0]);
    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), 21);
}

#[test]
fn test_golden_holder_id_is_big_endian() {
    let id = Uuid::parse_str("00112233-4455-6677-8899-aabbccddeeff").unwrap();
    let player = Player::new(id, "Alex");
    let inventory = Inventory::custom(Some(InventoryHolder::Player(player.clone())), 1, "x");

    let bytes = serializer::encode(&inventory, "x", &JsonItemCodec).unwrap();
    assert_eq!(
        &bytes[..16],
        &[
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff
        ]
    );
    assert_eq!(&bytes[16..18], &[1, b'x']);
    assert_eq!(&bytes[18..22], &[0, 0, 0, 1]);
    assert_eq!(bytes[22], 0x00);

    let mut players = PlayerDirectory::new();
    players.join(player.clone());
    let restored: Inventory = serializer::decode(&bytes, &JsonItemCodec)
        .unwrap()
        .into_container(&players, &InventoryFactory);
    assert_eq!(restored.holder(), Some(&InventoryHolder::Player(player)));
}

#[test]
fn test_golden_multibyte_title_length_counts_bytes() {
    // "Truhe ä" is 7 characters but 8 bytes.
    let title = "Truhe \u{e4}";
    let inventory = Inventory::custom(None, 0, title);
    let bytes = serializer::encode(&inventory, title, &JsonItemCodec).unwrap();

    assert_eq!(bytes[16], 8);
    assert_eq!(&bytes[17..25], title.as_bytes());
}
