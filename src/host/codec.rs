//! Reference item codec.
//!
//! Each slot is a one-byte tag. [`EMPTY_SLOT_TAG`] stands alone;
//! [`ITEM_STACK_TAG`] is followed by a big-endian `u32` length and that many
//! bytes of JSON.

use super::ItemCodec;
use crate::models::ItemStack;
use crate::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};

/// Tag of an empty slot.
pub const EMPTY_SLOT_TAG: u8 = 0x00;

/// Tag of a slot holding an [`ItemStack`].
pub const ITEM_STACK_TAG: u8 = 0x01;

/// Upper bound on a single item payload (1 MiB).
const MAX_PAYLOAD_LEN: usize = 1024 * 1024;

/// Tag + length-prefixed JSON codec for [`ItemStack`] slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonItemCodec;

impl JsonItemCodec {
    /// Creates the codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ItemCodec for JsonItemCodec {
    type Item = ItemStack;

    fn encode_item(&self, item: Option<&ItemStack>, dst: &mut BytesMut) -> Result<()> {
        let Some(item) = item else {
            dst.put_u8(EMPTY_SLOT_TAG);
            return Ok(());
        };

        if let Some(key) = item.shadowed_attribute() {
            return Err(Error::Encoding(format!(
                "item '{}': extra attribute '{key}' shadows a named field",
                item.material
            )));
        }

        let payload = serde_json::to_vec(item)
            .map_err(|e| Error::Encoding(format!("item '{}': {e}", item.material)))?;
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::Encoding(format!(
                "item '{}' payload is {} bytes, limit is {MAX_PAYLOAD_LEN}",
                item.material,
                payload.len()
            )));
        }
        let len = u32::try_from(payload.len())
            .map_err(|e| Error::Encoding(format!("item payload length: {e}")))?;

        dst.reserve(1 + 4 + payload.len());
        dst.put_u8(ITEM_STACK_TAG);
        dst.put_u32(len);
        dst.put_slice(&payload);
        Ok(())
    }

    fn decode_item(&self, src: &mut &[u8]) -> Result<Option<ItemStack>> {
        if !src.has_remaining() {
            return Err(Error::Decoding("missing item tag".to_string()));
        }

        match src.get_u8() {
            EMPTY_SLOT_TAG => Ok(None),
            ITEM_STACK_TAG => {
                if src.remaining() < 4 {
                    return Err(Error::Decoding("truncated item length".to_string()));
                }
                let len = src.get_u32() as usize;
                if len > MAX_PAYLOAD_LEN {
                    return Err(Error::Decoding(format!(
                        "item payload length {len} exceeds limit {MAX_PAYLOAD_LEN}"
                    )));
                }
                if src.remaining() < len {
                    return Err(Error::Decoding(format!(
                        "item payload needs {len} bytes, {} remain",
                        src.remaining()
                    )));
                }
                let data: &[u8] = *src;
                let (payload, rest) = data.split_at(len);
                let item = serde_json::from_slice(payload)
                    .map_err(|e| Error::Decoding(format!("item payload: {e}")))?;
                *src = rest;
                Ok(Some(item))
            },
            tag => Err(Error::Decoding(format!("unknown item tag 0x{tag:02x}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(item: Option<&ItemStack>) -> Vec<u8> {
        let mut buf = BytesMut::new();
        JsonItemCodec.encode_item(item, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn test_empty_slot_is_single_tag() {
        assert_eq!(encode(None), vec![EMPTY_SLOT_TAG]);

        let bytes = [EMPTY_SLOT_TAG, 0xAA];
        let mut src = &bytes[..];
        assert_eq!(JsonItemCodec.decode_item(&mut src).unwrap(), None);
        assert_eq!(src, &[0xAA]);
    }

    #[test]
    fn test_item_layout() {
        let bytes = encode(Some(&ItemStack::new("STONE", 64)));
        let json = br#"{"material":"STONE","amount":64}"#;

        assert_eq!(bytes[0], ITEM_STACK_TAG);
        assert_eq!(&bytes[1..5], &u32::try_from(json.len()).unwrap().to_be_bytes());
        assert_eq!(&bytes[5..], json);
    }

    #[test]
    fn test_decode_consumes_exactly_one_slot() {
        let first = ItemStack::new("PUMPKIN", 48).with_display_name("Jack");
        let mut bytes = encode(Some(&first));
        bytes.extend(encode(None));
        bytes.extend(encode(Some(&ItemStack::new("DIAMOND_HOE", 1))));

        let mut src = &bytes[..];
        assert_eq!(JsonItemCodec.decode_item(&mut src).unwrap(), Some(first));
        assert_eq!(JsonItemCodec.decode_item(&mut src).unwrap(), None);
        assert_eq!(
            JsonItemCodec.decode_item(&mut src).unwrap(),
            Some(ItemStack::new("DIAMOND_HOE", 1))
        );
        assert!(src.is_empty());
    }

    #[test]
    fn test_decode_errors() {
        let cases: [&[u8]; 5] = [
            &[],
            &[ITEM_STACK_TAG, 0, 0],
            &[ITEM_STACK_TAG, 0, 0, 0, 10, b'{'],
            &[ITEM_STACK_TAG, 0, 0, 0, 2, b'{', b'x'],
            &[0x7f],
        ];
        for bytes in cases {
            let mut src = bytes;
            let err = JsonItemCodec.decode_item(&mut src).unwrap_err();
            assert!(matches!(err, Error::Decoding(_)), "{bytes:?} -> {err}");
        }
    }

    #[test]
    fn test_encode_rejects_shadowing_extra_attribute() {
        for key in crate::models::RESERVED_ATTRIBUTES {
            let mut item = ItemStack::new("STONE", 1);
            item.extra.insert(key.to_string(), serde_json::json!(7));

            let mut buf = BytesMut::new();
            let err = JsonItemCodec.encode_item(Some(&item), &mut buf).unwrap_err();
            assert!(matches!(err, Error::Encoding(ref msg) if msg.contains(key)), "{key}: {err}");
            assert!(buf.is_empty(), "{key}: nothing should be written");
        }
    }

    #[test]
    fn test_unmodelled_extra_attribute_roundtrips() {
        let mut item = ItemStack::new("MAP", 1);
        item.extra.insert("map_id".to_string(), serde_json::json!(42));

        let bytes = encode(Some(&item));
        let mut src = &bytes[..];
        assert_eq!(JsonItemCodec.decode_item(&mut src).unwrap(), Some(item));
    }

    #[test]
    fn test_decode_rejects_oversized_length() {
        let bytes = [ITEM_STACK_TAG, 0xff, 0xff, 0xff, 0xff];
        let mut src = &bytes[..];
        let err = JsonItemCodec.decode_item(&mut src).unwrap_err();
        assert!(err.to_string().contains("exceeds limit"));
    }
}
