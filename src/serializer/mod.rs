//! Binary encoding of whole containers.
//!
//! Layout of one encoded container:
//!
//! | field          | size             | meaning                                     |
//! |----------------|------------------|---------------------------------------------|
//! | `holder_most`  | 8 bytes          | high 64 bits of the holder id, 0 if none    |
//! | `holder_least` | 8 bytes          | low 64 bits of the holder id, 0 if none     |
//! | `title_len`    | 1 byte           | title length in bytes                       |
//! | `title`        | `title_len`      | UTF-8 title                                 |
//! | `size`         | 4 bytes          | slot count, big-endian                      |
//! | slots          | variable         | `size` slots, each written by the item codec|
//!
//! The format carries no version. A holder whose id is all zeroes cannot be
//! told apart from no holder.

use crate::host::{Container, ContainerFactory, Holder, HolderDirectory, ItemCodec};
use crate::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};
use uuid::Uuid;

/// Size of the holder id field.
pub const HOLDER_ID_LEN: usize = 16;

/// Longest title the length byte can describe.
pub const MAX_TITLE_LEN: usize = u8::MAX as usize;

/// Conventional title limit of the host UI. Longer titles still encode.
pub const RECOMMENDED_TITLE_LEN: usize = 128;

/// Bytes before the first slot, excluding the title itself.
const FIXED_HEADER_LEN: usize = HOLDER_ID_LEN + 1 + 4;

/// Encodes `container` with the given display title.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the title is longer than [`MAX_TITLE_LEN`]
/// bytes, if the holder has no stable identity, or if the item codec fails.
pub fn encode<C: Container>(
    container: &C,
    title: &str,
    codec: &(impl ItemCodec<Item = C::Item> + ?Sized),
) -> Result<Vec<u8>> {
    let title_len = u8::try_from(title.len()).map_err(|_| {
        Error::Encoding(format!(
            "title is {} bytes, at most {MAX_TITLE_LEN} fit",
            title.len()
        ))
    })?;
    let size = u32::try_from(container.size()).map_err(|_| {
        Error::Encoding(format!("size {} does not fit in 32 bits", container.size()))
    })?;

    let holder_id = match container.holder() {
        None => Uuid::nil(),
        Some(holder) => holder
            .stable_id()
            .ok_or_else(|| Error::Encoding("holder has no stable identity".to_string()))?,
    };

    let mut buf = BytesMut::with_capacity(FIXED_HEADER_LEN + title.len() + container.size());
    let (most, least) = holder_id.as_u64_pair();
    buf.put_u64(most);
    buf.put_u64(least);
    buf.put_u8(title_len);
    buf.put_slice(title.as_bytes());
    buf.put_u32(size);

    for index in 0..container.size() {
        codec
            .encode_item(container.item(index), &mut buf)
            .map_err(|e| Error::Encoding(format!("slot {index}: {}", e.detail())))?;
    }

    Ok(buf.to_vec())
}

/// Decodes a blob produced by [`encode`].
///
/// # Errors
///
/// Returns [`Error::Decoding`] if the blob is truncated, the title is not
/// UTF-8, fewer slots than declared are present, bytes follow the last slot,
/// or the item codec fails.
pub fn decode<I>(
    bytes: &[u8],
    codec: &(impl ItemCodec<Item = I> + ?Sized),
) -> Result<DecodedContainer<I>> {
    let mut src = bytes;

    ensure_remaining(src, HOLDER_ID_LEN, "holder id")?;
    let most = src.get_u64();
    let least = src.get_u64();
    let holder_id = (most != 0 || least != 0).then(|| Uuid::from_u64_pair(most, least));

    ensure_remaining(src, 1, "title length")?;
    let title_len = usize::from(src.get_u8());
    ensure_remaining(src, title_len, "title")?;
    let (title_bytes, rest) = src.split_at(title_len);
    let title = std::str::from_utf8(title_bytes)
        .map_err(|e| Error::Decoding(format!("title is not UTF-8: {e}")))?
        .to_string();
    src = rest;

    ensure_remaining(src, 4, "size")?;
    let size = src.get_u32() as usize;

    // Every slot takes at least one byte, so a corrupt size cannot force a
    // huge allocation.
    let mut items = Vec::with_capacity(size.min(src.len()));
    for index in 0..size {
        if src.is_empty() {
            return Err(Error::Decoding(format!("declared {size} slots, found {index}")));
        }
        let item = codec
            .decode_item(&mut src)
            .map_err(|e| Error::Decoding(format!("slot {index}: {}", e.detail())))?;
        items.push(item);
    }

    if !src.is_empty() {
        return Err(Error::Decoding(format!(
            "{} trailing bytes after {size} slots",
            src.len()
        )));
    }

    Ok(DecodedContainer {
        holder_id,
        title,
        items,
    })
}

fn ensure_remaining(src: &[u8], needed: usize, field: &str) -> Result<()> {
    if src.len() < needed {
        return Err(Error::Decoding(format!(
            "truncated {field}: need {needed} bytes, {} remain",
            src.len()
        )));
    }
    Ok(())
}

/// The parts of a decoded container, before the host rebuilds it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedContainer<I> {
    /// Holder identity, `None` for the all-zero sentinel.
    pub holder_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Slot contents in order; the length is the declared size.
    pub items: Vec<Option<I>>,
}

impl<I> DecodedContainer<I> {
    /// Returns the declared slot count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Rebuilds a host container.
    ///
    /// A holder id that the directory cannot resolve (for example an offline
    /// player) yields a container without a holder.
    pub fn into_container<C: Container<Item = I>>(
        self,
        directory: &(impl HolderDirectory<Holder = C::Holder> + ?Sized),
        factory: &(impl ContainerFactory<Container = C> + ?Sized),
    ) -> C {
        let holder = self.holder_id.and_then(|id| directory.resolve(id));
        if holder.is_none() && self.holder_id.is_some() {
            tracing::debug!(
                holder_id = ?self.holder_id,
                "holder not present, restoring container without holder"
            );
        }

        let mut container = factory.create_container(holder, self.items.len(), &self.title);
        for (index, item) in self.items.into_iter().enumerate() {
            if item.is_some() {
                container.set_item(index, item);
            }
        }
        container
    }
}
