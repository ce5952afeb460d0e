//! Inventory identifiers and their fixed 16-byte storage form.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length in bytes of an encoded identifier.
pub const ID_LEN: usize = 16;

/// Unique identifier of a stored inventory.
///
/// Stored as a 16-byte big-endian value: the high 64 bits followed by the low
/// 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(Uuid);

impl InventoryId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Builds an identifier from its high and low 64-bit halves.
    #[must_use]
    pub const fn from_u64_pair(most: u64, least: u64) -> Self {
        Self(Uuid::from_u64_pair(most, least))
    }

    /// Returns the high and low 64-bit halves.
    #[must_use]
    pub const fn as_u64_pair(&self) -> (u64, u64) {
        self.0.as_u64_pair()
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Encodes the identifier as 16 big-endian bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ID_LEN] {
        self.0.as_u128().to_be_bytes()
    }

    /// Decodes an identifier from exactly 16 big-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedIdentifier`] if `bytes` is not 16 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; ID_LEN] = bytes
            .try_into()
            .map_err(|_| Error::MalformedIdentifier { len: bytes.len() })?;
        Ok(Self(Uuid::from_u128(u128::from_be_bytes(raw))))
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for InventoryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidInput(format!("invalid inventory id '{s}': {e}")))
    }
}

impl From<Uuid> for InventoryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<InventoryId> for Uuid {
    fn from(id: InventoryId) -> Self {
        id.0
    }
}
