//! Host collaborator contracts.
//!
//! The serializer and the store never know the concrete container, item or
//! holder types. They talk to the host through these traits:
//!
//! - [`Container`]: slot access for one inventory
//! - [`Holder`]: coercion of a holder to a stable identity
//! - [`ItemCodec`]: self-delimiting encoding of a single slot
//! - [`HolderDirectory`]: lookup of a currently present holder
//! - [`ContainerFactory`]: construction of containers and default titles
//! - [`Host`]: one of each, bundled for a store
//!
//! [`StandardHost`] wires up the reference types from [`crate::models`].

mod codec;
mod directory;
mod standard;

pub use codec::{EMPTY_SLOT_TAG, ITEM_STACK_TAG, JsonItemCodec};
pub use directory::PlayerDirectory;
pub use standard::{InventoryFactory, StandardHost};

use crate::Result;
use bytes::BytesMut;
use uuid::Uuid;

/// Slot access for a fixed-size ordered container.
pub trait Container {
    /// Value stored in a non-empty slot.
    type Item;
    /// The entity the container belongs to.
    type Holder: Holder;

    /// Returns the declared number of slots.
    fn size(&self) -> usize;

    /// Returns the holder, if any.
    fn holder(&self) -> Option<&Self::Holder>;

    /// Returns the item at `index`, or `None` for an empty or out-of-range slot.
    fn item(&self, index: usize) -> Option<&Self::Item>;

    /// Replaces the slot at `index`. `index` must be below [`Container::size`].
    fn set_item(&mut self, index: usize, item: Option<Self::Item>);
}

/// A container holder.
pub trait Holder {
    /// Returns the long-lived identity of this holder, or `None` when the
    /// holder has no identity that survives a restart.
    fn stable_id(&self) -> Option<Uuid>;
}

/// Encodes single slots to a self-delimiting byte form.
pub trait ItemCodec {
    /// Value stored in a non-empty slot.
    type Item;

    /// Appends the encoding of one slot to `dst`. Empty slots are encoded too.
    fn encode_item(&self, item: Option<&Self::Item>, dst: &mut BytesMut) -> Result<()>;

    /// Decodes one slot from the front of `src`, advancing it past exactly the
    /// bytes [`ItemCodec::encode_item`] wrote.
    fn decode_item(&self, src: &mut &[u8]) -> Result<Option<Self::Item>>;
}

/// Resolves holder identities to currently present holders.
pub trait HolderDirectory {
    /// The holder type produced.
    type Holder;

    /// Returns the holder with the given identity if it is currently present.
    fn resolve(&self, id: Uuid) -> Option<Self::Holder>;
}

/// Builds containers.
pub trait ContainerFactory {
    /// The container type produced.
    type Container: Container;

    /// Creates an empty container.
    fn create_container(
        &self,
        holder: Option<<Self::Container as Container>::Holder>,
        size: usize,
        title: &str,
    ) -> Self::Container;

    /// Returns the default title for the container's kind.
    fn default_title(&self, container: &Self::Container) -> String;
}

/// Collaborators a store needs for one container type.
pub trait Host {
    /// The container type persisted.
    type Container: Container;

    /// Returns the item codec.
    fn item_codec(&self) -> &dyn ItemCodec<Item = <Self::Container as Container>::Item>;

    /// Returns the holder directory.
    fn holder_directory(
        &self,
    ) -> &dyn HolderDirectory<Holder = <Self::Container as Container>::Holder>;

    /// Returns the container factory.
    fn container_factory(&self) -> &dyn ContainerFactory<Container = Self::Container>;
}
