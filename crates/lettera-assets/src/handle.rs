//! Typed asset handles.
//!
//! A handle is the identity of an asset: two handles are equal exactly when
//! they name the same stored asset, so they work as map keys for data
//! derived from an asset (a font's glyph templates, for instance).

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use lettera_core::alloc::sparse_set::IndexSlot;

use crate::Asset;

/// Generational slot plus the asset type it was minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId {
    pub(crate) slot: IndexSlot,
    pub(crate) type_id: TypeId,
}

impl HandleId {
    pub(crate) fn of<T: Asset>(slot: IndexSlot) -> Self {
        Self {
            slot,
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn index(&self) -> u32 {
        self.slot.index()
    }

    pub fn generation(&self) -> u32 {
        self.slot.generation()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index(), self.generation())
    }
}

/// A copyable, typed reference into an [`Assets<T>`](crate::Assets).
///
/// A handle outlives its asset safely: once the asset is removed, lookups
/// through the old handle return nothing, even after the slot is reused.
pub struct Handle<T: Asset> {
    id: HandleId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Asset> Handle<T> {
    pub(crate) fn new(id: HandleId) -> Self {
        debug_assert_eq!(id.type_id, TypeId::of::<T>());
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub(crate) fn slot(&self) -> IndexSlot {
        self.id.slot
    }
}

impl<T: Asset> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", T::type_name(), self.id)
    }
}

impl<T: Asset> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Asset> Copy for Handle<T> {}

impl<T: Asset> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Asset> Eq for Handle<T> {}

impl<T: Asset> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
