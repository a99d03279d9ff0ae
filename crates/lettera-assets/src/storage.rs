//! Per-type asset storage.

use std::sync::Arc;

use lettera_core::alloc::{HashMap, sparse_set::SparseSet};

use crate::Asset;
use crate::error::AssetError;
use crate::handle::{Handle, HandleId};
use crate::source::AssetSource;
use crate::state::{AssetEntry, AssetState, LoadState};

/// Storage for every asset of one type, usually kept as a world resource.
///
/// Sources are deduplicated: storing under a source that already has a
/// handle replaces the asset behind that handle instead of minting a new
/// identity.
pub struct Assets<T: Asset> {
    entries: SparseSet<AssetEntry<T>>,
    by_source: HashMap<String, HandleId>,
}

impl<T: Asset> Default for Assets<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Asset> Assets<T> {
    pub fn new() -> Self {
        Self {
            entries: SparseSet::new(),
            by_source: HashMap::new(),
        }
    }

    /// Store a ready asset.
    pub fn insert(&mut self, source: impl Into<AssetSource>, asset: T) -> Handle<T> {
        let handle = self.reserve(source);
        self.set_loaded(&handle, asset);
        handle
    }

    /// Get a handle for an asset that will be produced later. Reserving a
    /// source twice returns the same handle.
    pub fn reserve(&mut self, source: impl Into<AssetSource>) -> Handle<T> {
        let source = source.into();
        if let Some(&id) = self.by_source.get(source.key()) {
            return Handle::new(id);
        }

        let key = source.key().to_owned();
        let id = HandleId::of::<T>(self.entries.push(AssetEntry::reserved(source)));
        self.by_source.insert(key, id);
        Handle::new(id)
    }

    pub fn set_loading(&mut self, handle: &Handle<T>) {
        if let Some(entry) = self.entries.try_get_mut(handle.slot()) {
            entry.state = AssetState::Loading;
        }
    }

    pub fn set_loaded(&mut self, handle: &Handle<T>, asset: T) {
        let Some(entry) = self.entries.try_get_mut(handle.slot()) else {
            tracing::warn!("dropping {} for removed handle {:?}", T::type_name(), handle);
            return;
        };
        entry.store(asset);
        if entry.version > 1 {
            tracing::debug!(
                "replaced {} '{}' (version {})",
                T::type_name(),
                entry.source,
                entry.version
            );
        }
    }

    pub fn set_failed(&mut self, handle: &Handle<T>, error: AssetError) {
        if let Some(entry) = self.entries.try_get_mut(handle.slot()) {
            tracing::warn!("{} '{}' failed: {}", T::type_name(), entry.source, error);
            entry.state = AssetState::Failed(Arc::new(error));
        }
    }

    /// The asset, if it is ready.
    pub fn get(&self, handle: &Handle<T>) -> Option<&Arc<T>> {
        self.entries.try_get(handle.slot())?.asset()
    }

    pub fn entry(&self, handle: &Handle<T>) -> Option<&AssetEntry<T>> {
        self.entries.try_get(handle.slot())
    }

    /// A removed handle reports [`LoadState::Reserved`].
    pub fn load_state(&self, handle: &Handle<T>) -> LoadState {
        self.entry(handle)
            .map_or(LoadState::Reserved, |entry| entry.state.load_state())
    }

    pub fn is_ready(&self, handle: &Handle<T>) -> bool {
        self.load_state(handle) == LoadState::Ready
    }

    /// Why the asset is not available: the stored failure, or
    /// [`AssetError::Removed`] for a handle whose entry is gone. `None`
    /// while the asset is ready or still pending.
    pub fn failure(&self, handle: &Handle<T>) -> Option<AssetError> {
        match self.entry(handle) {
            None => Some(AssetError::Removed {
                type_name: T::type_name(),
            }),
            Some(entry) => entry.state.error().cloned(),
        }
    }

    pub fn find(&self, source: &AssetSource) -> Option<Handle<T>> {
        self.by_source.get(source.key()).map(|&id| Handle::new(id))
    }

    pub fn source(&self, handle: &Handle<T>) -> Option<&AssetSource> {
        self.entry(handle).map(|entry| &entry.source)
    }

    pub fn remove(&mut self, handle: &Handle<T>) -> Option<AssetEntry<T>> {
        let entry = self.entries.try_remove(handle.slot())?;
        self.by_source.remove(entry.source.key());
        Some(entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &AssetEntry<T>)> {
        self.entries
            .iter_slots()
            .map(|(slot, entry)| (Handle::new(HandleId::of::<T>(slot)), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
