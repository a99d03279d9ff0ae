use std::any::Any;

use lettera_core::alloc::sparse_set::{IndexSlot, SparseSet};
use lettera_core::profiling::profile_function;

use crate::{Component, Entity};

/// Column of one component type, indexed by entity index.
pub struct Storage<T> {
    ids: Vec<Option<IndexSlot>>,
    comps: SparseSet<(Entity, T)>,
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Storage<T> {
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
            comps: SparseSet::new(),
        }
    }

    /// Gets a component based on the entity
    /// This is constant time
    pub fn get(&self, ent: Entity) -> Option<&T> {
        let slot = (*self.ids.get(ent.index() as usize)?)?;
        let (owner, comp) = self.comps.try_get(slot)?;
        (*owner == ent).then_some(comp)
    }

    pub fn get_mut(&mut self, ent: Entity) -> Option<&mut T> {
        let slot = (*self.ids.get(ent.index() as usize)?)?;
        let (owner, comp) = self.comps.try_get_mut(slot)?;
        (*owner == ent).then_some(comp)
    }

    pub fn contains(&self, ent: Entity) -> bool {
        self.get(ent).is_some()
    }

    /// Inserts `comp`, returning the previous value for this entity.
    pub fn insert(&mut self, ent: Entity, comp: T) -> Option<T> {
        profile_function!();
        if let Some(existing) = self.get_mut(ent) {
            return Some(std::mem::replace(existing, comp));
        }
        // drop whatever a previous generation left behind
        self.remove_index(ent.index());

        let idx = self.comps.push((ent, comp));
        let ent = ent.index() as usize;
        if ent >= self.ids.len() {
            let mut new_len = self.ids.len();
            while new_len <= ent {
                // + 1 to account for edge case of 1 * 3 / 2 = 1
                new_len = new_len * 3 / 2 + 1;
            }
            self.ids.resize(new_len, None);
        }
        self.ids[ent] = Some(idx);
        None
    }

    pub fn remove(&mut self, ent: Entity) -> Option<T> {
        profile_function!();
        if !self.contains(ent) {
            return None;
        }
        self.remove_index(ent.index()).map(|(_, comp)| comp)
    }

    fn remove_index(&mut self, index: u32) -> Option<(Entity, T)> {
        let slot = self.ids.get_mut(index as usize)?.take()?;
        self.comps.try_remove(slot)
    }

    pub fn len(&self) -> usize {
        self.comps.len()
    }

    /// Upper bound on entity indices present, for index-order scans.
    pub(crate) fn index_bound(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn get_at(&self, index: usize) -> Option<(Entity, &T)> {
        let slot = (*self.ids.get(index)?)?;
        let (owner, comp) = self.comps.try_get(slot)?;
        Some((*owner, comp))
    }

    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }

    /// Iterates components in entity index order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.ids
            .iter()
            .filter_map(|slot| slot.and_then(|slot| self.comps.try_get(slot)))
            .map(|(ent, comp)| (*ent, comp))
    }

    /// Iterates components mutably, in storage order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.comps.iter_mut().map(|(ent, comp)| (*ent, comp))
    }
}

/// Type-erased access to a [`Storage`], so despawn can strip every column.
pub(crate) trait ErasedStorage: Any + Send + Sync {
    fn remove_entity(&mut self, ent: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ErasedStorage for Storage<T> {
    fn remove_entity(&mut self, ent: Entity) {
        self.remove(ent);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
