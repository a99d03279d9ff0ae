use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// A generational index into a [`SparseSet`].
///
/// The upper 32 bits hold the generation, the lower 32 bits the index + 1,
/// so `Option<IndexSlot>` costs nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexSlot(NonZeroU64);

impl IndexSlot {
    pub fn new(generation: u32, idx: u32) -> Self {
        let packed = ((generation as u64) << 32) | (idx as u64 + 1);
        // idx + 1 never wraps past u32::MAX + 1, so the low half is never zero
        Self(NonZeroU64::new(packed).unwrap_or(NonZeroU64::MIN))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

struct Entry<T> {
    generation: u32,
    data: Option<T>,
}

/// Dense storage addressed by generational [`IndexSlot`]s.
///
/// Removed slots are recycled with a bumped generation, so stale slots
/// are detected instead of aliasing the new occupant.
pub struct SparseSet<T> {
    vec: Vec<Entry<T>>,
    free: Vec<u32>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    pub const fn new() -> Self {
        Self {
            vec: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn push(&mut self, data: T) -> IndexSlot {
        profile_function!();
        if let Some(idx) = self.free.pop() {
            let entry = &mut self.vec[idx as usize];
            entry.data = Some(data);
            IndexSlot::new(entry.generation, idx)
        } else {
            let idx = self.vec.len() as u32;
            self.vec.push(Entry {
                generation: 0,
                data: Some(data),
            });
            IndexSlot::new(0, idx)
        }
    }

    /// Gets the value behind `idx`.
    ///
    /// # Panics
    ///
    /// Panics on a stale or out of range slot. Use [`SparseSet::try_get`]
    /// when the slot may have been removed.
    pub fn get(&self, idx: IndexSlot) -> &T {
        match self.try_get(idx) {
            Some(data) => data,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn get_mut(&mut self, idx: IndexSlot) -> &mut T {
        match self.try_get_mut(idx) {
            Some(data) => data,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn try_get(&self, idx: IndexSlot) -> Option<&T> {
        let entry = self.vec.get(idx.index() as usize)?;
        if entry.generation != idx.generation() {
            return None;
        }
        entry.data.as_ref()
    }

    pub fn try_get_mut(&mut self, idx: IndexSlot) -> Option<&mut T> {
        let entry = self.vec.get_mut(idx.index() as usize)?;
        if entry.generation != idx.generation() {
            return None;
        }
        entry.data.as_mut()
    }

    /// Removes the value behind `idx`, returning `None` for a stale slot.
    pub fn try_remove(&mut self, idx: IndexSlot) -> Option<T> {
        profile_function!();
        let index = idx.index();
        let entry = self.vec.get_mut(index as usize)?;
        if entry.generation != idx.generation() {
            return None;
        }
        let data = entry.data.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index);
        Some(data)
    }

    pub fn remove(&mut self, idx: IndexSlot) -> T {
        match self.try_remove(idx) {
            Some(data) => data,
            None => panic!("invalid generation, use after free! ({idx:?})"),
        }
    }

    pub fn contains(&self, idx: IndexSlot) -> bool {
        self.try_get(idx).is_some()
    }

    pub fn len(&self) -> usize {
        self.vec.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.vec.iter().filter_map(|entry| entry.data.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.vec.iter_mut().filter_map(|entry| entry.data.as_mut())
    }

    /// Iterates occupied slots together with their current handles.
    pub fn iter_slots(&self) -> impl Iterator<Item = (IndexSlot, &T)> {
        self.vec.iter().enumerate().filter_map(|(idx, entry)| {
            entry
                .data
                .as_ref()
                .map(|data| (IndexSlot::new(entry.generation, idx as u32), data))
        })
    }
}

static_assertions::assert_eq_size!(IndexSlot, Option<IndexSlot>);
