use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// A generational entity id.
///
/// An index is recycled after its entity is despawned, with a bumped
/// generation, so a stale `Entity` never resolves to the new occupant.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out fresh entity ids without access to the world.
///
/// Reserved entities are not alive until a [`CommandBuffer`](crate::CommandBuffer)
/// that reserved them is applied.
#[derive(Clone, Debug)]
pub struct EntityReserver {
    next: Arc<AtomicU32>,
}

impl EntityReserver {
    pub fn reserve(&self) -> Entity {
        Entity::new(self.next.fetch_add(1, Ordering::Relaxed), 0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EntityMeta {
    generation: u32,
    alive: bool,
}

/// Entity allocator.
#[derive(Debug)]
pub struct Entities {
    meta: Vec<EntityMeta>,
    free: Vec<u32>,
    next: Arc<AtomicU32>,
    alive: usize,
}

impl Default for Entities {
    fn default() -> Self {
        Self::new()
    }
}

impl Entities {
    pub fn new() -> Self {
        Self {
            meta: Vec::new(),
            free: Vec::new(),
            next: Arc::new(AtomicU32::new(0)),
            alive: 0,
        }
    }

    pub fn reserver(&self) -> EntityReserver {
        EntityReserver {
            next: Arc::clone(&self.next),
        }
    }

    /// Allocate a live entity immediately, recycling a freed index if any.
    pub fn alloc(&mut self) -> Entity {
        let entity = match self.free.pop() {
            Some(index) => {
                let meta = &mut self.meta[index as usize];
                meta.alive = true;
                Entity::new(index, meta.generation)
            }
            None => {
                let index = self.next.fetch_add(1, Ordering::Relaxed);
                self.grow_to(index);
                self.meta[index as usize].alive = true;
                Entity::new(index, 0)
            }
        };
        self.alive += 1;
        entity
    }

    /// Bring a reserved entity to life. Returns `false` if the id was never
    /// reserved or is already alive.
    pub fn materialize(&mut self, entity: Entity) -> bool {
        if entity.index >= self.next.load(Ordering::Relaxed) {
            return false;
        }
        self.grow_to(entity.index);
        let meta = &mut self.meta[entity.index as usize];
        if meta.alive || meta.generation != entity.generation {
            return false;
        }
        meta.alive = true;
        self.alive += 1;
        true
    }

    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) {
            return false;
        }
        let meta = &mut self.meta[entity.index as usize];
        meta.alive = false;
        meta.generation = meta.generation.wrapping_add(1);
        self.free.push(entity.index);
        self.alive -= 1;
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.meta
            .get(entity.index as usize)
            .is_some_and(|meta| meta.alive && meta.generation == entity.generation)
    }

    pub fn len(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    fn grow_to(&mut self, index: u32) {
        let index = index as usize;
        if index >= self.meta.len() {
            self.meta.resize(index + 1, EntityMeta::default());
        }
    }
}
