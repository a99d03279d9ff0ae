//! Singleton data stored on the [`World`](crate::World).
//!
//! Font caches, asset tables and settings live here rather than on an
//! entity. Each resource type has at most one instance.

use std::any::{Any, TypeId};

use lettera_core::alloc::HashMap;

/// Marker trait for types that can be stored as resources.
pub trait Resource: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Resource for T {}

struct ResourceEntry {
    data: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Container for resources, keyed by type.
///
/// # Example
///
/// ```
/// use lettera_ecs::Resources;
///
/// struct Leading(f32);
///
/// let mut resources = Resources::new();
/// resources.insert(Leading(1.2));
///
/// assert_eq!(resources.get::<Leading>().map(|l| l.0), Some(1.2));
/// ```
#[derive(Default)]
pub struct Resources {
    storage: HashMap<TypeId, ResourceEntry>,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Insert a resource, returning the previous one of the same type.
    pub fn insert<R: Resource>(&mut self, resource: R) -> Option<R> {
        let entry = ResourceEntry {
            data: Box::new(resource),
            type_name: std::any::type_name::<R>(),
        };

        self.storage
            .insert(TypeId::of::<R>(), entry)
            .and_then(|old| old.data.downcast::<R>().ok().map(|b| *b))
    }

    pub fn get<R: Resource>(&self) -> Option<&R> {
        self.storage
            .get(&TypeId::of::<R>())
            .and_then(|entry| entry.data.downcast_ref())
    }

    pub fn get_mut<R: Resource>(&mut self) -> Option<&mut R> {
        self.storage
            .get_mut(&TypeId::of::<R>())
            .and_then(|entry| entry.data.downcast_mut())
    }

    pub fn remove<R: Resource>(&mut self) -> Option<R> {
        self.storage
            .remove(&TypeId::of::<R>())
            .and_then(|entry| entry.data.downcast::<R>().ok().map(|b| *b))
    }

    pub fn contains<R: Resource>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get or insert a resource built by `f`.
    pub fn get_or_insert_with<R: Resource>(&mut self, f: impl FnOnce() -> R) -> &mut R {
        let entry = self
            .storage
            .entry(TypeId::of::<R>())
            .or_insert_with(|| ResourceEntry {
                data: Box::new(f()),
                type_name: std::any::type_name::<R>(),
            });
        match entry.data.downcast_mut::<R>() {
            Some(resource) => resource,
            // keys are the TypeId of the boxed value
            None => unreachable!("resource stored under the wrong TypeId"),
        }
    }

    pub fn get_or_default<R: Resource + Default>(&mut self) -> &mut R {
        self.get_or_insert_with(R::default)
    }

    /// List all resource type names (for debugging).
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.storage.values().map(|entry| entry.type_name)
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("count", &self.storage.len())
            .field("types", &self.type_names().collect::<Vec<_>>())
            .finish()
    }
}
