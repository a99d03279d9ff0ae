use std::any::TypeId;

use lettera_core::alloc::HashMap;
use lettera_core::profiling::profile_function;

use crate::storage::ErasedStorage;
use crate::{
    Bundle, Component, Entities, Entity, EntityReserver, QueryDef, Resource, Resources, Storage,
};

/// Entities, their components and the world's resources.
///
/// Structural changes made directly on the world take effect immediately.
/// Systems record them on a [`CommandBuffer`](crate::CommandBuffer) instead.
#[derive(Default)]
pub struct World {
    entities: Entities,
    storages: HashMap<TypeId, Box<dyn ErasedStorage>>,
    resources: Resources,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity with `bundle` immediately.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Entity {
        profile_function!();
        let ent = self.entities.alloc();
        bundle.insert_into(self, ent);
        ent
    }

    pub fn spawn_empty(&mut self) -> Entity {
        self.entities.alloc()
    }

    /// Bring a reserved entity to life and attach `bundle`.
    pub(crate) fn materialize<B: Bundle>(&mut self, ent: Entity, bundle: B) -> bool {
        if !self.entities.materialize(ent) {
            return false;
        }
        bundle.insert_into(self, ent);
        true
    }

    /// Despawn `ent` and drop all of its components.
    pub fn despawn(&mut self, ent: Entity) -> bool {
        profile_function!();
        if !self.entities.free(ent) {
            return false;
        }
        for storage in self.storages.values_mut() {
            storage.remove_entity(ent);
        }
        true
    }

    pub fn is_alive(&self, ent: Entity) -> bool {
        self.entities.contains(ent)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn reserver(&self) -> EntityReserver {
        self.entities.reserver()
    }

    /// Attach `bundle` to a live entity. Returns `false` if `ent` is dead.
    pub fn insert<B: Bundle>(&mut self, ent: Entity, bundle: B) -> bool {
        if !self.is_alive(ent) {
            tracing::warn!("insert on dead entity {ent:?} ignored");
            return false;
        }
        bundle.insert_into(self, ent);
        true
    }

    pub(crate) fn insert_component<T: Component>(&mut self, ent: Entity, comp: T) {
        profile_function!();
        self.storage_or_create::<T>().insert(ent, comp);
    }

    pub fn remove<T: Component>(&mut self, ent: Entity) -> Option<T> {
        profile_function!();
        self.storage_mut::<T>()?.remove(ent)
    }

    pub fn get<T: Component>(&self, ent: Entity) -> Option<&T> {
        self.storage::<T>()?.get(ent)
    }

    pub fn get_mut<T: Component>(&mut self, ent: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(ent)
    }

    pub fn has<T: Component>(&self, ent: Entity) -> bool {
        self.get::<T>(ent).is_some()
    }

    pub fn query<'a, Q>(&'a self) -> <Q as QueryDef<'a>>::Query
    where
        Q: QueryDef<'a>,
    {
        profile_function!();
        Q::make(self)
    }

    /// Mutable iteration over a single component type.
    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.storage_mut::<T>().into_iter().flat_map(|s| s.iter_mut())
    }

    pub fn storage<T: Component>(&self) -> Option<&Storage<T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<Storage<T>>()
    }

    pub fn storage_mut<T: Component>(&mut self) -> Option<&mut Storage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<Storage<T>>()
    }

    fn storage_or_create<T: Component>(&mut self) -> &mut Storage<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Storage::<T>::new()));
        match storage.as_any_mut().downcast_mut::<Storage<T>>() {
            Some(storage) => storage,
            None => unreachable!("component storage keyed by the wrong TypeId"),
        }
    }

    pub fn insert_resource<R: Resource>(&mut self, resource: R) -> Option<R> {
        self.resources.insert(resource)
    }

    pub fn resource<R: Resource>(&self) -> Option<&R> {
        self.resources.get()
    }

    pub fn resource_mut<R: Resource>(&mut self) -> Option<&mut R> {
        self.resources.get_mut()
    }

    pub fn remove_resource<R: Resource>(&mut self) -> Option<R> {
        self.resources.remove()
    }

    pub fn resource_or_default<R: Resource + Default>(&mut self) -> &mut R {
        self.resources.get_or_default()
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("storages", &self.storages.len())
            .field("resources", &self.resources)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Eq)]
    struct C1(u32);
    impl Component for C1 {}

    #[derive(Debug, Default, PartialEq, Eq)]
    struct C2(u32);
    impl Component for C2 {}

    #[test]
    fn test_spawn1() {
        let mut world = World::new();

        let e0 = world.spawn(C1(13));
        let e1 = world.spawn((C2(11),));
        let res0: Vec<_> = world.query::<C1>().collect();
        assert_eq!(res0, vec![(e0, &C1(13))]);

        let res1: Vec<_> = world.query::<C2>().collect();
        assert_eq!(res1, vec![(e1, &C2(11))]);
    }

    #[test]
    fn test_query1() {
        let mut world = World::new();

        let e0 = world.spawn_empty();
        let _e1 = world.spawn_empty();
        let e2 = world.spawn_empty();

        world.insert(e0, C1(10));
        world.insert(e2, C1(30));

        let results: Vec<_> = world.query::<C1>().collect();
        assert_eq!(results, vec![(e0, &C1(10)), (e2, &C1(30))]);
    }

    #[test]
    fn test_query2() {
        let mut world = World::new();

        world.spawn(C1(10));
        let e1 = world.spawn((C1(11), C2(20)));
        let e2 = world.spawn((C1(12), C2(21)));
        world.spawn(C2(22));

        let results: Vec<_> = world.query::<(C1, C2)>().collect();
        assert_eq!(
            results,
            vec![(e1, &C1(11), &C2(20)), (e2, &C1(12), &C2(21))]
        )
    }

    #[test]
    fn test_despawn_strips_components() {
        let mut world = World::new();
        let ent = world.spawn((C1(1), C2(2)));

        assert!(world.despawn(ent));
        assert!(!world.is_alive(ent));
        assert_eq!(world.get::<C1>(ent), None);
        assert_eq!(world.query::<C2>().count(), 0);
        assert!(!world.despawn(ent));
    }

    #[test]
    fn test_recycled_entity_does_not_see_old_components() {
        let mut world = World::new();
        let old = world.spawn(C1(1));
        world.despawn(old);

        let new = world.spawn_empty();
        assert_eq!(old.index(), new.index());
        assert!(!world.has::<C1>(new));
    }

    #[test]
    fn test_insert_on_dead_entity_is_rejected() {
        let mut world = World::new();
        let ent = world.spawn_empty();
        world.despawn(ent);
        assert!(!world.insert(ent, C1(5)));
    }

    #[test]
    fn test_query_mut() {
        let mut world = World::new();
        world.spawn(C1(1));
        world.spawn(C1(2));

        for (_, c) in world.query_mut::<C1>() {
            c.0 *= 10;
        }
        let mut values: Vec<_> = world.query::<C1>().map(|(_, c)| c.0).collect();
        values.sort();
        assert_eq!(values, vec![10, 20]);
    }
}
