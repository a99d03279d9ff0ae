//! Read-only component queries.
//!
//! A query walks the storage of its first component in entity-index order
//! and joins the remaining components by entity, so the result order is
//! stable across cycles as long as no entity is spawned or despawned.

use crate::{Component, Entity, Storage, World};

/// An iterator over entities that own a fixed set of components.
pub trait Query<'a>: Sized + Iterator {
    fn fetch(world: &'a World) -> Self;
}

/// Single-component query; also the driver of the wider joins.
pub struct Query1<'a, T> {
    store: Option<&'a Storage<T>>,
    cursor: usize,
}

impl<'a, T: Component> Iterator for Query1<'a, T> {
    type Item = (Entity, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store?;
        while self.cursor < store.index_bound() {
            let index = self.cursor;
            self.cursor += 1;
            if let Some(item) = store.get_at(index) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = self
            .store
            .map_or(0, |store| store.index_bound().saturating_sub(self.cursor));
        (0, Some(upper))
    }
}

impl<'a, T: Component> Query<'a> for Query1<'a, T> {
    fn fetch(world: &'a World) -> Self {
        Self {
            store: world.storage::<T>(),
            cursor: 0,
        }
    }
}

macro_rules! join_query {
    ($name:ident; $first:ident, $($rest:ident),+) => {
        pub struct $name<'a, $first, $($rest),+> {
            driver: Query1<'a, $first>,
            stores: ($(Option<&'a Storage<$rest>>,)+),
        }

        impl<'a, $first: Component, $($rest: Component),+> Iterator for $name<'a, $first, $($rest),+> {
            type Item = (Entity, &'a $first, $(&'a $rest),+);

            #[allow(non_snake_case)]
            fn next(&mut self) -> Option<Self::Item> {
                let ($($rest,)+) = self.stores;
                $(let $rest = $rest?;)+
                for (ent, head) in self.driver.by_ref() {
                    if let ($(Some($rest),)+) = ($($rest.get(ent),)+) {
                        return Some((ent, head, $($rest),+));
                    }
                }
                None
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.driver.size_hint()
            }
        }

        impl<'a, $first: Component, $($rest: Component),+> Query<'a> for $name<'a, $first, $($rest),+> {
            fn fetch(world: &'a World) -> Self {
                Self {
                    driver: Query1::fetch(world),
                    stores: ($(world.storage::<$rest>(),)+),
                }
            }
        }
    };
}

join_query!(Query2; A, B);
join_query!(Query3; A, B, C);
join_query!(Query4; A, B, C, D);

/// Maps a component type, or a tuple of them, to its [`Query`].
pub trait QueryDef<'a> {
    type Query: Query<'a>;
    fn make(world: &'a World) -> Self::Query;
}

macro_rules! query_def {
    ($name:ident, $($ty:ident),+) => {
        impl<'a, $($ty: Component),+> QueryDef<'a> for ($($ty,)+) {
            type Query = $name<'a, $($ty),+>;
            fn make(world: &'a World) -> Self::Query {
                $name::fetch(world)
            }
        }
    };
}

query_def!(Query1, A);
query_def!(Query2, A, B);
query_def!(Query3, A, B, C);
query_def!(Query4, A, B, C, D);

impl<'a, T: Component> QueryDef<'a> for T {
    type Query = Query1<'a, T>;

    fn make(world: &'a World) -> Self::Query {
        Query1::fetch(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Glyph(char);
    impl Component for Glyph {}

    #[derive(Debug, PartialEq)]
    struct Advance(f32);
    impl Component for Advance {}

    #[test]
    fn test_join_skips_partial_entities() {
        let mut world = World::new();
        let a = world.spawn((Glyph('a'), Advance(1.0)));
        world.spawn(Glyph('b'));
        let c = world.spawn((Glyph('c'), Advance(3.0)));
        world.spawn(Advance(4.0));

        let joined: Vec<_> = world
            .query::<(Glyph, Advance)>()
            .map(|(ent, g, adv)| (ent, g.0, adv.0))
            .collect();
        assert_eq!(joined, vec![(a, 'a', 1.0), (c, 'c', 3.0)]);
    }

    #[test]
    fn test_missing_storage_yields_nothing() {
        let mut world = World::new();
        world.spawn(Glyph('x'));

        assert_eq!(world.query::<(Glyph, Advance)>().count(), 0);
        assert_eq!(world.query::<Advance>().size_hint(), (0, Some(0)));
    }
}
