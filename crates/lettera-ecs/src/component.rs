use std::any::Any;

use crate::{Entity, World};

/// Data attached to an entity.
pub trait Component: Any + Send + Sync {}

/// One or more components inserted together.
///
/// Implemented for every [`Component`] and for tuples of bundles, so
/// `world.spawn((Transform::default(), Parent(owner)))` works.
pub trait Bundle: Send + 'static {
    fn insert_into(self, world: &mut World, entity: Entity);
}

impl<T> Bundle for T
where
    T: Component,
{
    fn insert_into(self, world: &mut World, entity: Entity) {
        world.insert_component(entity, self);
    }
}

impl Bundle for () {
    fn insert_into(self, _world: &mut World, _entity: Entity) {}
}

macro_rules! bundle_tuple_impl {
    ($($ty:ident),+) => {
        impl<$($ty),+> Bundle for ($($ty,)+)
        where
            $( $ty: Bundle ),+
        {
            #[allow(non_snake_case)]
            fn insert_into(self, world: &mut World, entity: Entity) {
                let ($($ty,)+) = self;
                $( $ty.insert_into(world, entity); )+
            }
        }
    };
}

bundle_tuple_impl!(T0);
bundle_tuple_impl!(T0, T1);
bundle_tuple_impl!(T0, T1, T2);
bundle_tuple_impl!(T0, T1, T2, T3);
bundle_tuple_impl!(T0, T1, T2, T3, T4);
bundle_tuple_impl!(T0, T1, T2, T3, T4, T5);
