//! Lettera ECS
//!
//! A small retained-mode entity/component world:
//!
//! - [`World`] owns entities, per-type component [`Storage`] and [`Resources`]
//! - [`CommandBuffer`] records structural changes (spawn, despawn, insert,
//!   remove) so they can be applied atomically at a synchronization boundary
//! - [`Schedule`] runs [`System`]s in order, one update cycle at a time, and
//!   flushes recorded commands between cycles
//!
//! ```
//! use lettera_ecs::{CommandBuffer, Component, Schedule, World};
//!
//! struct Counter(u32);
//! impl Component for Counter {}
//!
//! let mut world = World::new();
//! let mut commands = CommandBuffer::new(&world);
//! let mut schedule = Schedule::new();
//! schedule.add_fn_system("spawn_counter", |world, commands| {
//!     if world.query::<Counter>().next().is_none() {
//!         commands.spawn(Counter(0));
//!     }
//! });
//!
//! schedule.run_cycle(&mut world, &mut commands);
//! assert_eq!(world.query::<Counter>().count(), 1);
//! ```

mod commands;
mod component;
mod entity;
mod query;
mod resource;
mod schedule;
mod storage;
mod transform;
mod world;

pub use commands::CommandBuffer;
pub use component::{Bundle, Component};
pub use entity::{Entities, Entity, EntityReserver};
pub use query::{Query, Query1, Query2, Query3, Query4, QueryDef};
pub use resource::{Resource, Resources};
pub use schedule::{FnSystem, Schedule, System};
pub use storage::Storage;
pub use transform::{Parent, Transform};
pub use world::World;
