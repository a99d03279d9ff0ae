use lettera_core::profiling::profile_function;

use crate::{Bundle, Component, Entity, EntityReserver, World};

type BundleFn = Box<dyn FnOnce(&mut World, Entity) + Send>;
type CustomFn = Box<dyn FnOnce(&mut World) + Send>;

enum Command {
    Spawn { entity: Entity, bundle: BundleFn },
    Insert { entity: Entity, bundle: BundleFn },
    Remove { entity: Entity, remove: CustomFn },
    Despawn(Entity),
    Custom(CustomFn),
}

/// Deferred structural changes.
///
/// Systems record spawns, despawns and component changes here while they
/// iterate the world. Nothing is visible until [`CommandBuffer::apply`]
/// runs, which replays every command in recording order.
pub struct CommandBuffer {
    reserver: EntityReserver,
    queue: Vec<Command>,
}

impl CommandBuffer {
    pub fn new(world: &World) -> Self {
        Self {
            reserver: world.reserver(),
            queue: Vec::new(),
        }
    }

    /// Record a spawn. The returned entity is usable in later commands
    /// but is not alive until the buffer is applied.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Entity {
        let entity = self.reserver.reserve();
        self.queue.push(Command::Spawn {
            entity,
            bundle: Box::new(move |world, ent| bundle.insert_into(world, ent)),
        });
        entity
    }

    pub fn spawn_empty(&mut self) -> Entity {
        self.spawn(())
    }

    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) {
        self.queue.push(Command::Insert {
            entity,
            bundle: Box::new(move |world, ent| bundle.insert_into(world, ent)),
        });
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) {
        self.queue.push(Command::Remove {
            entity,
            remove: Box::new(move |world| {
                world.remove::<T>(entity);
            }),
        });
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.queue.push(Command::Despawn(entity));
    }

    /// Record an arbitrary world mutation.
    pub fn add(&mut self, command: impl FnOnce(&mut World) + Send + 'static) {
        self.queue.push(Command::Custom(Box::new(command)));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Replay all recorded commands against `world`, in order.
    ///
    /// Commands targeting an entity that is no longer alive are skipped
    /// with a warning. Returns the number of commands applied.
    pub fn apply(&mut self, world: &mut World) -> usize {
        profile_function!();
        let mut applied = 0;
        for command in self.queue.drain(..) {
            let ok = match command {
                Command::Spawn { entity, bundle } => {
                    let ok = world.materialize(entity, ());
                    if ok {
                        bundle(world, entity);
                    }
                    ok
                }
                Command::Insert { entity, bundle } => {
                    let ok = world.is_alive(entity);
                    if ok {
                        bundle(world, entity);
                    }
                    ok
                }
                Command::Remove { entity, remove } => {
                    let ok = world.is_alive(entity);
                    if ok {
                        remove(world);
                    }
                    ok
                }
                Command::Despawn(entity) => world.despawn(entity),
                Command::Custom(command) => {
                    command(world);
                    true
                }
            };
            if ok {
                applied += 1;
            } else {
                tracing::warn!("skipped deferred command: target entity is not alive");
            }
        }
        applied
    }
}

impl std::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBuffer")
            .field("queued", &self.queue.len())
            .finish()
    }
}
