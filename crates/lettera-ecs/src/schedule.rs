use lettera_core::profiling::{profile_function, profile_scope};

use crate::{CommandBuffer, World};

/// A unit of per-cycle work.
pub trait System: Send {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn run(&mut self, world: &mut World, commands: &mut CommandBuffer);
}

/// A [`System`] backed by a closure.
pub struct FnSystem<F> {
    name: &'static str,
    func: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(&mut World, &mut CommandBuffer) + Send,
{
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(&mut World, &mut CommandBuffer) + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&mut self, world: &mut World, commands: &mut CommandBuffer) {
        (self.func)(world, commands)
    }
}

/// Ordered list of systems forming one update cycle.
///
/// Commands recorded during a cycle are applied at its end, so they are
/// visible to every system in the next cycle and to nothing in this one.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
    cycle: u64,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_system(&mut self, system: impl System + 'static) -> &mut Self {
        tracing::debug!("registered system {}", system.name());
        self.systems.push(Box::new(system));
        self
    }

    pub fn add_fn_system(
        &mut self,
        name: &'static str,
        func: impl FnMut(&mut World, &mut CommandBuffer) + Send + 'static,
    ) -> &mut Self {
        self.add_system(FnSystem::new(name, func))
    }

    /// Run one update cycle.
    ///
    /// Anything recorded outside the schedule since the last cycle is applied
    /// first, then each system runs in registration order, then the buffer
    /// is flushed again.
    pub fn run_cycle(&mut self, world: &mut World, commands: &mut CommandBuffer) {
        profile_function!();
        commands.apply(world);

        for system in &mut self.systems {
            let name = system.name();
            profile_scope!("system", name);
            let _span = tracing::debug_span!("system", system = name).entered();
            system.run(world, commands);
        }

        let applied = commands.apply(world);
        if applied > 0 {
            tracing::trace!("cycle {} applied {} deferred commands", self.cycle, applied);
        }
        self.cycle += 1;
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn system_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
