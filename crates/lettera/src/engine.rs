//! Engine core - owns the world, the schedule and the caller-side command
//! buffer, and drives update cycles.

use lettera_core::alloc::{HashMap, HashSet};
use lettera_core::config::Config;
use lettera_core::profiling::{self, profile_function};
use lettera_ecs::{CommandBuffer, Resource, Schedule, World};

use crate::plugin::{Plugin, PluginDyn, PluginGroup};

/// The main engine struct.
///
/// # Example
///
/// ```
/// use lettera::{Engine, EngineBuilder, FnPlugin};
///
/// let mut engine = EngineBuilder::new()
///     .add_plugin(FnPlugin::new("count", |_world, schedule| {
///         schedule.add_fn_system("tick", |world, _| {
///             *world.resource_or_default::<u32>() += 1;
///         });
///     }))
///     .build();
///
/// engine.update();
/// engine.update();
/// assert_eq!(engine.world().resource::<u32>(), Some(&2));
/// assert_eq!(engine.cycle(), 2);
/// ```
pub struct Engine {
    world: World,
    schedule: Schedule,
    commands: CommandBuffer,
    plugin_names: HashSet<&'static str>,
    config: Config,
}

impl Engine {
    /// Create a new engine builder.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Run one update cycle.
    ///
    /// Commands recorded through [`Engine::commands`] since the last update
    /// are applied first, then every system runs, then the commands the
    /// systems recorded are applied.
    pub fn update(&mut self) {
        if self.config.profiling.is_enabled() {
            profiling::new_frame();
        }
        profile_function!();
        self.schedule.run_cycle(&mut self.world, &mut self.commands);
    }

    /// Caller-side command buffer, flushed at the start of the next update.
    pub fn commands(&mut self) -> &mut CommandBuffer {
        &mut self.commands
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// World and command buffer together, for APIs that read one and
    /// record into the other.
    pub fn world_and_commands(&mut self) -> (&World, &mut CommandBuffer) {
        (&self.world, &mut self.commands)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Number of completed update cycles.
    pub fn cycle(&self) -> u64 {
        self.schedule.cycle()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a plugin is registered.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugin_names.contains(name)
    }

    /// Get the names of all registered plugins.
    pub fn plugin_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugin_names.iter().copied()
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

/// Builder for constructing an Engine with plugins.
pub struct EngineBuilder {
    plugins: Vec<Box<dyn PluginDyn>>,
    world: World,
    config: Config,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            world: World::new(),
            config: Config::default(),
        }
    }

    /// Add a plugin to the engine.
    ///
    /// Plugins are built in the order they are added, with dependency
    /// ordering handled automatically.
    pub fn add_plugin(mut self, plugin: impl Plugin) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Add a plugin group (multiple plugins) to the engine.
    pub fn add_plugins(mut self, group: impl PluginGroup) -> Self {
        tracing::debug!("Adding plugin group: {}", group.name());
        self.plugins.extend(group.plugins());
        self
    }

    /// Insert a resource directly before building.
    pub fn insert_resource<R: Resource>(mut self, resource: R) -> Self {
        self.world.insert_resource(resource);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the engine, initializing all plugins.
    ///
    /// This will:
    /// 1. Sort plugins by dependencies
    /// 2. Call `build()` on each plugin
    /// 3. Call `finish()` on each plugin
    pub fn build(mut self) -> Engine {
        profiling::init_from_mode(self.config.profiling);

        let sorted_indices = self.sort_plugins_by_dependency_indices();
        let mut schedule = Schedule::new();
        let mut plugin_names = HashSet::new();

        for &idx in &sorted_indices {
            let plugin = &self.plugins[idx];
            tracing::debug!("Building plugin: {}", plugin.name());
            plugin.build(&mut self.world, &mut schedule);
            plugin_names.insert(plugin.name());
        }

        for &idx in &sorted_indices {
            self.plugins[idx].finish(&mut self.world);
        }

        self.world.insert_resource(self.config.clone());
        tracing::info!(
            "Engine built with {} plugins and {} systems",
            plugin_names.len(),
            schedule.len()
        );

        let commands = CommandBuffer::new(&self.world);
        Engine {
            world: self.world,
            schedule,
            commands,
            plugin_names,
            config: self.config,
        }
    }

    /// Topological sort over dependency type names, returning indices.
    ///
    /// A dependency that was never added is skipped with a warning.
    fn sort_plugins_by_dependency_indices(&self) -> Vec<usize> {
        let mut sorted = Vec::new();
        let mut visited = HashSet::new();
        let mut visiting = HashSet::new();

        let plugin_map: HashMap<&'static str, usize> = self
            .plugins
            .iter()
            .enumerate()
            .map(|(i, p)| (p.type_name(), i))
            .collect();

        fn visit(
            name: &'static str,
            plugins: &[Box<dyn PluginDyn>],
            plugin_map: &HashMap<&'static str, usize>,
            visited: &mut HashSet<&'static str>,
            visiting: &mut HashSet<&'static str>,
            sorted: &mut Vec<usize>,
        ) {
            if visited.contains(name) {
                return;
            }

            if visiting.contains(name) {
                tracing::warn!("Circular plugin dependency detected involving: {}", name);
                return;
            }

            let Some(&idx) = plugin_map.get(name) else {
                tracing::warn!("Plugin dependency {} was never added", name);
                return;
            };

            visiting.insert(name);
            for dep in plugins[idx].dependencies() {
                visit(dep, plugins, plugin_map, visited, visiting, sorted);
            }
            visiting.remove(name);
            visited.insert(name);
            sorted.push(idx);
        }

        for plugin in &self.plugins {
            visit(
                plugin.type_name(),
                &self.plugins,
                &plugin_map,
                &mut visited,
                &mut visiting,
                &mut sorted,
            );
        }

        sorted
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
