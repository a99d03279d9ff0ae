//! Plugin system for extending engine functionality.
//!
//! Plugins are the primary way to add features to the engine. Each plugin
//! can insert resources into the world, register systems on the schedule,
//! and declare the plugins it depends on.

use std::any::type_name;

use lettera_ecs::{Schedule, World};

/// A type-level list of plugins, used for `Plugin::Dependencies`.
///
/// Implemented for plugin types and tuples of plugin types.
pub trait PluginSet {
    /// Returns the type names of all plugins in this set.
    fn names() -> Vec<&'static str>;
}

/// Empty dependency set (no dependencies).
impl PluginSet for () {
    fn names() -> Vec<&'static str> {
        vec![]
    }
}

/// Single plugin dependency.
impl<P: Plugin> PluginSet for P {
    fn names() -> Vec<&'static str> {
        vec![type_name::<P>()]
    }
}

impl<P1: Plugin, P2: Plugin> PluginSet for (P1, P2) {
    fn names() -> Vec<&'static str> {
        vec![type_name::<P1>(), type_name::<P2>()]
    }
}

impl<P1: Plugin, P2: Plugin, P3: Plugin> PluginSet for (P1, P2, P3) {
    fn names() -> Vec<&'static str> {
        vec![type_name::<P1>(), type_name::<P2>(), type_name::<P3>()]
    }
}

/// Object-safe plugin trait for runtime plugin management.
///
/// Automatically implemented for all types that implement [`Plugin`].
pub trait PluginDyn: Send + Sync {
    fn name(&self) -> &'static str;

    /// Type name, used to match dependencies.
    fn type_name(&self) -> &'static str;

    /// Type names of the plugins this plugin depends on.
    fn dependencies(&self) -> Vec<&'static str>;

    fn build(&self, world: &mut World, schedule: &mut Schedule);

    fn finish(&self, world: &mut World);
}

/// Trait for engine plugins with compile-time type-safe dependencies.
///
/// # Example
///
/// ```
/// use lettera::{EngineBuilder, Plugin};
/// use lettera::ecs::{Schedule, World};
///
/// struct Greeting(&'static str);
///
/// struct GreetingPlugin;
///
/// impl Plugin for GreetingPlugin {
///     type Dependencies = ();
///
///     fn build(&self, world: &mut World, _schedule: &mut Schedule) {
///         world.insert_resource(Greeting("hello"));
///     }
/// }
///
/// let engine = EngineBuilder::new().add_plugin(GreetingPlugin).build();
/// assert_eq!(engine.world().resource::<Greeting>().map(|g| g.0), Some("hello"));
/// ```
///
/// Dependencies are declared as a type, e.g. `type Dependencies = AssetPlugin;`
/// or `type Dependencies = (AssetPlugin, TextPlugin);`, and are always built
/// first regardless of insertion order.
pub trait Plugin: Send + Sync + 'static {
    /// `()` for no dependencies, `P` for one, `(P1, P2)` for two, etc.
    type Dependencies: PluginSet;

    /// Returns the name of this plugin, used in logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }

    /// Called when the engine is built. Insert resources and register
    /// systems here.
    fn build(&self, world: &mut World, schedule: &mut Schedule);

    /// Called after every plugin has been built.
    #[allow(unused_variables)]
    fn finish(&self, world: &mut World) {}
}

impl<P: Plugin> PluginDyn for P {
    fn name(&self) -> &'static str {
        <Self as Plugin>::name(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<P>()
    }

    fn dependencies(&self) -> Vec<&'static str> {
        P::Dependencies::names()
    }

    fn build(&self, world: &mut World, schedule: &mut Schedule) {
        <Self as Plugin>::build(self, world, schedule)
    }

    fn finish(&self, world: &mut World) {
        <Self as Plugin>::finish(self, world)
    }
}

/// A plugin group that bundles multiple plugins together.
pub trait PluginGroup {
    fn plugins(&self) -> Vec<Box<dyn PluginDyn>>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A function-based plugin for simple use cases.
///
/// # Example
///
/// ```
/// use lettera::{EngineBuilder, FnPlugin};
///
/// let engine = EngineBuilder::new()
///     .add_plugin(FnPlugin::new("setup", |world, _schedule| {
///         world.insert_resource(42i32);
///     }))
///     .build();
/// assert_eq!(engine.world().resource::<i32>(), Some(&42));
/// ```
pub struct FnPlugin<F>
where
    F: Fn(&mut World, &mut Schedule) + Send + Sync + 'static,
{
    name: &'static str,
    build_fn: F,
}

impl<F> FnPlugin<F>
where
    F: Fn(&mut World, &mut Schedule) + Send + Sync + 'static,
{
    pub fn new(name: &'static str, build_fn: F) -> Self {
        Self { name, build_fn }
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut World, &mut Schedule) + Send + Sync + 'static,
{
    type Dependencies = ();

    fn name(&self) -> &'static str {
        self.name
    }

    fn build(&self, world: &mut World, schedule: &mut Schedule) {
        (self.build_fn)(world, schedule);
    }
}
