//! Built-in plugins.

mod asset_plugin;
mod text_plugin;

pub use asset_plugin::AssetPlugin;
pub use text_plugin::TextPlugin;

use crate::plugin::{PluginDyn, PluginGroup};

/// Asset storages plus mesh glyph text.
///
/// # Example
///
/// ```
/// use lettera::{DefaultPlugins, Engine};
///
/// let engine = Engine::builder().add_plugins(DefaultPlugins).build();
/// assert!(engine.has_plugin("TextPlugin"));
/// ```
pub struct DefaultPlugins;

impl PluginGroup for DefaultPlugins {
    fn plugins(&self) -> Vec<Box<dyn PluginDyn>> {
        vec![Box::new(AssetPlugin), Box::new(TextPlugin::default())]
    }

    fn name(&self) -> &'static str {
        "DefaultPlugins"
    }
}
