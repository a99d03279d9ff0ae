//! Text plugin.

use lettera_ecs::{Schedule, World};
use lettera_text::{
    BuildTemplateCacheSystem, PublishTemplateCacheSystem, TemplateCaches, TextLayoutSystem,
    TextSettings,
};
use tracing::Level;

use super::AssetPlugin;
use crate::plugin::Plugin;

/// Plugin that provides mesh glyph text.
///
/// # Resources Provided
///
/// - `TemplateCaches` - per-font glyph template lookups
/// - `TextSettings` - defaults for new text objects
///
/// # Systems
///
/// Runs, in order, `publish_template_cache`, `build_template_cache` and
/// `text_layout` every update cycle. Publishing first means a cache staged
/// in one cycle is visible to layout in the next.
///
/// # Example
///
/// ```
/// use lettera::{AssetPlugin, EngineBuilder, TextPlugin};
/// use lettera::text::TextSettings;
///
/// let engine = EngineBuilder::new()
///     .add_plugin(TextPlugin::new().with_default_capacity(64))
///     .add_plugin(AssetPlugin)
///     .build();
///
/// let settings = engine.world().resource::<TextSettings>().unwrap();
/// assert_eq!(settings.default_capacity, 64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextPlugin {
    settings: TextSettings,
}

impl TextPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_leading(mut self, leading: f32) -> Self {
        self.settings.default_leading = leading;
        self
    }

    pub fn with_default_capacity(mut self, capacity: usize) -> Self {
        self.settings.default_capacity = capacity;
        self
    }

    /// Level for the one-time report of a font that cannot be resolved.
    pub fn with_unresolved_font_level(mut self, level: Level) -> Self {
        self.settings.unresolved_font_level = level;
        self
    }
}

impl Plugin for TextPlugin {
    type Dependencies = AssetPlugin;
    fn name(&self) -> &'static str {
        "TextPlugin"
    }

    fn build(&self, world: &mut World, schedule: &mut Schedule) {
        world.resource_or_default::<TemplateCaches>();
        world.insert_resource(self.settings.clone());

        schedule
            .add_system(PublishTemplateCacheSystem)
            .add_system(BuildTemplateCacheSystem::new())
            .add_system(TextLayoutSystem);
    }
}
