//! The per-cycle text systems, registered in this order:
//!
//! 1. [`PublishTemplateCacheSystem`] turns last cycle's staging lists into
//!    ready lookups.
//! 2. [`BuildTemplateCacheSystem`] schedules template spawns for fonts that
//!    have no cache yet.
//! 3. [`TextLayoutSystem`] lays out resolved, dirty text objects.

use std::sync::Arc;

use lettera_assets::{Assets, Handle, LoadState};
use lettera_core::alloc::HashSet;
use lettera_core::profiling::profile_function;
use lettera_ecs::{CommandBuffer, Entity, System, World};

use crate::cache::{CacheState, GlyphLookup, TemplateCaches};
use crate::font::{FontAsset, GlyphMetrics};
use crate::settings::TextSettings;
use crate::template::{GlyphTemplate, GlyphVisual, Prefab, SpecialCharacter};
use crate::text::{TextObject, layout_text};

fn mark_resolved(world: &mut World, font: Handle<FontAsset>) -> usize {
    let mut resolved = 0;
    for (_, text) in world.query_mut::<TextObject>() {
        if text.font() == font && !text.resolved {
            text.resolved = true;
            text.dirty = true;
            resolved += 1;
        }
    }
    resolved
}

/// Converts staging template lists into ready lookups.
///
/// Staging lists are written by commands applied at the end of the previous
/// cycle, so every entity in them is materialized by the time this runs.
#[derive(Debug, Default)]
pub struct PublishTemplateCacheSystem;

impl System for PublishTemplateCacheSystem {
    fn name(&self) -> &'static str {
        "publish_template_cache"
    }

    fn run(&mut self, world: &mut World, _commands: &mut CommandBuffer) {
        profile_function!();
        let Some(caches) = world.resource_mut::<TemplateCaches>() else {
            return;
        };
        let staged = caches.take_staged();

        for (font, templates) in staged {
            let lookup: GlyphLookup = templates
                .into_iter()
                .filter(|(character, template)| {
                    let alive = world.is_alive(*template);
                    if !alive {
                        tracing::warn!("staged template {template:?} for {character:?} is gone");
                    }
                    alive
                })
                .collect();

            let len = lookup.len();
            if let Some(caches) = world.resource_mut::<TemplateCaches>() {
                caches.publish(font, lookup);
            }
            let waiting = mark_resolved(world, font);
            tracing::debug!(
                "published {len} glyph templates for {font:?}, {waiting} text objects resolved"
            );
        }
    }
}

/// Schedules one template build per font asset that has no cache yet.
#[derive(Debug, Default)]
pub struct BuildTemplateCacheSystem {
    /// Fonts already scheduled in the current pass.
    requested: HashSet<Handle<FontAsset>>,
    /// Fonts whose missing asset has been reported.
    reported: HashSet<Handle<FontAsset>>,
}

impl BuildTemplateCacheSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl System for BuildTemplateCacheSystem {
    fn name(&self) -> &'static str {
        "build_template_cache"
    }

    fn run(&mut self, world: &mut World, commands: &mut CommandBuffer) {
        profile_function!();
        self.requested.clear();

        let pending: Vec<(Entity, Handle<FontAsset>)> = world
            .query::<TextObject>()
            .filter(|(_, text)| !text.is_resolved())
            .map(|(entity, text)| (entity, text.font()))
            .collect();
        if pending.is_empty() {
            return;
        }

        for (entity, font) in pending {
            let state = world
                .resource::<TemplateCaches>()
                .map_or(CacheState::Unbuilt, |caches| caches.state(&font));
            match state {
                CacheState::Ready => {
                    if let Some(text) = world.get_mut::<TextObject>(entity) {
                        text.resolved = true;
                        text.dirty = true;
                    }
                }
                CacheState::Staging => {}
                CacheState::Unbuilt => {
                    if !self.requested.insert(font) {
                        continue;
                    }
                    let fonts = world.resource::<Assets<FontAsset>>();
                    let asset = fonts.and_then(|assets| assets.get(&font)).cloned();
                    let Some(asset) = asset else {
                        if self.reported.insert(font) {
                            let state = fonts.map_or(LoadState::Reserved, |a| a.load_state(&font));
                            let reason = fonts
                                .and_then(|a| a.failure(&font))
                                .map(|err| format!(": {err}"))
                                .unwrap_or_default();
                            let settings = world.resource::<TextSettings>().cloned().unwrap_or_default();
                            settings.report_unresolved(format_args!(
                                "font asset {font:?} is {state}{reason}, text {entity:?} stays unresolved"
                            ));
                        }
                        continue;
                    };
                    self.reported.remove(&font);
                    let count = stage_templates(commands, font, &asset);
                    tracing::debug!("scheduled {count} glyph templates for font '{}'", asset.name());
                }
            }
        }
    }
}

/// Record one template spawn per distinct character plus the synthetic
/// newline template, then a command that stages them. Returns the number of
/// templates recorded.
fn stage_templates(
    commands: &mut CommandBuffer,
    font: Handle<FontAsset>,
    asset: &Arc<FontAsset>,
) -> usize {
    profile_function!();
    let material = asset.material();
    let mut seen = HashSet::with_capacity(asset.characters().len());
    let mut templates = Vec::with_capacity(asset.characters().len() + 1);

    for info in asset.characters() {
        if info.character == '\n' {
            tracing::warn!(
                "font '{}' maps '\\n' explicitly, using the synthetic newline template",
                asset.name()
            );
            continue;
        }
        if !seen.insert(info.character) {
            tracing::warn!(
                "font '{}' lists {:?} more than once, keeping the first",
                asset.name(),
                info.character
            );
            continue;
        }
        let template = commands.spawn((
            GlyphTemplate {
                font,
                character: info.character,
            },
            info.metrics,
            GlyphVisual {
                mesh: Some(info.mesh),
                material,
            },
            SpecialCharacter { newline: false },
            Prefab,
        ));
        templates.push((info.character, template));
    }

    let newline = commands.spawn((
        GlyphTemplate {
            font,
            character: '\n',
        },
        GlyphMetrics::default(),
        GlyphVisual {
            mesh: None,
            material,
        },
        SpecialCharacter { newline: true },
        Prefab,
    ));
    templates.push(('\n', newline));

    let count = templates.len();
    commands.add(move |world| {
        let staged = world
            .resource_or_default::<TemplateCaches>()
            .stage(font, templates);
        if let Err(rejected) = staged {
            for (_, template) in rejected {
                world.despawn(template);
            }
        }
    });
    count
}

/// Lays out every resolved text object whose content changed.
#[derive(Debug, Default)]
pub struct TextLayoutSystem;

impl System for TextLayoutSystem {
    fn name(&self) -> &'static str {
        "text_layout"
    }

    fn run(&mut self, world: &mut World, _commands: &mut CommandBuffer) {
        profile_function!();
        let dirty: Vec<Entity> = world
            .query::<TextObject>()
            .filter(|(_, text)| text.is_resolved() && text.is_dirty())
            .map(|(entity, _)| entity)
            .collect();

        for entity in dirty {
            if let Err(err) = layout_text(world, entity) {
                tracing::error!("text layout failed for {entity:?}: {err}");
                if let Some(text) = world.get_mut::<TextObject>(entity) {
                    text.dirty = false;
                    text.last_error = Some(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::render::{Material, Mesh};
    use lettera_core::math::Vec2;

    #[test]
    fn test_second_build_in_one_flush_despawns_its_templates() {
        let mut world = World::new();
        let mut meshes = Assets::new();
        let mut materials = Assets::new();
        let mut fonts = Assets::new();
        let quad = meshes.insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));
        let material = materials.insert("glyphs", Material::new("glyphs"));
        let font = fonts.insert(
            "mono",
            FontAsset::new("mono", material, FontMetrics::default())
                .with_character('a', quad, GlyphMetrics::from_advance(1.0))
                .with_character('b', quad, GlyphMetrics::from_advance(1.0)),
        );
        let asset = Arc::clone(fonts.get(&font).unwrap());

        let mut commands = CommandBuffer::new(&world);
        assert_eq!(stage_templates(&mut commands, font, &asset), 3);
        assert_eq!(stage_templates(&mut commands, font, &asset), 3);
        commands.apply(&mut world);

        let caches = world.resource::<TemplateCaches>().unwrap();
        assert_eq!(caches.state(&font), CacheState::Staging);
        assert_eq!(caches.template_count(&font), 3);
        assert_eq!(world.query::<GlyphTemplate>().count(), 3);
    }
}
