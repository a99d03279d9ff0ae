//! Text objects and their glyph pools.
//!
//! A text object owns a fixed number of glyph slot entities, spawned with it
//! and parented to it. Layout reassigns slots in index order; slots past the
//! end of the text are hidden, never despawned.

use lettera_assets::{Assets, Handle};
use lettera_core::geometry::Container;
use lettera_core::math::Vec3;
use lettera_core::profiling::{profile_function, profile_scope};
use lettera_ecs::{CommandBuffer, Component, Entity, Parent, Transform, World};

use crate::cache::TemplateCaches;
use crate::error::{TextError, TextResult};
use crate::font::{FontAsset, GlyphMetrics};
use crate::layout::{GlyphPlacement, GlyphSource, TextBounds, layout_glyphs};
use crate::render::{Material, Mesh};
use crate::template::GlyphVisual;

/// The public text entity.
#[derive(Debug, Clone)]
pub struct TextObject {
    text: String,
    container: Container,
    leading: f32,
    font: Handle<FontAsset>,
    pool: Vec<Entity>,
    pub(crate) resolved: bool,
    pub(crate) dirty: bool,
    pub(crate) last_error: Option<TextError>,
    pub(crate) bounds: Option<TextBounds>,
}

impl Component for TextObject {}

impl TextObject {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn leading(&self) -> f32 {
        self.leading
    }

    pub fn font(&self) -> Handle<FontAsset> {
        self.font
    }

    /// Glyph slot entities, in layout order.
    pub fn pool(&self) -> &[Entity] {
        &self.pool
    }

    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    /// Whether the font's template cache has been resolved for this object.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The error from the most recent layout attempt, if it failed.
    pub fn last_error(&self) -> Option<&TextError> {
        self.last_error.as_ref()
    }

    /// Bounds measured by the last successful layout.
    pub fn bounds(&self) -> Option<TextBounds> {
        self.bounds
    }
}

/// One slot of a text object's glyph pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    pub owner: Entity,
    pub slot: usize,
    pub character: Option<char>,
    pub template: Option<Entity>,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Option<Handle<Material>>,
    pub metrics: GlyphMetrics,
    pub visible: bool,
    pub newline: bool,
}

impl Component for GlyphInstance {}

impl GlyphInstance {
    fn hidden(owner: Entity, slot: usize) -> Self {
        Self {
            owner,
            slot,
            character: None,
            template: None,
            mesh: None,
            material: None,
            metrics: GlyphMetrics::default(),
            visible: false,
            newline: false,
        }
    }

    /// Whether the renderer should draw this slot.
    pub fn is_drawing(&self) -> bool {
        self.visible && !self.newline && self.mesh.is_some() && self.material.is_some()
    }

    fn assign(&mut self, placement: &GlyphPlacement) {
        let source = placement.source;
        self.character = Some(placement.character);
        self.template = source.map(|s| s.template);
        self.mesh = if placement.newline {
            None
        } else {
            source.and_then(|s| s.mesh)
        };
        self.material = source.map(|s| s.material);
        self.metrics = source.map(|s| s.metrics).unwrap_or_default();
        self.newline = placement.newline;
        self.visible = placement.is_drawing();
    }

    fn hide(&mut self) {
        *self = Self::hidden(self.owner, self.slot);
    }
}

/// Parameters for [`spawn_text`].
#[derive(Debug, Clone)]
pub struct TextDescriptor {
    pub text: String,
    pub container: Container,
    pub font: Handle<FontAsset>,
    pub capacity: usize,
    pub leading: f32,
}

impl TextDescriptor {
    pub const DEFAULT_CAPACITY: usize = 32;
    pub const DEFAULT_LEADING: f32 = 1.0;

    pub fn new(text: impl Into<String>, font: Handle<FontAsset>) -> Self {
        Self {
            text: text.into(),
            container: Container::default(),
            font,
            capacity: Self::DEFAULT_CAPACITY,
            leading: Self::DEFAULT_LEADING,
        }
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

fn check_capacity(text: &str, capacity: usize) -> TextResult<()> {
    let len = text.chars().count();
    if len > capacity {
        return Err(TextError::CapacityOverrun { len, capacity });
    }
    Ok(())
}

fn baked_transform(container: &Container) -> Transform {
    let origin = container.top_left();
    Transform::from_xy(origin.x, origin.y)
}

/// Record a new text object and its glyph pool.
///
/// Nothing exists until `commands` is applied. The text object's transform
/// is baked from the container pivot now; later container edits go through
/// [`set_container`].
pub fn spawn_text(commands: &mut CommandBuffer, desc: TextDescriptor) -> TextResult<Entity> {
    profile_function!();
    check_capacity(&desc.text, desc.capacity)?;

    let owner = commands.spawn_empty();
    let pool: Vec<Entity> = (0..desc.capacity)
        .map(|slot| {
            commands.spawn((
                GlyphInstance::hidden(owner, slot),
                Transform::default(),
                Parent(owner),
            ))
        })
        .collect();

    tracing::debug!(
        "spawning text {owner:?} with {} glyph slots for {:?}",
        pool.len(),
        desc.font
    );

    let transform = baked_transform(&desc.container);
    commands.insert(
        owner,
        (
            TextObject {
                text: desc.text,
                container: desc.container,
                leading: desc.leading,
                font: desc.font,
                pool,
                resolved: false,
                dirty: true,
                last_error: None,
                bounds: None,
            },
            transform,
        ),
    );
    Ok(owner)
}

fn text_object_mut(world: &mut World, entity: Entity) -> TextResult<&mut TextObject> {
    world
        .get_mut::<TextObject>(entity)
        .ok_or(TextError::NotATextObject)
}

/// Replace the text. Fails without changing anything if it does not fit
/// the pool.
pub fn set_text(world: &mut World, entity: Entity, text: impl Into<String>) -> TextResult<()> {
    let text = text.into();
    let object = text_object_mut(world, entity)?;
    check_capacity(&text, object.capacity())?;
    if object.text != text {
        object.text = text;
        object.dirty = true;
    }
    Ok(())
}

pub fn set_leading(world: &mut World, entity: Entity, leading: f32) -> TextResult<()> {
    let object = text_object_mut(world, entity)?;
    if object.leading != leading {
        object.leading = leading;
        object.dirty = true;
    }
    Ok(())
}

/// Replace the container and re-bake the pivot translation.
pub fn set_container(world: &mut World, entity: Entity, container: Container) -> TextResult<()> {
    let object = text_object_mut(world, entity)?;
    object.container = container;
    let baked = baked_transform(&container);
    if let Some(transform) = world.get_mut::<Transform>(entity) {
        transform.translation.x = baked.translation.x;
        transform.translation.y = baked.translation.y;
    }
    Ok(())
}

/// Record the despawn of a text object and every slot of its pool.
pub fn despawn_text(world: &World, commands: &mut CommandBuffer, entity: Entity) -> TextResult<()> {
    let object = world
        .get::<TextObject>(entity)
        .ok_or(TextError::NotATextObject)?;
    for slot in object.pool() {
        commands.despawn(*slot);
    }
    commands.despawn(entity);
    Ok(())
}

/// Lay out a text object now, regardless of its dirty flag.
///
/// On success every pool slot is rewritten in place and the measured bounds
/// are returned. On failure the pool is left untouched.
pub fn layout_text(world: &mut World, entity: Entity) -> TextResult<TextBounds> {
    profile_function!();
    let object = world
        .get::<TextObject>(entity)
        .ok_or(TextError::NotATextObject)?;
    check_capacity(&object.text, object.capacity())?;

    let font = object.font;
    let unresolved = TextError::UnresolvedFontAsset { font: font.id() };
    let lookup = world
        .resource::<TemplateCaches>()
        .and_then(|caches| caches.lookup(&font))
        .ok_or_else(|| unresolved.clone())?;
    let asset = world
        .resource::<Assets<FontAsset>>()
        .and_then(|assets| assets.get(&font))
        .cloned()
        .ok_or(unresolved)?;

    let newline = asset.newline_mode();
    let placements = layout_glyphs(
        &object.text,
        asset.metrics(),
        object.leading,
        newline,
        |character| {
            let template = lookup.get(character)?;
            let visual = world.get::<GlyphVisual>(template)?;
            let metrics = world.get::<GlyphMetrics>(template)?;
            Some(GlyphSource {
                template,
                mesh: visual.mesh,
                material: visual.material,
                metrics: *metrics,
            })
        },
    )?;
    let bounds = TextBounds::measure(&placements, asset.metrics(), object.leading, newline);
    let pool = object.pool.clone();

    {
        profile_scope!("write_pool");
        for (index, slot) in pool.iter().enumerate() {
            let placement = placements.get(index);
            if let Some(instance) = world.get_mut::<GlyphInstance>(*slot) {
                match placement {
                    Some(placement) => instance.assign(placement),
                    None => instance.hide(),
                }
            }
            if let Some(placement) = placement {
                if let Some(transform) = world.get_mut::<Transform>(*slot) {
                    transform.translation = Vec3::new(placement.position.x, placement.position.y, 0.0);
                }
            }
        }
    }

    if let Ok(object) = text_object_mut(world, entity) {
        object.dirty = false;
        object.last_error = None;
        object.bounds = Some(bounds);
    }
    Ok(bounds)
}
