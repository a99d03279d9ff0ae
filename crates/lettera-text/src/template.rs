//! Components carried by glyph template entities.
//!
//! A template is a cloning source for one character of one font. It is
//! spawned once by the cache builder and never mutated afterwards.

use lettera_assets::Handle;
use lettera_ecs::Component;

use crate::font::FontAsset;
use crate::render::{Material, Mesh};

/// Identifies which font and character a template stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphTemplate {
    pub font: Handle<FontAsset>,
    pub character: char,
}

impl Component for GlyphTemplate {}

/// Mesh and material used to stamp a visual instance.
///
/// The newline template has no mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphVisual {
    pub mesh: Option<Handle<Mesh>>,
    pub material: Handle<Material>,
}

impl Component for GlyphVisual {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialCharacter {
    pub newline: bool,
}

impl Component for SpecialCharacter {}

/// Marks an entity as a template only. Prefabs are never drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Prefab;

impl Component for Prefab {}
