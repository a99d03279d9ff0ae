//! The font asset model.
//!
//! A [`FontAsset`] is produced by an external authoring step (bitmap or mesh
//! font import) and is immutable once inserted into `Assets<FontAsset>`. The
//! text core reads it to build glyph templates and to lay out lines.

use lettera_assets::{Asset, Handle};
use lettera_core::math::Vec2;
use lettera_ecs::Component;

use crate::layout::NewlineMode;
use crate::render::{Material, Mesh};

/// Per-glyph metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal pen advance after this glyph.
    pub advance: f32,
    /// Offset of the glyph mesh origin from the pen position.
    pub bearing: Vec2,
}

impl GlyphMetrics {
    pub const fn new(advance: f32, bearing: Vec2) -> Self {
        Self { advance, bearing }
    }

    pub const fn from_advance(advance: f32) -> Self {
        Self {
            advance,
            bearing: Vec2::ZERO,
        }
    }
}

impl Component for GlyphMetrics {}

/// Font-wide vertical metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Height of the first line above the baseline.
    pub ascent: f32,
    /// Baseline-to-baseline distance before leading is applied.
    pub line_height: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            ascent: 0.8,
            line_height: 1.0,
        }
    }
}

/// One character of a font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterInfo {
    pub character: char,
    pub mesh: Handle<Mesh>,
    pub metrics: GlyphMetrics,
}

/// An authored mesh font.
#[derive(Debug, Clone)]
pub struct FontAsset {
    name: String,
    material: Handle<Material>,
    characters: Vec<CharacterInfo>,
    metrics: FontMetrics,
    newline: bool,
}

impl FontAsset {
    pub fn new(name: impl Into<String>, material: Handle<Material>, metrics: FontMetrics) -> Self {
        Self {
            name: name.into(),
            material,
            characters: Vec::new(),
            metrics,
            newline: true,
        }
    }

    pub fn with_character(
        mut self,
        character: char,
        mesh: Handle<Mesh>,
        metrics: GlyphMetrics,
    ) -> Self {
        self.characters.push(CharacterInfo {
            character,
            mesh,
            metrics,
        });
        self
    }

    pub fn with_characters(mut self, characters: impl IntoIterator<Item = CharacterInfo>) -> Self {
        self.characters.extend(characters);
        self
    }

    /// Whether `'\n'` starts a new line. When `false` a line break still
    /// occupies a non-drawing slot but leaves the pen where it is.
    pub fn with_newline(mut self, newline: bool) -> Self {
        self.newline = newline;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> Handle<Material> {
        self.material
    }

    /// Characters in authoring order, duplicates included.
    pub fn characters(&self) -> &[CharacterInfo] {
        &self.characters
    }

    pub fn character(&self, character: char) -> Option<&CharacterInfo> {
        self.characters.iter().find(|c| c.character == character)
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn newline(&self) -> bool {
        self.newline
    }

    pub fn newline_mode(&self) -> NewlineMode {
        if self.newline {
            NewlineMode::Break
        } else {
            NewlineMode::Collapse
        }
    }
}

impl Asset for FontAsset {
    fn type_name() -> &'static str {
        "FontAsset"
    }
}
