//! Pen-based glyph layout.
//!
//! Layout is pure: it walks a string, asks a resolver for each character's
//! template, and returns one [`GlyphPlacement`] per character. Writing the
//! placements into a text object's glyph pool is done by
//! [`layout_text`](crate::layout_text).
//!
//! Positions are local to the text object. The object's own transform is
//! baked from its container pivot, so `(0, 0)` here is always the top-left
//! of the container and lines flow toward negative `y`.

use lettera_assets::Handle;
use lettera_core::math::Vec2;
use lettera_core::profiling::profile_function;
use lettera_ecs::Entity;

use crate::error::{TextError, TextResult};
use crate::font::{FontMetrics, GlyphMetrics};
use crate::render::{Material, Mesh};

/// How a `'\n'` affects the pen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineMode {
    /// Reset `x` to the line start and move down one line.
    #[default]
    Break,
    /// Keep the pen where it is. The break still takes a non-drawing slot.
    Collapse,
}

/// What a resolved template contributes to a slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSource {
    pub template: Entity,
    pub mesh: Option<Handle<Mesh>>,
    pub material: Handle<Material>,
    pub metrics: GlyphMetrics,
}

/// One laid out character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub character: char,
    /// `None` only for a line break whose font has no newline template.
    pub source: Option<GlyphSource>,
    pub position: Vec2,
    pub line: u32,
    pub newline: bool,
}

impl GlyphPlacement {
    pub fn is_drawing(&self) -> bool {
        !self.newline && self.source.is_some_and(|s| s.mesh.is_some())
    }

    /// Pen position this glyph was placed from.
    fn pen(&self) -> Vec2 {
        match self.source {
            Some(source) if !self.newline => self.position - source.metrics.bearing,
            _ => self.position,
        }
    }

    fn advance(&self) -> f32 {
        match self.source {
            Some(source) if !self.newline => source.metrics.advance,
            _ => 0.0,
        }
    }
}

/// Measured extent of a laid out text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    pub width: f32,
    pub height: f32,
    pub lines: u32,
}

impl TextBounds {
    /// Width is the widest line's pen extent; height is the first line's
    /// ascent plus one scaled line height per extra line.
    pub fn measure(
        placements: &[GlyphPlacement],
        metrics: &FontMetrics,
        leading: f32,
        newline: NewlineMode,
    ) -> Self {
        let Some(last) = placements.last() else {
            return Self::default();
        };
        let trailing_break = last.newline && newline == NewlineMode::Break;
        let lines = last.line + 1 + u32::from(trailing_break);
        let width = placements
            .iter()
            .map(|p| p.pen().x + p.advance())
            .fold(0.0f32, f32::max);
        let height = metrics.ascent + (lines - 1) as f32 * metrics.line_height * leading;
        Self {
            width,
            height,
            lines,
        }
    }
}

/// Lay out `text` from the origin.
///
/// `resolve` maps a character to its template. Every character other than
/// `'\n'` must resolve, otherwise [`TextError::UnmappedCharacter`] is
/// returned for the first one that does not.
///
/// ```
/// use lettera_text::{FontMetrics, NewlineMode, layout_glyphs};
///
/// let metrics = FontMetrics { ascent: 0.8, line_height: 1.0 };
/// let placements = layout_glyphs("", &metrics, 1.0, NewlineMode::Break, |_| None).unwrap();
/// assert!(placements.is_empty());
/// ```
pub fn layout_glyphs<F>(
    text: &str,
    metrics: &FontMetrics,
    leading: f32,
    newline: NewlineMode,
    mut resolve: F,
) -> TextResult<Vec<GlyphPlacement>>
where
    F: FnMut(char) -> Option<GlyphSource>,
{
    profile_function!();
    let line_advance = metrics.line_height * leading;
    let mut pen = Vec2::ZERO;
    let mut line = 0;
    let mut placements = Vec::with_capacity(text.len());

    for (index, character) in text.chars().enumerate() {
        if character == '\n' {
            placements.push(GlyphPlacement {
                character,
                source: resolve(character),
                position: pen,
                line,
                newline: true,
            });
            if newline == NewlineMode::Break {
                pen.x = 0.0;
                pen.y -= line_advance;
                line += 1;
            }
            continue;
        }

        let source = resolve(character)
            .ok_or(TextError::UnmappedCharacter { character, index })?;
        placements.push(GlyphPlacement {
            character,
            source: Some(source),
            position: pen + source.metrics.bearing,
            line,
            newline: false,
        });
        pen.x += source.metrics.advance;
    }

    Ok(placements)
}
