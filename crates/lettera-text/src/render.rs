//! Render-side assets referenced by glyph templates.
//!
//! Meshes and materials are produced by the font authoring step; the text
//! core only passes their handles through to the renderer.

use lettera_assets::Asset;
use lettera_core::math::{PackedVec2, PackedVec3, Vec2};

/// A glyph mesh in the glyph's local space, baseline at `y = 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<PackedVec3>,
    pub uvs: Vec<PackedVec2>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// An axis-aligned quad spanning `min..max`.
    pub fn quad(min: Vec2, max: Vec2) -> Self {
        let corners = [
            (min.x, min.y, 0.0, 1.0),
            (max.x, min.y, 1.0, 1.0),
            (max.x, max.y, 1.0, 0.0),
            (min.x, max.y, 0.0, 0.0),
        ];
        Self {
            positions: corners
                .iter()
                .map(|&(x, y, _, _)| PackedVec3 { x, y, z: 0.0 })
                .collect(),
            uvs: corners
                .iter()
                .map(|&(_, _, u, v)| PackedVec2 { x: u, y: v })
                .collect(),
            indices: vec![0, 1, 2, 2, 3, 0],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl Asset for Mesh {
    fn type_name() -> &'static str {
        "Mesh"
    }
}

/// Shared surface description for every glyph of a font.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: [f32; 4],
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: [1.0; 4],
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

impl Asset for Material {
    fn type_name() -> &'static str {
        "Material"
    }
}
