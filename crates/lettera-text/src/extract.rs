//! Hand-off to the rendering backend.

use bytemuck::{Pod, Zeroable};
use lettera_assets::Handle;
use lettera_core::math::{PackedVec3, Vec3};
use lettera_core::profiling::profile_function;
use lettera_ecs::{Entity, Transform, World};

use crate::render::{Material, Mesh};
use crate::text::GlyphInstance;

/// One drawable glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub owner: Entity,
    pub slot: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<Material>,
    /// Owner translation plus the slot's local position.
    pub position: Vec3,
}

impl GlyphDraw {
    pub fn to_raw(&self) -> GlyphInstanceRaw {
        GlyphInstanceRaw {
            position: self.position.into(),
            mesh: self.mesh.id().index(),
            material: self.material.id().index(),
        }
    }
}

/// GPU instance record for a glyph.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GlyphInstanceRaw {
    pub position: PackedVec3,
    pub mesh: u32,
    pub material: u32,
}

/// Collect every drawing glyph slot. Hidden slots, line breaks and templates
/// are left out.
pub fn extract_glyph_draws(world: &World) -> Vec<GlyphDraw> {
    profile_function!();
    world
        .query::<(GlyphInstance, Transform)>()
        .filter(|(_, instance, _)| instance.is_drawing())
        .filter_map(|(slot, instance, local)| {
            let owner = world
                .get::<Transform>(instance.owner)
                .map_or(Vec3::ZERO, |t| t.translation);
            Some(GlyphDraw {
                owner: instance.owner,
                slot,
                mesh: instance.mesh?,
                material: instance.material?,
                position: owner + local.translation,
            })
        })
        .collect()
}

/// Raw instance records as bytes, ready for a vertex buffer upload.
pub fn pack_instances(instances: &[GlyphInstanceRaw]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
