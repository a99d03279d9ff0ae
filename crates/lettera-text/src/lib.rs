//! Lettera Text - mesh glyph text on top of the Lettera world.
//!
//! Text is drawn as one entity per character, stamped from per-font glyph
//! templates:
//!
//! - [`TemplateCaches`] holds one `char -> template` lookup per font asset,
//!   built over two update cycles by [`BuildTemplateCacheSystem`] and
//!   [`PublishTemplateCacheSystem`]
//! - [`spawn_text`] creates a [`TextObject`] with a fixed pool of glyph slots
//! - [`TextLayoutSystem`] positions the pool whenever the text changes
//! - [`extract_glyph_draws`] hands the visible slots to a renderer
//!
//! ## Quick Start
//!
//! ```
//! use lettera_assets::{AssetSource, Assets};
//! use lettera_core::math::Vec2;
//! use lettera_ecs::{CommandBuffer, Schedule, World};
//! use lettera_text::*;
//!
//! let mut world = World::new();
//! let mut meshes = Assets::new();
//! let mut materials = Assets::new();
//! let mut fonts = Assets::new();
//!
//! let material = materials.insert("glyphs", Material::new("glyphs"));
//! let quad = meshes.insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));
//! let font = fonts.insert(
//!     "mono",
//!     FontAsset::new("mono", material, FontMetrics::default())
//!         .with_character('h', quad, GlyphMetrics::from_advance(1.0))
//!         .with_character('i', quad, GlyphMetrics::from_advance(0.5)),
//! );
//! world.insert_resource(fonts);
//! world.insert_resource(TemplateCaches::new());
//!
//! let mut schedule = Schedule::new();
//! schedule
//!     .add_system(PublishTemplateCacheSystem)
//!     .add_system(BuildTemplateCacheSystem::new())
//!     .add_system(TextLayoutSystem);
//!
//! let mut commands = CommandBuffer::new(&world);
//! let text = spawn_text(&mut commands, TextDescriptor::new("hi", font)).unwrap();
//!
//! schedule.run_cycle(&mut world, &mut commands);
//! schedule.run_cycle(&mut world, &mut commands);
//!
//! assert!(world.get::<TextObject>(text).unwrap().is_resolved());
//! assert_eq!(extract_glyph_draws(&world).len(), 2);
//! ```

pub mod cache;
pub mod error;
pub mod extract;
pub mod font;
pub mod layout;
pub mod render;
pub mod settings;
pub mod systems;
pub mod template;
pub mod text;

pub use cache::{CacheState, GlyphLookup, TemplateCache, TemplateCaches};
pub use error::{TextError, TextResult};
pub use extract::{GlyphDraw, GlyphInstanceRaw, extract_glyph_draws, pack_instances};
pub use font::{CharacterInfo, FontAsset, FontMetrics, GlyphMetrics};
pub use layout::{GlyphPlacement, GlyphSource, NewlineMode, TextBounds, layout_glyphs};
pub use render::{Material, Mesh};
pub use settings::TextSettings;
pub use systems::{BuildTemplateCacheSystem, PublishTemplateCacheSystem, TextLayoutSystem};
pub use template::{GlyphTemplate, GlyphVisual, Prefab, SpecialCharacter};
pub use text::{
    GlyphInstance, TextDescriptor, TextObject, despawn_text, layout_text, set_container,
    set_leading, set_text, spawn_text,
};
