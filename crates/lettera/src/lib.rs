//! Lettera - mesh glyph text on a retained-mode entity world
//!
//! Lettera draws text one entity per character. Each font asset gets a
//! cache of glyph template entities, and every text object owns a fixed
//! pool of glyph slots that layout fills from those templates.
//!
//! The [`Engine`] ties it together: a [`World`](ecs::World), a
//! [`Schedule`](ecs::Schedule) of systems registered by plugins, and a
//! [`CommandBuffer`](ecs::CommandBuffer) for caller-side structural
//! changes that are applied at the start of the next update.
//!
//! # Quick Start
//!
//! ```
//! use lettera::prelude::*;
//!
//! let mut engine = Engine::builder().add_plugins(DefaultPlugins).build();
//!
//! let world = engine.world_mut();
//! let material = world
//!     .resource_mut::<Assets<Material>>()
//!     .unwrap()
//!     .insert("glyphs", Material::new("glyphs"));
//! let quad = world
//!     .resource_mut::<Assets<Mesh>>()
//!     .unwrap()
//!     .insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));
//! let font = world.resource_mut::<Assets<FontAsset>>().unwrap().insert(
//!     "mono",
//!     FontAsset::new("mono", material, FontMetrics::default())
//!         .with_character('o', quad, GlyphMetrics::from_advance(1.0))
//!         .with_character('k', quad, GlyphMetrics::from_advance(1.0)),
//! );
//!
//! let text = spawn_text(engine.commands(), TextDescriptor::new("ok", font)).unwrap();
//!
//! // One cycle to build the font's templates, one to publish and lay out.
//! engine.update();
//! engine.update();
//!
//! assert!(engine.world().get::<TextObject>(text).unwrap().is_resolved());
//! assert_eq!(extract_glyph_draws(engine.world()).len(), 2);
//! ```
//!
//! # Architecture
//!
//! Plugins implement [`Plugin`] and can:
//!
//! - Insert resources into the world
//! - Add systems to the schedule
//! - Depend on other plugins
//!
//! # Default Plugins
//!
//! - `AssetPlugin` - font, mesh and material storages
//! - `TextPlugin` - template caches and the text systems

pub mod engine;
pub mod plugin;
pub mod plugins;

pub use lettera_assets as assets;
pub use lettera_core as core;
pub use lettera_core::math;
pub use lettera_ecs as ecs;
pub use lettera_text as text;

pub use engine::{Engine, EngineBuilder};
pub use plugin::{FnPlugin, Plugin, PluginDyn, PluginGroup, PluginSet};
pub use plugins::{AssetPlugin, DefaultPlugins, TextPlugin};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{Engine, EngineBuilder};
    pub use crate::plugin::{FnPlugin, Plugin, PluginGroup};
    pub use crate::plugins::{AssetPlugin, DefaultPlugins, TextPlugin};

    pub use lettera_assets::{Asset, AssetError, AssetSource, Assets, Handle, LoadState};
    pub use lettera_core::config::{Config, ProfilingMode};
    pub use lettera_core::geometry::Container;
    pub use lettera_core::math::{Vec2, Vec3};
    pub use lettera_ecs::{CommandBuffer, Component, Entity, Schedule, System, Transform, World};
    pub use lettera_text::{
        FontAsset, FontMetrics, GlyphMetrics, Material, Mesh, TextDescriptor, TextError,
        TextObject, TextSettings, despawn_text, extract_glyph_draws, set_container, set_leading,
        set_text, spawn_text,
    };
}
