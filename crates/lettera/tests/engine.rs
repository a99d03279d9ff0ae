//! Engine-level text flow: plugins, caller commands and update cycles.

use lettera::prelude::*;
use lettera::text::{CacheState, TemplateCaches};

fn engine_with_font(chars: &str) -> (Engine, Handle<FontAsset>) {
    let mut engine = Engine::builder().add_plugins(DefaultPlugins).build();
    let world = engine.world_mut();

    let material = world
        .resource_mut::<Assets<Material>>()
        .unwrap()
        .insert("glyphs", Material::new("glyphs"));
    let quad = world
        .resource_mut::<Assets<Mesh>>()
        .unwrap()
        .insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));

    let mut font = FontAsset::new(
        "mono",
        material,
        FontMetrics {
            ascent: 1.0,
            line_height: 2.0,
        },
    );
    for c in chars.chars() {
        font = font.with_character(c, quad, GlyphMetrics::from_advance(1.0));
    }
    let font = world
        .resource_mut::<Assets<FontAsset>>()
        .unwrap()
        .insert("mono", font);

    (engine, font)
}

#[test]
fn test_text_resolves_on_second_update() {
    let (mut engine, font) = engine_with_font("abc");
    let text = spawn_text(engine.commands(), TextDescriptor::new("cab", font)).unwrap();

    engine.update();
    let caches = engine.world().resource::<TemplateCaches>().unwrap();
    assert_eq!(caches.state(&font), CacheState::Staging);
    assert!(!engine.world().get::<TextObject>(text).unwrap().is_resolved());

    engine.update();
    let object = engine.world().get::<TextObject>(text).unwrap();
    assert!(object.is_resolved());
    assert!(!object.is_dirty());
    assert_eq!(extract_glyph_draws(engine.world()).len(), 3);
}

#[test]
fn test_settings_descriptor_uses_plugin_defaults() {
    let mut engine = Engine::builder()
        .add_plugin(AssetPlugin)
        .add_plugin(TextPlugin::new().with_default_capacity(4))
        .build();

    let font = engine
        .world_mut()
        .resource_mut::<Assets<FontAsset>>()
        .unwrap()
        .reserve("pending");
    let desc = engine
        .world()
        .resource::<TextSettings>()
        .unwrap()
        .descriptor("hello", font);
    let err = spawn_text(engine.commands(), desc).unwrap_err();
    assert_eq!(
        err,
        TextError::CapacityOverrun {
            len: 5,
            capacity: 4
        }
    );
}

#[test]
fn test_edit_after_resolution_relayouts() {
    let (mut engine, font) = engine_with_font("abc");
    let text = spawn_text(engine.commands(), TextDescriptor::new("a", font)).unwrap();
    engine.update();
    engine.update();
    assert_eq!(extract_glyph_draws(engine.world()).len(), 1);

    set_text(engine.world_mut(), text, "abc").unwrap();
    assert!(engine.world().get::<TextObject>(text).unwrap().is_dirty());

    engine.update();
    assert_eq!(extract_glyph_draws(engine.world()).len(), 3);
}

#[test]
fn test_despawn_text_through_engine() {
    let (mut engine, font) = engine_with_font("ab");
    let text = spawn_text(engine.commands(), TextDescriptor::new("ab", font)).unwrap();
    engine.update();
    engine.update();

    let (world, commands) = engine.world_and_commands();
    despawn_text(world, commands, text).unwrap();
    engine.update();

    assert!(!engine.world().is_alive(text));
    assert!(extract_glyph_draws(engine.world()).is_empty());
}
