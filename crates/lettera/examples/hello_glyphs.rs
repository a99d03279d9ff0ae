//! Lays out two lines of text and prints the resulting glyph draws.
//!
//! Run with `RUST_LOG=debug` to see cache building and layout.

use lettera::core::logging;
use lettera::prelude::*;

fn main() {
    logging::init();

    let mut engine = Engine::builder().add_plugins(DefaultPlugins).build();
    let world = engine.world_mut();

    let material = world
        .resource_mut::<Assets<Material>>()
        .expect("AssetPlugin registers materials")
        .insert("glyphs", Material::new("glyphs").with_color([1.0, 0.8, 0.2, 1.0]));
    let quad = world
        .resource_mut::<Assets<Mesh>>()
        .expect("AssetPlugin registers meshes")
        .insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));

    let mut font = FontAsset::new("mono", material, FontMetrics::default()).with_newline(true);
    for c in "HELOWRD ".chars() {
        font = font.with_character(c, quad, GlyphMetrics::from_advance(0.6));
    }
    let font = world
        .resource_mut::<Assets<FontAsset>>()
        .expect("AssetPlugin registers fonts")
        .insert("mono", font);

    let desc = TextDescriptor::new("HELLO\nWORLD", font)
        .with_container(Container::new(4.0, 2.0).with_pivot(0.0, 1.0));
    let text = spawn_text(engine.commands(), desc).expect("text fits the default pool");

    engine.update();
    engine.update();

    if let Some(bounds) = engine.world().get::<TextObject>(text).and_then(TextObject::bounds) {
        println!(
            "bounds: {:.2} x {:.2} over {} lines",
            bounds.width, bounds.height, bounds.lines
        );
    }
    for draw in extract_glyph_draws(engine.world()) {
        println!("slot {} at {:?}", draw.slot, draw.position);
    }
}
