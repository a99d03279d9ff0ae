//! End-to-end cache building and layout across update cycles.

use lettera_assets::{AssetError, AssetSource, Assets, Handle};
use lettera_core::geometry::Container;
use lettera_core::math::{Vec2, Vec3};
use lettera_ecs::{CommandBuffer, Entity, Schedule, Transform, World};
use lettera_text::*;

struct Harness {
    world: World,
    commands: CommandBuffer,
    schedule: Schedule,
    quad: Handle<Mesh>,
    material: Handle<Material>,
}

const LINE_HEIGHT: f32 = 10.0;

impl Harness {
    fn new() -> Self {
        let mut world = World::new();
        let mut meshes = Assets::new();
        let mut materials = Assets::new();
        let quad = meshes.insert("quad", Mesh::quad(Vec2::ZERO, Vec2::ONE));
        let material = materials.insert("glyphs", Material::new("glyphs"));
        world.insert_resource(meshes);
        world.insert_resource(materials);
        world.insert_resource(Assets::<FontAsset>::new());
        world.insert_resource(TemplateCaches::new());

        let commands = CommandBuffer::new(&world);
        let mut schedule = Schedule::new();
        schedule
            .add_system(PublishTemplateCacheSystem)
            .add_system(BuildTemplateCacheSystem::new())
            .add_system(TextLayoutSystem);

        Self {
            world,
            commands,
            schedule,
            quad,
            material,
        }
    }

    /// A font whose glyph for `c` advances by `(index + 1)` units.
    fn font(&mut self, name: &str, chars: &str) -> Handle<FontAsset> {
        let mut font = FontAsset::new(
            name,
            self.material,
            FontMetrics {
                ascent: 8.0,
                line_height: LINE_HEIGHT,
            },
        );
        for (i, c) in chars.chars().enumerate() {
            font = font.with_character(c, self.quad, GlyphMetrics::from_advance(i as f32 + 1.0));
        }
        self.fonts().insert(AssetSource::memory(name), font)
    }

    fn fonts(&mut self) -> &mut Assets<FontAsset> {
        self.world.resource_mut::<Assets<FontAsset>>().unwrap()
    }

    fn spawn(&mut self, desc: TextDescriptor) -> Entity {
        spawn_text(&mut self.commands, desc).unwrap()
    }

    fn cycle(&mut self) {
        self.schedule.run_cycle(&mut self.world, &mut self.commands);
    }

    fn caches(&self) -> &TemplateCaches {
        self.world.resource::<TemplateCaches>().unwrap()
    }

    fn template_entities(&self) -> usize {
        self.world.query::<GlyphTemplate>().count()
    }

    fn text(&self, entity: Entity) -> &TextObject {
        self.world.get::<TextObject>(entity).unwrap()
    }

    fn slots(&self, entity: Entity) -> Vec<(GlyphInstance, Vec3)> {
        self.text(entity)
            .pool()
            .iter()
            .map(|slot| {
                (
                    *self.world.get::<GlyphInstance>(*slot).unwrap(),
                    self.world.get::<Transform>(*slot).unwrap().translation,
                )
            })
            .collect()
    }
}

#[test]
fn test_cache_ready_after_two_cycles_with_newline_marker() {
    let mut h = Harness::new();
    let font = h.font("abc", "ABC");
    h.spawn(TextDescriptor::new("AB", font));

    h.cycle();
    assert_eq!(h.caches().state(&font), CacheState::Staging);
    assert!(h.caches().lookup(&font).is_none());

    h.cycle();
    assert_eq!(h.caches().state(&font), CacheState::Ready);
    let lookup = h.caches().lookup(&font).unwrap();
    assert_eq!(lookup.len(), 4);
    assert!(lookup.newline().is_some());

    let mut distinct: Vec<_> = lookup.iter().map(|(_, e)| e).collect();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), 4);
}

#[test]
fn test_same_font_in_one_cycle_builds_once() {
    let mut h = Harness::new();
    let font = h.font("shared", "XYZ");
    for _ in 0..5 {
        h.spawn(TextDescriptor::new("XY", font));
    }

    h.cycle();
    h.cycle();
    h.cycle();

    assert_eq!(h.template_entities(), 4);
    assert_eq!(h.caches().template_count(&font), 4);
    assert_eq!(h.caches().len(), 1);
}

#[test]
fn test_late_text_object_reuses_ready_cache() {
    let mut h = Harness::new();
    let font = h.font("late", "Q");
    h.spawn(TextDescriptor::new("Q", font));
    h.cycle();
    h.cycle();

    let late = h.spawn(TextDescriptor::new("QQ", font));
    h.cycle();

    assert!(h.text(late).is_resolved());
    assert_eq!(h.template_entities(), 2);
    assert_eq!(h.text(late).bounds().map(|b| b.width), Some(2.0));
}

#[test]
fn test_templates_are_prefabs() {
    let mut h = Harness::new();
    let font = h.font("prefab", "a");
    h.spawn(TextDescriptor::new("a", font));
    h.cycle();
    h.cycle();

    let lookup = h.caches().lookup(&font).unwrap();
    for (character, template) in lookup.iter() {
        assert!(h.world.has::<Prefab>(template));
        let special = h.world.get::<SpecialCharacter>(template).unwrap();
        assert_eq!(special.newline, character == '\n');
        let visual = h.world.get::<GlyphVisual>(template).unwrap();
        assert_eq!(visual.mesh.is_none(), character == '\n');
    }
    // templates never show up as draws
    assert_eq!(extract_glyph_draws(&h.world).len(), 1);
}

#[test]
fn test_line_break_layout() {
    let mut h = Harness::new();
    let font = h.font("lines", "ABC");
    let text = h.spawn(TextDescriptor::new("AB\nC", font).with_leading(1.0));
    h.cycle();
    h.cycle();

    let slots = h.slots(text);
    let (a, a_pos) = slots[0];
    let (b, b_pos) = slots[1];
    let (br, _) = slots[2];
    let (c, c_pos) = slots[3];

    assert_eq!(a.character, Some('A'));
    assert_eq!(a_pos.y, 0.0);
    assert_eq!(b_pos.y, 0.0);
    assert!(b_pos.x > a_pos.x);
    assert!(br.newline);
    assert!(!br.is_drawing());
    assert_eq!(c.character, Some('C'));
    assert_eq!(c_pos, Vec3::new(0.0, -LINE_HEIGHT, 0.0));
    assert!(a.is_drawing() && b.is_drawing() && c.is_drawing());

    // trailing pool slots stay hidden
    assert!(slots[4..].iter().all(|(slot, _)| !slot.is_drawing()));
}

#[test]
fn test_layout_idempotent_and_pool_stable() {
    let mut h = Harness::new();
    let font = h.font("stable", "HIJ");
    let text = h.spawn(TextDescriptor::new("HIJ", font).with_capacity(6));
    h.cycle();
    h.cycle();

    let pool_before = h.text(text).pool().to_vec();
    let slots_before = h.slots(text);

    layout_text(&mut h.world, text).unwrap();
    layout_text(&mut h.world, text).unwrap();
    h.cycle();

    assert_eq!(h.text(text).pool(), pool_before.as_slice());
    assert_eq!(h.slots(text), slots_before);
}

#[test]
fn test_shorter_text_hides_tail_and_keeps_entities() {
    let mut h = Harness::new();
    let font = h.font("edit", "abcd");
    let text = h.spawn(TextDescriptor::new("abcd", font).with_capacity(4));
    h.cycle();
    h.cycle();
    assert_eq!(extract_glyph_draws(&h.world).len(), 4);
    let pool = h.text(text).pool().to_vec();

    set_text(&mut h.world, text, "ab").unwrap();
    h.cycle();
    assert_eq!(extract_glyph_draws(&h.world).len(), 2);
    assert_eq!(h.text(text).pool(), pool.as_slice());
    assert!(pool.iter().all(|slot| h.world.is_alive(*slot)));

    set_text(&mut h.world, text, "dcba").unwrap();
    h.cycle();
    assert_eq!(extract_glyph_draws(&h.world).len(), 4);
}

#[test]
fn test_capacity_overrun_is_surfaced() {
    let mut h = Harness::new();
    let font = h.font("cap", "abcde");

    let err = spawn_text(
        &mut h.commands,
        TextDescriptor::new("abcde", font).with_capacity(3),
    )
    .unwrap_err();
    assert_eq!(err, TextError::CapacityOverrun { len: 5, capacity: 3 });

    let text = h.spawn(TextDescriptor::new("abc", font).with_capacity(3));
    h.cycle();
    h.cycle();
    assert_eq!(
        set_text(&mut h.world, text, "abcde"),
        Err(TextError::CapacityOverrun { len: 5, capacity: 3 })
    );
    assert_eq!(h.text(text).text(), "abc");
    assert_eq!(extract_glyph_draws(&h.world).len(), 3);
}

#[test]
fn test_unmapped_character_isolated_per_text_object() {
    let mut h = Harness::new();
    let font = h.font("partial", "ab");
    let bad = h.spawn(TextDescriptor::new("a?b", font));
    let good = h.spawn(TextDescriptor::new("ab", font));
    h.cycle();
    h.cycle();

    assert_eq!(
        h.text(bad).last_error(),
        Some(&TextError::UnmappedCharacter {
            character: '?',
            index: 1
        })
    );
    assert!(h.slots(bad).iter().all(|(slot, _)| !slot.is_drawing()));

    assert_eq!(h.text(good).last_error(), None);
    assert_eq!(h.slots(good).iter().filter(|(s, _)| s.is_drawing()).count(), 2);

    set_text(&mut h.world, bad, "ba").unwrap();
    h.cycle();
    assert_eq!(h.text(bad).last_error(), None);
}

#[test]
fn test_missing_font_stays_unresolved_without_templates() {
    let mut h = Harness::new();
    let font = h.fonts().reserve(AssetSource::memory("never"));
    let text = h.spawn(TextDescriptor::new("x", font));

    for _ in 0..4 {
        h.cycle();
    }
    assert!(!h.text(text).is_resolved());
    assert_eq!(h.caches().state(&font), CacheState::Unbuilt);
    assert_eq!(h.template_entities(), 0);

    h.fonts().set_failed(
        &font,
        AssetError::NotFound {
            path: "never".into(),
        },
    );
    h.cycle();
    assert!(!h.text(text).is_resolved());
}

#[test]
fn test_font_that_loads_later_resolves() {
    let mut h = Harness::new();
    let font = h.fonts().reserve(AssetSource::memory("slow"));
    let text = h.spawn(TextDescriptor::new("s", font));
    h.cycle();

    let material = h.material;
    let quad = h.quad;
    h.fonts().set_loaded(
        &font,
        FontAsset::new("slow", material, FontMetrics::default()).with_character(
            's',
            quad,
            GlyphMetrics::from_advance(1.0),
        ),
    );
    h.cycle();
    h.cycle();
    assert!(h.text(text).is_resolved());
    assert_eq!(extract_glyph_draws(&h.world).len(), 1);
}

#[test]
fn test_empty_font_builds_newline_only_cache() {
    let mut h = Harness::new();
    let font = h.font("empty", "");
    let text = h.spawn(TextDescriptor::new("\n", font));
    h.cycle();
    h.cycle();

    assert!(h.caches().is_ready(&font));
    assert_eq!(h.caches().template_count(&font), 1);
    assert_eq!(h.text(text).last_error(), None);
    assert!(extract_glyph_draws(&h.world).is_empty());
}

#[test]
fn test_duplicate_and_explicit_newline_characters_skipped() {
    let mut h = Harness::new();
    let font = h.font("dupes", "aa\nb");
    h.spawn(TextDescriptor::new("ab", font));
    h.cycle();
    h.cycle();

    // 'a', 'b' and the synthetic newline
    assert_eq!(h.template_entities(), 3);
}

#[test]
fn test_collapsed_newline_font() {
    let mut h = Harness::new();
    let material = h.material;
    let quad = h.quad;
    let font = h.fonts().insert(
        "inline",
        FontAsset::new("inline", material, FontMetrics::default())
            .with_character('x', quad, GlyphMetrics::from_advance(2.0))
            .with_newline(false),
    );
    let text = h.spawn(TextDescriptor::new("x\nx", font));
    h.cycle();
    h.cycle();

    let slots = h.slots(text);
    assert!(slots[1].0.newline);
    assert_eq!(slots[2].1, Vec3::new(2.0, 0.0, 0.0));
}

#[test]
fn test_draw_positions_include_pivot_bake() {
    let mut h = Harness::new();
    let font = h.font("pivot", "ab");
    let container = Container::new(100.0, 40.0).with_pivot(0.5, 0.5);
    let text = h.spawn(TextDescriptor::new("ab", font).with_container(container));
    h.cycle();
    h.cycle();

    let draws = extract_glyph_draws(&h.world);
    assert_eq!(draws.len(), 2);
    assert!(draws.iter().all(|d| d.owner == text));
    assert_eq!(draws[0].position, Vec3::new(-50.0, 20.0, 0.0));
    assert_eq!(draws[1].position, Vec3::new(-49.0, 20.0, 0.0));

    let raw: Vec<_> = draws.iter().map(GlyphDraw::to_raw).collect();
    assert_eq!(pack_instances(&raw).len(), raw.len() * 20);
}

#[test]
fn test_despawn_before_resolution_is_abandoned() {
    let mut h = Harness::new();
    let font = h.font("gone", "g");
    let text = h.spawn(TextDescriptor::new("g", font).with_capacity(2));
    h.cycle();

    let world = &h.world;
    despawn_text(world, &mut h.commands, text).unwrap();
    h.cycle();
    h.cycle();

    assert!(!h.world.is_alive(text));
    assert!(h.world.query::<TextObject>().next().is_none());
    assert!(h.world.query::<GlyphInstance>().next().is_none());
    // the build already in flight still completes
    assert!(h.caches().is_ready(&font));
}
