//! Per-font glyph template caches.
//!
//! A cache moves through `Unbuilt -> Staging -> Ready`:
//!
//! - **Unbuilt**: no entry. The builder may schedule template spawns.
//! - **Staging**: template spawns have been applied; the list of
//!   `(char, Entity)` pairs waits one cycle so every entity is materialized.
//! - **Ready**: an immutable [`GlyphLookup`] shared by `Arc` with every text
//!   object using the font.
//!
//! Caches are never dropped while the world lives.

use std::sync::Arc;

use lettera_assets::Handle;
use lettera_core::alloc::HashMap;
use lettera_ecs::Entity;

use crate::font::FontAsset;

/// Immutable `char -> template` mapping for one font.
///
/// Always includes the synthetic `'\n'` template.
#[derive(Debug, Clone, Default)]
pub struct GlyphLookup {
    templates: HashMap<char, Entity>,
}

impl GlyphLookup {
    pub fn get(&self, character: char) -> Option<Entity> {
        self.templates.get(&character).copied()
    }

    pub fn newline(&self) -> Option<Entity> {
        self.get('\n')
    }

    pub fn contains(&self, character: char) -> bool {
        self.templates.contains_key(&character)
    }

    /// Number of templates, the newline template included.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Entity)> + '_ {
        self.templates.iter().map(|(c, e)| (*c, *e))
    }
}

impl FromIterator<(char, Entity)> for GlyphLookup {
    fn from_iter<I: IntoIterator<Item = (char, Entity)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum TemplateCache {
    Staging { templates: Vec<(char, Entity)> },
    Ready(Arc<GlyphLookup>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Unbuilt,
    Staging,
    Ready,
}

/// Template caches for every font asset seen so far.
#[derive(Debug, Default)]
pub struct TemplateCaches {
    caches: HashMap<Handle<FontAsset>, TemplateCache>,
}

impl TemplateCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, font: &Handle<FontAsset>) -> CacheState {
        match self.caches.get(font) {
            None => CacheState::Unbuilt,
            Some(TemplateCache::Staging { .. }) => CacheState::Staging,
            Some(TemplateCache::Ready(_)) => CacheState::Ready,
        }
    }

    /// The font's lookup, only once it is ready.
    pub fn lookup(&self, font: &Handle<FontAsset>) -> Option<Arc<GlyphLookup>> {
        match self.caches.get(font)? {
            TemplateCache::Ready(lookup) => Some(Arc::clone(lookup)),
            TemplateCache::Staging { .. } => None,
        }
    }

    pub fn is_ready(&self, font: &Handle<FontAsset>) -> bool {
        self.state(font) == CacheState::Ready
    }

    /// Number of fonts with a staging or ready cache.
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Templates owned by the font's cache, whatever its state.
    pub fn template_count(&self, font: &Handle<FontAsset>) -> usize {
        match self.caches.get(font) {
            None => 0,
            Some(TemplateCache::Staging { templates }) => templates.len(),
            Some(TemplateCache::Ready(lookup)) => lookup.len(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<FontAsset>, &TemplateCache)> {
        self.caches.iter().map(|(font, cache)| (*font, cache))
    }

    /// Record freshly spawned templates. A font that already has a cache
    /// keeps it and the rejected templates are handed back.
    pub(crate) fn stage(
        &mut self,
        font: Handle<FontAsset>,
        templates: Vec<(char, Entity)>,
    ) -> Result<(), Vec<(char, Entity)>> {
        if self.caches.contains_key(&font) {
            tracing::warn!("ignoring second template build for {font:?}");
            return Err(templates);
        }
        self.caches
            .insert(font, TemplateCache::Staging { templates });
        Ok(())
    }

    /// Remove and return every staging list, leaving those fonts unbuilt
    /// until [`TemplateCaches::publish`] is called.
    pub(crate) fn take_staged(&mut self) -> Vec<(Handle<FontAsset>, Vec<(char, Entity)>)> {
        let fonts: Vec<_> = self
            .caches
            .iter()
            .filter(|(_, cache)| matches!(cache, TemplateCache::Staging { .. }))
            .map(|(font, _)| *font)
            .collect();

        let mut staged = Vec::with_capacity(fonts.len());
        for font in fonts {
            if let Some(TemplateCache::Staging { templates }) = self.caches.remove(&font) {
                staged.push((font, templates));
            }
        }
        staged
    }

    pub(crate) fn publish(&mut self, font: Handle<FontAsset>, lookup: GlyphLookup) -> Arc<GlyphLookup> {
        let lookup = Arc::new(lookup);
        self.caches
            .insert(font, TemplateCache::Ready(Arc::clone(&lookup)));
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::render::Material;
    use lettera_assets::Assets;
    use lettera_ecs::World;

    fn font() -> Handle<FontAsset> {
        let mut materials = Assets::new();
        let material = materials.insert("m", Material::new("m"));
        let mut fonts = Assets::new();
        fonts.insert("f", FontAsset::new("f", material, FontMetrics::default()))
    }

    #[test]
    fn test_state_machine() {
        let mut world = World::new();
        let font = font();
        let mut caches = TemplateCaches::new();
        assert_eq!(caches.state(&font), CacheState::Unbuilt);

        let a = world.spawn_empty();
        let nl = world.spawn_empty();
        assert!(caches.stage(font, vec![('a', a), ('\n', nl)]).is_ok());
        assert_eq!(caches.state(&font), CacheState::Staging);
        assert_eq!(caches.template_count(&font), 2);
        assert!(caches.lookup(&font).is_none());

        let staged = caches.take_staged();
        assert_eq!(staged.len(), 1);
        let (staged_font, templates) = staged.into_iter().next().unwrap();
        caches.publish(staged_font, templates.into_iter().collect());

        let lookup = caches.lookup(&font).unwrap();
        assert!(caches.is_ready(&font));
        assert_eq!(lookup.get('a'), Some(a));
        assert_eq!(lookup.newline(), Some(nl));
        assert_eq!(lookup.get('b'), None);
    }

    #[test]
    fn test_stage_refuses_second_build() {
        let mut world = World::new();
        let font = font();
        let mut caches = TemplateCaches::new();
        assert!(caches.stage(font, vec![('\n', world.spawn_empty())]).is_ok());
        let second = world.spawn_empty();
        assert_eq!(caches.stage(font, vec![('\n', second)]), Err(vec![('\n', second)]));
        assert_eq!(caches.template_count(&font), 1);
    }
}
