use lettera_assets::Handle;
use tracing::Level;

use crate::font::FontAsset;
use crate::text::TextDescriptor;

/// Text defaults, stored as a world resource.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSettings {
    /// Line-height multiplier for new text objects.
    pub default_leading: f32,
    /// Glyph pool size for new text objects.
    pub default_capacity: usize,
    /// Level used for the one-time report of a font asset that cannot be
    /// resolved.
    pub unresolved_font_level: Level,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            default_leading: TextDescriptor::DEFAULT_LEADING,
            default_capacity: TextDescriptor::DEFAULT_CAPACITY,
            unresolved_font_level: Level::WARN,
        }
    }
}

impl TextSettings {
    /// A descriptor carrying these defaults.
    pub fn descriptor(&self, text: impl Into<String>, font: Handle<FontAsset>) -> TextDescriptor {
        TextDescriptor::new(text, font)
            .with_leading(self.default_leading)
            .with_capacity(self.default_capacity)
    }

    pub(crate) fn report_unresolved(&self, message: std::fmt::Arguments<'_>) {
        let level = self.unresolved_font_level;
        if level == Level::ERROR {
            tracing::error!("{message}");
        } else if level == Level::WARN {
            tracing::warn!("{message}");
        } else if level == Level::INFO {
            tracing::info!("{message}");
        } else if level == Level::DEBUG {
            tracing::debug!("{message}");
        } else {
            tracing::trace!("{message}");
        }
    }
}
