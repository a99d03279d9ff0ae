use lettera_assets::HandleId;

/// Errors that can occur while building or laying out text.
///
/// Every variant is local to one text object; none of them stop other text
/// objects from being processed in the same cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The font's template cache is not ready yet, or the font asset itself
    /// is missing, loading or failed.
    UnresolvedFontAsset { font: HandleId },

    /// A character has no template in the font's lookup.
    UnmappedCharacter { character: char, index: usize },

    /// The text has more characters than the text object's glyph pool.
    CapacityOverrun { len: usize, capacity: usize },

    /// The entity is dead or carries no text object.
    NotATextObject,
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::UnresolvedFontAsset { font } => write!(
                f,
                "Font asset {}v{} has no ready glyph templates",
                font.index(),
                font.generation()
            ),
            TextError::UnmappedCharacter { character, index } => write!(
                f,
                "No such character {:?} (at index {}) in font asset",
                character, index
            ),
            TextError::CapacityOverrun { len, capacity } => write!(
                f,
                "Text of {} characters exceeds glyph pool capacity {}",
                len, capacity
            ),
            TextError::NotATextObject => write!(f, "Entity is not a live text object"),
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
