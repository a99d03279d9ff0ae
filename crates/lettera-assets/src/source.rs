//! Asset sources, used as deduplication keys.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Where an asset came from.
///
/// Two sources with the same [`key`](AssetSource::key) name the same asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSource {
    /// Output of an authoring tool on disk.
    Path { path: PathBuf, key: String },
    /// Built in code or embedded in the binary.
    Named(String),
}

impl AssetSource {
    /// A path source. `.` segments and resolvable `..` segments are folded
    /// into the key, so `fonts/./mono.glyphs` and `fonts/mono.glyphs` match.
    pub fn path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut parts: Vec<Component<'_>> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                    parts.pop();
                }
                other => parts.push(other),
            }
        }
        let folded: PathBuf = parts.iter().collect();
        AssetSource::Path {
            path: path.to_path_buf(),
            key: format!("path:{}", folded.to_string_lossy()),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        AssetSource::Named(name.into())
    }

    /// Alias of [`AssetSource::named`].
    pub fn memory(name: impl Into<String>) -> Self {
        Self::named(name)
    }

    pub fn key(&self) -> &str {
        match self {
            AssetSource::Path { key, .. } => key,
            AssetSource::Named(name) => name,
        }
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSource::Path { path, .. } => write!(f, "{}", path.display()),
            AssetSource::Named(name) => write!(f, "memory://{name}"),
        }
    }
}

impl From<&str> for AssetSource {
    fn from(name: &str) -> Self {
        AssetSource::named(name)
    }
}

impl From<String> for AssetSource {
    fn from(name: String) -> Self {
        AssetSource::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_key_folds_dot_segments() {
        let a = AssetSource::path("fonts/./mono.glyphs");
        let b = AssetSource::path("fonts/extra/../mono.glyphs");
        let c = AssetSource::path("fonts/mono.glyphs");
        assert_eq!(a.key(), c.key());
        assert_eq!(b.key(), c.key());
        assert_ne!(AssetSource::path("../mono.glyphs").key(), c.key());
    }

    #[test]
    fn test_named_and_path_never_collide() {
        assert_ne!(
            AssetSource::named("mono.glyphs").key(),
            AssetSource::path("mono.glyphs").key()
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AssetSource::named("mono").to_string(), "memory://mono");
        assert_eq!(
            AssetSource::path("fonts/ui.glyphs").to_string(),
            Path::new("fonts/ui.glyphs").display().to_string()
        );
    }
}
