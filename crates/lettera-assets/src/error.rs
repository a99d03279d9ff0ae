//! Asset error type.

use std::fmt;

/// Why an asset could not be produced.
///
/// Stored on a failed asset entry, so consumers that find the asset missing
/// can report the reason once instead of retrying.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// Nothing exists at the given source.
    NotFound { path: String },

    /// The authoring tool's output could not be imported.
    Import { path: String, message: String },

    /// The handle belongs to an asset that was removed from its storage.
    Removed { type_name: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { path } => write!(f, "no asset at '{path}'"),
            AssetError::Import { path, message } => {
                write!(f, "could not import '{path}': {message}")
            }
            AssetError::Removed { type_name } => {
                write!(f, "{type_name} was removed from storage")
            }
        }
    }
}

impl std::error::Error for AssetError {}

pub type AssetResult<T> = Result<T, AssetError>;
