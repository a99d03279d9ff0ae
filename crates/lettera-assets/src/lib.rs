//! Lettera Assets - typed, generational asset handles.
//!
//! Fonts, meshes and materials are produced by external authoring tools and
//! handed to the engine as assets. Everything else refers to them by
//! [`Handle`], whose identity is stable for the life of the asset.
//!
//! ```
//! use lettera_assets::{Asset, AssetSource, Assets};
//!
//! struct Outline(Vec<f32>);
//!
//! impl Asset for Outline {
//!     fn type_name() -> &'static str {
//!         "Outline"
//!     }
//! }
//!
//! let mut outlines = Assets::new();
//! let handle = outlines.insert(AssetSource::memory("a"), Outline(vec![0.0, 1.0]));
//! assert!(outlines.is_ready(&handle));
//! ```

pub mod error;
pub mod handle;
pub mod source;
pub mod state;
pub mod storage;

pub use error::{AssetError, AssetResult};
pub use handle::{Handle, HandleId};
pub use source::AssetSource;
pub use state::{AssetEntry, AssetState, LoadState};
pub use storage::Assets;

/// Marker trait for types that can live in an [`Assets`] storage.
pub trait Asset: Send + Sync + 'static {
    /// Human readable type name, used in logs and errors.
    fn type_name() -> &'static str;
}
