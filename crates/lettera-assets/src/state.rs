//! Per-asset load state.

use std::fmt;
use std::sync::Arc;

use crate::error::AssetError;
use crate::source::AssetSource;

/// Where an asset is in its lifecycle, with the payload when there is one.
#[derive(Debug, Clone, Default)]
pub enum AssetState<T> {
    /// A handle exists but the producer has not started.
    #[default]
    Reserved,
    Loading,
    Ready(Arc<T>),
    /// Terminal until the asset is replaced.
    Failed(Arc<AssetError>),
}

impl<T> AssetState<T> {
    pub fn asset(&self) -> Option<&Arc<T>> {
        match self {
            AssetState::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AssetError> {
        match self {
            AssetState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn load_state(&self) -> LoadState {
        match self {
            AssetState::Reserved => LoadState::Reserved,
            AssetState::Loading => LoadState::Loading,
            AssetState::Ready(_) => LoadState::Ready,
            AssetState::Failed(_) => LoadState::Failed,
        }
    }
}

/// [`AssetState`] without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Also reported for handles whose asset was removed.
    Reserved,
    Loading,
    Ready,
    Failed,
}

impl LoadState {
    /// Whether the producer has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Ready | LoadState::Failed)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadState::Reserved => "reserved",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        })
    }
}

/// One slot of an [`Assets`](crate::Assets) storage.
#[derive(Debug)]
pub struct AssetEntry<T> {
    pub source: AssetSource,
    pub state: AssetState<T>,
    /// Bumped every time a ready asset is stored into this entry.
    pub version: u32,
}

impl<T> AssetEntry<T> {
    pub(crate) fn reserved(source: AssetSource) -> Self {
        Self {
            source,
            state: AssetState::Reserved,
            version: 0,
        }
    }

    pub(crate) fn store(&mut self, asset: T) {
        self.state = AssetState::Ready(Arc::new(asset));
        self.version += 1;
    }

    pub fn asset(&self) -> Option<&Arc<T>> {
        self.state.asset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_bumps_version() {
        let mut entry = AssetEntry::reserved(AssetSource::named("mono"));
        assert_eq!(entry.state.load_state(), LoadState::Reserved);
        assert_eq!(entry.version, 0);

        entry.store(7u8);
        entry.store(8u8);
        assert_eq!(entry.version, 2);
        assert_eq!(entry.asset().map(|a| **a), Some(8));
    }

    #[test]
    fn test_settled_states() {
        assert!(!LoadState::Reserved.is_settled());
        assert!(!LoadState::Loading.is_settled());
        assert!(LoadState::Ready.is_settled());
        assert!(LoadState::Failed.is_settled());
        assert_eq!(LoadState::Failed.to_string(), "failed");
    }
}
