//! Per-resource load state.

use std::sync::Arc;

use crate::error::AssetError;

/// The current state of a resource in the cache.
#[derive(Debug)]
pub enum AssetState<T: ?Sized> {
    /// Not loaded yet.
    Unloaded,

    /// A load is in flight.
    Loading,

    /// Loaded and ready for use.
    Ready(Arc<T>),

    /// The last load attempt failed. The next import retries.
    Failed(Arc<AssetError>),
}

impl<T: ?Sized> Default for AssetState<T> {
    fn default() -> Self {
        AssetState::Unloaded
    }
}

impl<T: ?Sized> Clone for AssetState<T> {
    fn clone(&self) -> Self {
        match self {
            AssetState::Unloaded => AssetState::Unloaded,
            AssetState::Loading => AssetState::Loading,
            AssetState::Ready(value) => AssetState::Ready(Arc::clone(value)),
            AssetState::Failed(err) => AssetState::Failed(Arc::clone(err)),
        }
    }
}

impl<T: ?Sized> AssetState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, AssetState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AssetState::Loading)
    }

    /// Get a clone of the value if ready.
    pub fn get_cloned(&self) -> Option<Arc<T>> {
        match self {
            AssetState::Ready(value) => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Get the error if the last load failed.
    pub fn error(&self) -> Option<&Arc<AssetError>> {
        match self {
            AssetState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Coarse load progress, for hosts that only need to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

impl LoadState {
    /// Returns true if loading has completed (successfully or not).
    pub fn is_done(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

impl<T: ?Sized> From<&AssetState<T>> for LoadState {
    fn from(state: &AssetState<T>) -> Self {
        match state {
            AssetState::Unloaded => LoadState::NotLoaded,
            AssetState::Loading => LoadState::Loading,
            AssetState::Ready(_) => LoadState::Loaded,
            AssetState::Failed(_) => LoadState::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_from_asset_state() {
        let ready: AssetState<str> = AssetState::Ready(Arc::from("x"));
        assert_eq!(LoadState::from(&ready), LoadState::Loaded);
        assert!(LoadState::from(&ready).is_done());

        let loading: AssetState<str> = AssetState::Loading;
        assert_eq!(LoadState::from(&loading), LoadState::Loading);
        assert!(!LoadState::from(&loading).is_done());
    }

    #[test]
    fn test_failed_state_exposes_error() {
        let failed: AssetState<str> = AssetState::Failed(Arc::new(AssetError::Other {
            message: "boom".to_string(),
        }));
        assert!(failed.error().is_some());
        assert!(failed.get_cloned().is_none());
    }
}
