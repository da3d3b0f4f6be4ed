//! Error types for resource loading.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Errors that can occur while loading a resource.
///
/// Cheap to clone so a failure can be both recorded in the cache and returned
/// to the caller.
#[derive(Debug, Clone)]
pub enum AssetError {
    /// The requested resource was not found.
    NotFound {
        /// The path or URL of the resource.
        path: String,
    },

    /// Failed to read resource data from the source.
    IoError {
        /// The path that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        source: Arc<std::io::Error>,
    },

    /// The resource is not valid UTF-8 text.
    InvalidUtf8 {
        /// The path of the resource.
        path: String,
        /// Decoder message.
        message: String,
    },

    /// Generic error with a message.
    Other {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound { path } => {
                write!(f, "Resource not found: {}", path)
            }
            AssetError::IoError { path, source } => {
                write!(f, "IO error loading '{}': {}", path.display(), source)
            }
            AssetError::InvalidUtf8 { path, message } => {
                write!(f, "Resource '{}' is not valid UTF-8: {}", path, message)
            }
            AssetError::Other { message } => {
                write!(f, "Resource error: {}", message)
            }
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::IoError { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::IoError {
            path: PathBuf::new(),
            source: Arc::new(err),
        }
    }
}

/// Result type alias for resource operations.
pub type AssetResult<T> = Result<T, AssetError>;
