//! Byte sources for resource loading.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use berth_core::alloc::HashMap;

use crate::error::{AssetError, AssetResult};

/// Future type for async byte loading.
pub type BytesFuture = Pin<Box<dyn Future<Output = AssetResult<Vec<u8>>> + Send + 'static>>;

/// Trait for loading bytes from various sources.
pub trait BytesReader: Send + Sync {
    /// Read all bytes from a path.
    fn read_bytes(&self, path: &Path) -> BytesFuture;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

impl<R: BytesReader + ?Sized> BytesReader for Arc<R> {
    fn read_bytes(&self, path: &Path) -> BytesFuture {
        (**self).read_bytes(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// Filesystem reader rooted at a base directory.
///
/// Uses blocking I/O wrapped in ready futures.
pub struct FileReader {
    base_path: PathBuf,
}

impl FileReader {
    /// Create a new file reader with a base path.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Read bytes synchronously.
    pub fn read_bytes_sync(&self, path: &Path) -> AssetResult<Vec<u8>> {
        let full_path = self.resolve_path(path);
        std::fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound {
                    path: full_path.display().to_string(),
                }
            } else {
                AssetError::IoError {
                    path: full_path.clone(),
                    source: Arc::new(e),
                }
            }
        })
    }
}

impl BytesReader for FileReader {
    fn read_bytes(&self, path: &Path) -> BytesFuture {
        let result = self.read_bytes_sync(path);
        Box::pin(async move { result })
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve_path(path).exists()
    }
}

/// In-memory reader for embedded templates and tests.
#[derive(Default)]
pub struct MemoryReader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add bytes for a path.
    pub fn insert(&mut self, path: impl AsRef<str>, bytes: Vec<u8>) {
        self.files.insert(path.as_ref().to_string(), bytes);
    }

    /// Add bytes from static data.
    pub fn insert_static(&mut self, path: impl AsRef<str>, bytes: &'static [u8]) {
        self.files.insert(path.as_ref().to_string(), bytes.to_vec());
    }

    pub fn remove(&mut self, path: impl AsRef<str>) -> Option<Vec<u8>> {
        self.files.remove(path.as_ref())
    }
}

impl BytesReader for MemoryReader {
    fn read_bytes(&self, path: &Path) -> BytesFuture {
        let key = path.to_string_lossy().to_string();
        let result = self
            .files
            .get(&key)
            .cloned()
            .ok_or(AssetError::NotFound { path: key });

        Box::pin(async move { result })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path.to_string_lossy().as_ref())
    }
}
