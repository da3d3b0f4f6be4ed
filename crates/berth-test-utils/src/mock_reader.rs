//! Recording byte reader for resource loading tests.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use berth_assets::{AssetError, BytesFuture, BytesReader};
use parking_lot::Mutex;

/// In-memory reader that records every read.
///
/// Methods take `&self` so a test can keep an `Arc<MockReader>` while the
/// cache under test reads through it.
///
/// ```rust
/// use std::sync::Arc;
/// use berth_assets::ResourceCache;
/// use berth_test_utils::MockReader;
///
/// let reader = Arc::new(MockReader::new().with_file("a.html", "<a/>"));
/// let cache = ResourceCache::new(reader.clone());
///
/// pollster::block_on(cache.import_resource("a.html")).unwrap();
/// pollster::block_on(cache.import_resource("a.html")).unwrap();
/// assert_eq!(reader.read_count("a.html"), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockReader {
    files: Mutex<HashMap<String, Vec<u8>>>,
    failing: Mutex<HashSet<String>>,
    reads: Mutex<Vec<String>>,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, contents: &str) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn insert(&self, path: &str, contents: &str) {
        self.files
            .lock()
            .insert(path.to_string(), contents.as_bytes().to_vec());
    }

    pub fn insert_bytes(&self, path: &str, bytes: Vec<u8>) {
        self.files.lock().insert(path.to_string(), bytes);
    }

    /// Make reads of `path` fail with an I/O error until [`MockReader::heal`].
    pub fn fail(&self, path: &str) {
        self.failing.lock().insert(path.to_string());
    }

    pub fn heal(&self, path: &str) {
        self.failing.lock().remove(path);
    }

    /// Every path read so far, in order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }

    pub fn read_count(&self, path: &str) -> usize {
        self.reads.lock().iter().filter(|p| *p == path).count()
    }
}

impl BytesReader for MockReader {
    fn read_bytes(&self, path: &Path) -> BytesFuture {
        let key = path.to_string_lossy().to_string();
        self.reads.lock().push(key.clone());

        let result = if self.failing.lock().contains(&key) {
            Err(AssetError::from(std::io::Error::other(format!("mock failure for {key}"))))
        } else {
            self.files
                .lock()
                .get(&key)
                .cloned()
                .ok_or(AssetError::NotFound { path: key })
        };
        Box::pin(async move { result })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .contains_key(path.to_string_lossy().as_ref())
    }
}
