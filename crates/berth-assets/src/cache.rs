//! Cache-or-fetch resolution of text resources.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use berth_core::alloc::HashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::{Mutex, RwLock};

use crate::error::{AssetError, AssetResult};
use crate::io::{BytesFuture, BytesReader};
use crate::state::{AssetState, LoadState};

type Entries = Arc<RwLock<HashMap<String, AssetState<str>>>>;
type SharedLoad = Shared<BoxFuture<'static, AssetResult<Arc<str>>>>;
type InFlight = Arc<Mutex<HashMap<String, SharedLoad>>>;

/// Shared cache of decoded text resources keyed by URL.
///
/// Cloning is cheap; clones share the same entries and reader, so a load
/// spawned from one clone is visible through every other.
#[derive(Clone)]
pub struct ResourceCache {
    reader: Arc<dyn BytesReader>,
    entries: Entries,
    in_flight: InFlight,
}

impl ResourceCache {
    pub fn new(reader: impl BytesReader + 'static) -> Self {
        Self {
            reader: Arc::new(reader),
            entries: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether `url` is loaded and ready.
    pub fn has_resource(&self, url: &str) -> bool {
        self.entries
            .read()
            .get(url)
            .is_some_and(AssetState::is_ready)
    }

    /// The cached text for `url`, if loaded.
    pub fn get_resource(&self, url: &str) -> Option<Arc<str>> {
        self.entries.read().get(url).and_then(AssetState::get_cloned)
    }

    /// Seed the cache with already-available text.
    pub fn insert(&self, url: impl Into<String>, text: impl Into<Arc<str>>) {
        self.entries
            .write()
            .insert(url.into(), AssetState::Ready(text.into()));
    }

    pub fn load_state(&self, url: &str) -> LoadState {
        self.entries
            .read()
            .get(url)
            .map(LoadState::from)
            .unwrap_or(LoadState::NotLoaded)
    }

    /// The error recorded by the last failed import of `url`.
    pub fn last_error(&self, url: &str) -> Option<Arc<AssetError>> {
        self.entries.read().get(url).and_then(|s| s.error().cloned())
    }

    /// Resolve `url`, reading it through the reader unless already cached.
    ///
    /// The read is started before this returns; the future only decodes and
    /// records the result. Imports of a URL that is already loading join the
    /// in-flight read instead of starting another. A failure is recorded and
    /// returned, and the next import of the same URL reads again.
    pub fn import_resource(
        &self,
        url: &str,
    ) -> impl Future<Output = AssetResult<Arc<str>>> + use<> {
        let pending: Result<Arc<str>, SharedLoad> = match self.get_resource(url) {
            Some(text) => Ok(text),
            None => Err(self.join_or_start(url)),
        };

        async move {
            match pending {
                Ok(text) => Ok(text),
                Err(load) => load.await,
            }
        }
    }

    fn join_or_start(&self, url: &str) -> SharedLoad {
        let mut in_flight = self.in_flight.lock();
        if let Some(load) = in_flight.get(url) {
            tracing::trace!("joining in-flight load of {}", url);
            return load.clone();
        }

        tracing::debug!("importing resource {}", url);
        self.entries
            .write()
            .insert(url.to_string(), AssetState::Loading);
        let read = self.reader.read_bytes(Path::new(url));
        let load = Self::decode(
            url.to_string(),
            read,
            Arc::clone(&self.entries),
            Arc::clone(&self.in_flight),
        )
        .boxed()
        .shared();
        in_flight.insert(url.to_string(), load.clone());
        load
    }

    async fn decode(
        url: String,
        read: BytesFuture,
        entries: Entries,
        in_flight: InFlight,
    ) -> AssetResult<Arc<str>> {
        let decoded = read.await.and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| AssetError::InvalidUtf8 {
                path: url.clone(),
                message: e.to_string(),
            })
        });
        in_flight.lock().remove(&url);

        match decoded {
            Ok(text) => {
                let text: Arc<str> = Arc::from(text);
                entries
                    .write()
                    .insert(url, AssetState::Ready(Arc::clone(&text)));
                Ok(text)
            }
            Err(err) => {
                tracing::warn!("failed to load resource {}: {}", url, err);
                entries
                    .write()
                    .insert(url, AssetState::Failed(Arc::new(err.clone())));
                Err(err)
            }
        }
    }

    /// Import several resources, resolving in order.
    pub fn import_resources<I, S>(
        &self,
        urls: I,
    ) -> impl Future<Output = Vec<AssetResult<Arc<str>>>> + use<I, S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let imports: Vec<_> = urls
            .into_iter()
            .map(|url| self.import_resource(url.as_ref()))
            .collect();

        async move {
            let mut results = Vec::with_capacity(imports.len());
            for import in imports {
                results.push(import.await);
            }
            results
        }
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
