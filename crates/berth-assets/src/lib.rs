//! Resource loading for panel templates and stylesheets.
//!
//! Panels name their content template by URL. The [`ResourceCache`] resolves
//! those URLs through a [`BytesReader`], keeps decoded text around, and lets a
//! host check the cache synchronously before deciding to load asynchronously.
//!
//! ```
//! use berth_assets::{MemoryReader, ResourceCache};
//!
//! let mut reader = MemoryReader::new();
//! reader.insert("panels/console.html", b"<div class=\"console\"></div>".to_vec());
//!
//! let cache = ResourceCache::new(reader);
//! assert!(!cache.has_resource("panels/console.html"));
//!
//! let text = pollster::block_on(cache.import_resource("panels/console.html")).unwrap();
//! assert!(text.contains("console"));
//! assert!(cache.has_resource("panels/console.html"));
//! ```

pub mod cache;
pub mod error;
pub mod io;
pub mod state;

pub use cache::ResourceCache;
pub use error::{AssetError, AssetResult};
pub use io::{BytesFuture, BytesReader, FileReader, MemoryReader};
pub use state::{AssetState, LoadState};
