use std::path::PathBuf;
use std::sync::Arc;

use lens_core::{KeyValueStore, Result};

pub mod backends;
pub mod profile;
pub mod registry;

pub use backends::{FileStore, MemoryStore};
pub use profile::{mock_accounts, ProfileStore};
pub use registry::{default_sources, SourceRegistry};

/// Where the file backend keeps its document when no data dir is given.
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lens")
        .join("store.json")
}

/// Build a key-value store by backend name (`memory` or `file`).
pub async fn create_store(
    kind: &str,
    data_dir: Option<PathBuf>,
) -> Result<Arc<dyn KeyValueStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            let path = data_dir
                .map(|dir| dir.join("store.json"))
                .unwrap_or_else(default_data_path);
            Ok(Arc::new(FileStore::open(&path).await?))
        }
        other => Err(lens_core::Error::Storage(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::{create_store, ProfileStore, SourceRegistry};
    pub use lens_core::{KeyValueStore, Result};
}
