use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lens_core::{KeyValueStore, Result};
use tokio::sync::RwLock;

/// Key-value store backed by a single JSON document on disk. The whole
/// map is rewritten on every mutation.
pub struct FileStore {
    path: PathBuf,
    records: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let records = match tokio::fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), value.to_string());
        self.persist(&records).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(key);
        self.persist(&records).await
    }
}
