use std::collections::HashMap;

use async_trait::async_trait;
use lens_core::{KeyValueStore, Result};
use tokio::sync::RwLock;

/// Volatile key-value store. Default for tests and for running the CLI
/// without touching the disk.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(key);
        Ok(())
    }
}
