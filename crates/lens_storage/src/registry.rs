use std::sync::Arc;

use lens_core::{KeyValueStore, Result, Source, SOURCES_KEY};
use tokio::sync::RwLock;
use tracing::info;

/// The configured news portals, seeded with defaults and persisted as one
/// record. Source ids are stable across sessions; they key both the
/// persisted record and admin toggles.
pub struct SourceRegistry {
    store: Arc<dyn KeyValueStore>,
    sources: RwLock<Vec<Source>>,
}

fn source(id: &str, name: &str, domain: &str, enabled: bool) -> Source {
    Source {
        id: id.to_string(),
        name: name.to_string(),
        domain: domain.to_string(),
        enabled,
    }
}

/// Seed portal set. The five the query prompt prioritizes start
/// enabled; the rest can be toggled on through the admin surface.
pub fn default_sources() -> Vec<Source> {
    vec![
        source("kantipur", "Kantipur", "ekantipur.com", true),
        source("onlinekhabar", "OnlineKhabar", "onlinekhabar.com", true),
        source("setopati", "Setopati", "setopati.com", true),
        source("ratopati", "Ratopati", "ratopati.com", true),
        source(
            "myrepublica",
            "MyRepublica",
            "myrepublica.nagariknetwork.com",
            true,
        ),
        source("kathmandupost", "The Kathmandu Post", "kathmandupost.com", false),
        source("annapurna", "Annapurna Post", "annapurnapost.com", false),
        source(
            "nagarik",
            "Nagarik News",
            "nagariknews.nagariknetwork.com",
            false,
        ),
    ]
}

impl SourceRegistry {
    /// Restore the registry from storage, falling back to the defaults
    /// when nothing was persisted yet. A present-but-corrupt record
    /// surfaces the parse error instead of being silently reset.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let sources = match store.get(SOURCES_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => default_sources(),
        };

        Ok(Self {
            store,
            sources: RwLock::new(sources),
        })
    }

    pub async fn list(&self) -> Vec<Source> {
        self.sources.read().await.clone()
    }

    /// Flip a source's enabled flag and persist the full set immediately.
    /// Returns the new state, or `None` for an unknown id.
    pub async fn toggle(&self, id: &str) -> Result<Option<bool>> {
        let mut sources = self.sources.write().await;
        let enabled = match sources.iter_mut().find(|s| s.id == id) {
            Some(entry) => {
                entry.enabled = !entry.enabled;
                entry.enabled
            }
            None => return Ok(None),
        };

        let raw = serde_json::to_string(&*sources)?;
        self.store.set(SOURCES_KEY, &raw).await?;
        info!("📡 Source {} now {}", id, if enabled { "enabled" } else { "disabled" });
        Ok(Some(enabled))
    }

    /// Display names of the enabled portals, in registry order. May be
    /// empty; the query path must still work with an empty allow-list.
    pub async fn enabled_names(&self) -> Vec<String> {
        self.sources
            .read()
            .await
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStore;

    #[tokio::test]
    async fn test_defaults_when_nothing_persisted() {
        let store = Arc::new(MemoryStore::new());
        let registry = SourceRegistry::load(store).await.unwrap();
        let sources = registry.list().await;
        assert_eq!(sources.len(), 8);
        assert!(sources.iter().any(|s| s.id == "setopati" && s.enabled));
        assert!(sources.iter().any(|s| s.id == "nagarik" && !s.enabled));
    }

    #[tokio::test]
    async fn test_toggle_twice_persists_final_state() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let registry = SourceRegistry::load(store.clone()).await.unwrap();

        assert_eq!(registry.toggle("kantipur").await.unwrap(), Some(false));
        assert_eq!(registry.toggle("kantipur").await.unwrap(), Some(true));

        // A second registry over the same store sees the final state
        let reloaded = SourceRegistry::load(store).await.unwrap();
        let kantipur = reloaded
            .list()
            .await
            .into_iter()
            .find(|s| s.id == "kantipur")
            .unwrap();
        assert!(kantipur.enabled);
    }

    #[tokio::test]
    async fn test_toggle_unknown_id_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let registry = SourceRegistry::load(store).await.unwrap();
        assert_eq!(registry.toggle("bbc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_record_surfaces_error() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(SOURCES_KEY, "{{ nope").await.unwrap();
        assert!(SourceRegistry::load(store).await.is_err());
    }

    #[tokio::test]
    async fn test_enabled_names_follow_toggles() {
        let store = Arc::new(MemoryStore::new());
        let registry = SourceRegistry::load(store).await.unwrap();
        assert_eq!(registry.enabled_names().await.len(), 5);

        registry.toggle("kathmandupost").await.unwrap();
        let names = registry.enabled_names().await;
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"The Kathmandu Post".to_string()));
    }
}
