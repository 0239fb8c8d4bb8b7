use std::sync::Arc;

use lens_core::{GroundedModel, KeyValueStore, Result};
use lens_feed::{FeedController, FeedManager};
use lens_storage::{ProfileStore, SourceRegistry};
use tokio::sync::{Mutex, RwLock};

/// Everything the handlers share. The controller sits behind a mutex
/// because it is one logical view state; overlapping requests are
/// last-write-wins, the same accepted race as rapid category switching.
pub struct AppState {
    pub controller: Mutex<FeedController>,
    pub registry: Arc<SourceRegistry>,
    pub profiles: Arc<ProfileStore>,
    /// Session-scoped admin unlock; never persisted.
    pub admin_unlocked: RwLock<bool>,
}

impl AppState {
    pub async fn build(
        store: Arc<dyn KeyValueStore>,
        model: Arc<dyn GroundedModel>,
    ) -> Result<Self> {
        let registry = Arc::new(SourceRegistry::load(store.clone()).await?);
        let profiles = Arc::new(ProfileStore::load(store).await?);
        let controller = FeedController::new(FeedManager::new(model, registry.clone()));

        Ok(Self {
            controller: Mutex::new(controller),
            registry,
            profiles,
            admin_unlocked: RwLock::new(false),
        })
    }
}
