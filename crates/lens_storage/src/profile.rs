use std::sync::Arc;

use lens_core::{KeyValueStore, Result, UserProfile, USER_KEY};
use tokio::sync::RwLock;
use tracing::info;

/// The optional signed-in identity plus its interest counters, persisted
/// as one record and removed entirely on logout.
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
    profile: RwLock<Option<UserProfile>>,
}

/// The two canned identities the login selector offers. Placeholder for a
/// real credential flow.
pub fn mock_accounts() -> Vec<UserProfile> {
    vec![
        UserProfile {
            name: "Sagar Sharma".to_string(),
            email: "sagar.sharma@gmail.com".to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Sagar".to_string(),
            interests: Default::default(),
        },
        UserProfile {
            name: "Anjali Rai".to_string(),
            email: "anjali.rai@yahoo.com".to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Anjali".to_string(),
            interests: Default::default(),
        },
    ]
}

impl ProfileStore {
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let profile = match store.get(USER_KEY).await? {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };

        Ok(Self {
            store,
            profile: RwLock::new(profile),
        })
    }

    pub async fn current(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    pub async fn login(&self, profile: UserProfile) -> Result<()> {
        let raw = serde_json::to_string(&profile)?;
        self.store.set(USER_KEY, &raw).await?;
        info!("👤 Signed in as {}", profile.name);
        *self.profile.write().await = Some(profile);
        Ok(())
    }

    /// Sign out and delete the stored record, so a subsequent load starts
    /// with no signed-in user.
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(USER_KEY).await?;
        *self.profile.write().await = None;
        Ok(())
    }

    /// Bump the interest counter for a category. Silently does nothing
    /// when nobody is signed in.
    pub async fn record_interaction(&self, category: &str) -> Result<()> {
        let mut guard = self.profile.write().await;
        let Some(profile) = guard.as_mut() else {
            return Ok(());
        };

        *profile.interests.entry(category.to_string()).or_insert(0) += 1;
        let raw = serde_json::to_string(&*profile)?;
        self.store.set(USER_KEY, &raw).await?;
        Ok(())
    }

    /// The category with the highest interaction count. Ties break
    /// alphabetically (interests iterate in key order); `None` when no
    /// interest was ever recorded.
    pub async fn favorite_category(&self) -> Option<String> {
        let guard = self.profile.read().await;
        let profile = guard.as_ref()?;

        let mut favorite: Option<(&String, u32)> = None;
        for (category, &count) in &profile.interests {
            if count > 0 && favorite.map_or(true, |(_, best)| count > best) {
                favorite = Some((category, count));
            }
        }
        favorite.map(|(category, _)| category.clone())
    }
}
