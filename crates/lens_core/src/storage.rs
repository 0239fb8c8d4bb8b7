use async_trait::async_trait;

use crate::Result;

/// Storage record holding the serialized source list.
pub const SOURCES_KEY: &str = "sources";

/// Storage record holding the serialized user profile, absent when
/// nobody is signed in.
pub const USER_KEY: &str = "user";

/// Durable key-value storage with a plain get/set contract; any
/// backend can stand in.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a record, `None` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a record, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a record. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
