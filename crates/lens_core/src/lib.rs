pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::GroundedModel;
pub use storage::{KeyValueStore, SOURCES_KEY, USER_KEY};
pub use types::{
    Article, Category, GroundedResponse, GroundingChunk, Source, UserProfile, WebSource,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Shared secret unlocking the source-management surface. Plaintext
/// comparison, session-scoped, a placeholder for real authorization.
pub const ADMIN_ACCESS_KEY: &str = "nepal2081";
