pub mod controller;
pub mod extract;
pub mod manager;
pub mod prompt;

pub use controller::{FeedController, LoadPhase, ViewState};
pub use extract::{looks_like_article, Extractor, CATEGORY_FETCH_CAP, FILTERED_FETCH_CAP};
pub use manager::FeedManager;

pub mod prelude {
    pub use super::{FeedController, FeedManager};
    pub use lens_core::{Article, Category, Result};
}
