use lens_core::{Article, Category};

use crate::manager::FeedManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
}

/// The transient view state, rebuilt on every category change or search.
#[derive(Debug)]
pub struct ViewState {
    pub active_category: Category,
    pub articles: Vec<Article>,
    pub phase: LoadPhase,
    pub is_searching: bool,
}

/// Orchestrates which category or query is active and holds the current
/// article list for rendering.
///
/// Single state object, mutated only between suspend points. A new
/// selection simply overwrites whatever the previous fetch left behind;
/// there is no cancellation and no error state — a failed fetch looks
/// exactly like an empty result.
pub struct FeedController {
    manager: FeedManager,
    state: ViewState,
    filtered: bool,
}

impl FeedController {
    pub fn new(manager: FeedManager) -> Self {
        Self {
            manager,
            state: ViewState {
                active_category: Category::Latest,
                articles: Vec::new(),
                phase: LoadPhase::Idle,
                is_searching: false,
            },
            filtered: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn manager(&self) -> &FeedManager {
        &self.manager
    }

    async fn load_category(&mut self, category: Category, filtered: bool) {
        self.state.phase = LoadPhase::Loading;
        self.state.is_searching = false;
        self.state.active_category = category;
        self.filtered = filtered;

        let articles = if filtered {
            self.manager.fetch_category_filtered(category).await
        } else {
            self.manager.fetch_category(category).await
        };

        self.state.articles = articles;
        self.state.phase = LoadPhase::Loaded;
    }

    pub async fn select_category(&mut self, category: Category) {
        self.load_category(category, false).await;
    }

    /// Category fetch with the homepage heuristic active.
    pub async fn select_category_filtered(&mut self, category: Category) {
        self.load_category(category, true).await;
    }

    pub async fn search(&mut self, query: &str) {
        self.state.phase = LoadPhase::Loading;
        self.state.is_searching = true;

        let articles = self.manager.search(query).await;

        self.state.articles = articles;
        self.state.phase = LoadPhase::Loaded;
    }

    /// Re-fetch the active category with the current enabled set — the
    /// admin "save & apply" path. Already-fetched articles are never
    /// re-filtered in place; search mode falls back to the category view.
    pub async fn refresh(&mut self) {
        self.load_category(self.state.active_category, self.filtered).await;
    }

    /// The featured first article; suppressed in search mode.
    pub fn hero(&self) -> Option<&Article> {
        if self.state.is_searching {
            None
        } else {
            self.state.articles.first()
        }
    }

    /// Everything below the hero; in search mode, the full result list.
    pub fn grid(&self) -> &[Article] {
        if self.state.is_searching {
            &self.state.articles
        } else {
            self.state.articles.get(1..).unwrap_or_default()
        }
    }

    pub fn section_heading(&self) -> String {
        if self.state.is_searching {
            "Search Results".to_string()
        } else {
            format!("More in {}", self.state.active_category)
        }
    }
}
