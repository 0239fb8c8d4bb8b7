use std::sync::Arc;

use lens_core::{Article, Category, GroundedModel, GroundedResponse};
use lens_storage::SourceRegistry;
use tracing::{info, warn};

use crate::extract::Extractor;
use crate::prompt;

/// Runs grounded queries against the model with the registry's enabled
/// portals and shapes the citations into articles.
///
/// Every fetch degrades to an empty list on model failure; callers treat
/// "empty" as a terminal state and never see the error.
pub struct FeedManager {
    model: Arc<dyn GroundedModel>,
    registry: Arc<SourceRegistry>,
}

impl FeedManager {
    pub fn new(model: Arc<dyn GroundedModel>, registry: Arc<SourceRegistry>) -> Self {
        Self { model, registry }
    }

    pub fn registry(&self) -> &Arc<SourceRegistry> {
        &self.registry
    }

    async fn generate(&self, prompt: &str) -> GroundedResponse {
        match self.model.generate_grounded(prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("⚠️ Grounded query failed, returning empty result: {}", e);
                GroundedResponse::default()
            }
        }
    }

    /// Category fetch: first 8 citations, no homepage screening.
    pub async fn fetch_category(&self, category: Category) -> Vec<Article> {
        let sources = self.registry.enabled_names().await;
        let prompt = prompt::category_prompt(category, &sources);
        let response = self.generate(&prompt).await;

        let articles = Extractor::for_category(category).extract(&response.chunks);
        info!(
            "📰 {} articles from {} citations for {}",
            articles.len(),
            response.chunks.len(),
            category
        );
        articles
    }

    /// Source-filtered category fetch: first 10 citations, homepage
    /// heuristic active.
    pub async fn fetch_category_filtered(&self, category: Category) -> Vec<Article> {
        let sources = self.registry.enabled_names().await;
        let prompt = prompt::category_prompt(category, &sources);
        let response = self.generate(&prompt).await;

        let articles = Extractor::for_filtered_category(category).extract(&response.chunks);
        info!(
            "📰 {} filtered articles from {} citations for {}",
            articles.len(),
            response.chunks.len(),
            category
        );
        articles
    }

    /// Free-text search across the enabled portals; results land in
    /// Latest.
    pub async fn search(&self, query: &str) -> Vec<Article> {
        let sources = self.registry.enabled_names().await;
        let prompt = prompt::search_prompt(query, &sources);
        let response = self.generate(&prompt).await;

        let articles = Extractor::for_search(query).extract(&response.chunks);
        info!("🔍 {} results for \"{}\"", articles.len(), query);
        articles
    }
}
