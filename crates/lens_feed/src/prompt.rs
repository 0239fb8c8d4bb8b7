use lens_core::Category;

/// Instruction for a category fetch. The enabled portal names are listed
/// verbatim; an empty allow-list still produces a valid prompt.
pub fn category_prompt(category: Category, sources: &[String]) -> String {
    format!(
        "Find the latest news articles from Nepal in the category: {}. \
         Prioritize these sources: {}. \
         For each article, provide a catchy title, a short summary of two sentences, \
         the exact source name, and the publication date or time if available. \
         IMPORTANT: Return direct deep links to specific articles, not portal homepages. \
         I will extract the URLs from the grounding metadata.",
        category,
        sources.join(", ")
    )
}

/// Instruction for a free-text search across the enabled portals.
pub fn search_prompt(query: &str, sources: &[String]) -> String {
    format!(
        "Search for news articles related to \"{}\" from Nepal's top news portals ({}). \
         Return direct links to the specific articles.",
        query,
        sources.join(", ")
    )
}
