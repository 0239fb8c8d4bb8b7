use lens_core::{Article, Category, GroundingChunk};
use url::Url;
use uuid::Uuid;

/// Citations processed per category fetch.
pub const CATEGORY_FETCH_CAP: usize = 8;
/// Citations processed per source-filtered category fetch.
pub const FILTERED_FETCH_CAP: usize = 10;

const CATEGORY_EXCERPT: &str =
    "Read the latest updates regarding this story on the official portal.";
const SEARCH_EXCERPT: &str = "Search result from the Lens grounding engine.";

pub type UrlPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Best-effort guess whether a URL points at an article rather than a
/// portal homepage: deep path, an .html page, or a query string. False
/// positives and negatives are expected and acceptable.
pub fn looks_like_article(url: &str) -> bool {
    url.split('/').count() > 4 || url.contains(".html") || url.contains('?')
}

/// Drop heading noise: keep everything before the first " - " or " | "
/// separator, whichever comes first.
fn clean_title(title: &str) -> &str {
    let cut = match (title.find(" - "), title.find(" | ")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match cut {
        Some(at) => &title[..at],
        None => title,
    }
}

/// Hostname with any leading "www." stripped; `None` for unparsable URIs.
fn source_host(uri: &str) -> Option<String> {
    let parsed = Url::parse(uri).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Random short token, unique enough for list-rendering keys within one
/// result set.
fn article_id() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(9);
    token
}

fn display_date() -> String {
    chrono::Utc::now().format("%m/%d/%Y").to_string()
}

/// Maps grounding citations to display-ready articles. Built per fetch
/// variant; the homepage predicate is pluggable so the heuristic can be
/// tuned without touching the extraction flow.
pub struct Extractor {
    category: Category,
    index_seed: String,
    excerpt: &'static str,
    cap: Option<usize>,
    seed_by_url: bool,
    predicate: Option<UrlPredicate>,
}

impl Extractor {
    /// Plain category fetch: first 8 citations, no URL screening,
    /// thumbnails seeded by index plus category.
    pub fn for_category(category: Category) -> Self {
        Self {
            category,
            index_seed: category.to_string(),
            excerpt: CATEGORY_EXCERPT,
            cap: Some(CATEGORY_FETCH_CAP),
            seed_by_url: false,
            predicate: None,
        }
    }

    /// Source-filtered category fetch: first 10 citations, homepage
    /// screening on, thumbnails seeded by the article URL.
    pub fn for_filtered_category(category: Category) -> Self {
        Self {
            category,
            index_seed: category.to_string(),
            excerpt: CATEGORY_EXCERPT,
            cap: Some(FILTERED_FETCH_CAP),
            seed_by_url: true,
            predicate: Some(Box::new(looks_like_article)),
        }
    }

    /// Free-text search: uncapped, results land in Latest, thumbnails
    /// seeded by index plus query.
    pub fn for_search(query: &str) -> Self {
        Self {
            category: Category::Latest,
            index_seed: query.to_string(),
            excerpt: SEARCH_EXCERPT,
            cap: None,
            seed_by_url: false,
            predicate: None,
        }
    }

    /// Swap in a different article-vs-homepage heuristic.
    pub fn with_predicate(mut self, predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    fn thumbnail(&self, index: usize, url: &str) -> String {
        if self.seed_by_url {
            format!("https://picsum.photos/seed/{}/800/450", url)
        } else {
            format!("https://picsum.photos/seed/{}{}/800/450", index, self.index_seed)
        }
    }

    /// Walk the citations in order and keep the ones that qualify.
    /// Citations without a web URI, with an unparsable URI, or rejected
    /// by the predicate are skipped silently; anything past the cap is
    /// not looked at. Zero qualifying citations is a valid empty result.
    pub fn extract(&self, chunks: &[GroundingChunk]) -> Vec<Article> {
        let mut articles = Vec::new();

        for (index, chunk) in chunks.iter().enumerate() {
            if self.cap.is_some_and(|cap| index >= cap) {
                break;
            }
            let Some(web) = chunk.web.as_ref() else {
                continue;
            };
            let Some(source) = source_host(&web.uri) else {
                continue;
            };
            if let Some(predicate) = &self.predicate {
                if !predicate(&web.uri) {
                    continue;
                }
            }

            let title = match web.title.as_deref() {
                Some(title) if !title.is_empty() => clean_title(title).to_string(),
                _ => format!("News from {}", source),
            };

            articles.push(Article {
                id: article_id(),
                title,
                excerpt: self.excerpt.to_string(),
                source,
                url: web.uri.clone(),
                published_at: display_date(),
                category: self.category,
                thumbnail: self.thumbnail(index, &web.uri),
            });
        }

        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::WebSource;

    fn chunk(uri: &str, title: Option<&str>) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.map(|t| t.to_string()),
            }),
        }
    }

    #[test]
    fn test_title_cleaning() {
        assert_eq!(
            clean_title("Flooding hits Kathmandu - ekantipur"),
            "Flooding hits Kathmandu"
        );
        assert_eq!(clean_title("Budget passed | OnlineKhabar"), "Budget passed");
        assert_eq!(
            clean_title("Left intact - here | not there"),
            "Left intact"
        );
        assert_eq!(clean_title("No separator at all"), "No separator at all");
    }

    #[test]
    fn test_source_derivation() {
        assert_eq!(
            source_host("https://www.setopati.com/story/123").as_deref(),
            Some("setopati.com")
        );
        assert_eq!(
            source_host("https://ekantipur.com/news/1").as_deref(),
            Some("ekantipur.com")
        );
        assert!(source_host("not a uri").is_none());
    }

    #[test]
    fn test_homepage_predicate() {
        assert!(!looks_like_article("https://ratopati.com"));
        assert!(looks_like_article("https://ratopati.com/news/123456"));
        assert!(looks_like_article("https://ratopati.com/x.html"));
        assert!(looks_like_article("https://ratopati.com/?id=9"));
    }

    #[test]
    fn test_category_cap() {
        let chunks: Vec<_> = (0..20)
            .map(|i| chunk(&format!("https://ekantipur.com/news/{}", i), Some("T")))
            .collect();

        let articles = Extractor::for_category(Category::Sports).extract(&chunks);
        assert_eq!(articles.len(), CATEGORY_FETCH_CAP);

        let articles = Extractor::for_filtered_category(Category::Sports).extract(&chunks);
        assert_eq!(articles.len(), FILTERED_FETCH_CAP);

        let articles = Extractor::for_search("anything").extract(&chunks);
        assert_eq!(articles.len(), 20);
    }

    #[test]
    fn test_filtered_variant_drops_homepages() {
        let chunks = vec![
            chunk("https://ratopati.com", Some("Ratopati")),
            chunk("https://ratopati.com/news/123456", Some("Story - Ratopati")),
        ];

        let articles = Extractor::for_filtered_category(Category::Latest).extract(&chunks);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Story");
        assert_eq!(articles[0].source, "ratopati.com");

        // The unfiltered variant keeps the homepage link
        let articles = Extractor::for_category(Category::Latest).extract(&chunks);
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_predicate_is_pluggable() {
        let chunks = vec![
            chunk("https://ekantipur.com/a", None),
            chunk("https://setopati.com/b", None),
        ];

        let articles = Extractor::for_filtered_category(Category::Latest)
            .with_predicate(|url| url.contains("setopati"))
            .extract(&chunks);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "setopati.com");
    }

    #[test]
    fn test_skips_chunks_without_usable_uri() {
        let chunks = vec![
            GroundingChunk { web: None },
            chunk("::garbage::", Some("Broken")),
            chunk("https://onlinekhabar.com/2081/04/story", None),
        ];

        let articles = Extractor::for_category(Category::Economy).extract(&chunks);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "News from onlinekhabar.com");
        assert_eq!(articles[0].category, Category::Economy);
    }

    #[test]
    fn test_empty_chunks_yield_empty_list() {
        let articles = Extractor::for_category(Category::World).extract(&[]);
        assert!(articles.is_empty());
    }

    #[test]
    fn test_ids_unique_within_result_set() {
        let chunks: Vec<_> = (0..8)
            .map(|i| chunk(&format!("https://ekantipur.com/news/{}", i), None))
            .collect();
        let articles = Extractor::for_category(Category::Latest).extract(&chunks);
        let mut ids: Vec<_> = articles.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), articles.len());
    }

    #[test]
    fn test_thumbnail_seeding() {
        let chunks = vec![chunk("https://ekantipur.com/news/5.html", None)];

        let by_index = Extractor::for_category(Category::Sports).extract(&chunks);
        assert_eq!(
            by_index[0].thumbnail,
            "https://picsum.photos/seed/0Sports/800/450"
        );

        let by_url = Extractor::for_filtered_category(Category::Sports).extract(&chunks);
        assert!(by_url[0].thumbnail.contains("ekantipur.com/news/5.html"));
    }
}
