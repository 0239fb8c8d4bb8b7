use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// News categories exposed by the feed. Serialized as their display names
/// so stored profiles and API responses read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Latest,
    Politics,
    Economy,
    Sports,
    Entertainment,
    Technology,
    World,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Latest,
            Category::Politics,
            Category::Economy,
            Category::Sports,
            Category::Entertainment,
            Category::Technology,
            Category::World,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Latest => "Latest",
            Category::Politics => "Politics",
            Category::Economy => "Economy",
            Category::Sports => "Sports",
            Category::Entertainment => "Entertainment",
            Category::Technology => "Technology",
            Category::World => "World",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(Category::Latest),
            "politics" => Ok(Category::Politics),
            "economy" => Ok(Category::Economy),
            "sports" => Ok(Category::Sports),
            "entertainment" => Ok(Category::Entertainment),
            "technology" => Ok(Category::Technology),
            "world" => Ok(Category::World),
            other => Err(Error::UnknownCategory(other.to_string())),
        }
    }
}

/// A display-ready article assembled from one grounding citation.
/// Built fresh for every query response and never persisted; the id is
/// only unique within a single result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub source: String,
    pub url: String,
    pub published_at: String,
    pub category: Category,
    pub thumbnail: String,
}

/// A configured news portal. `enabled` is the only mutable field and is
/// flipped through the admin surface only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub enabled: bool,
}

/// A signed-in identity plus per-category interaction counts.
/// BTreeMap keeps interest iteration alphabetical, which is the documented
/// tie-break for the favorite category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(default)]
    pub interests: BTreeMap<String, u32>,
}

/// A web citation attached to a grounded generation. Entries without a
/// `web` payload carry no usable reference and are skipped downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// What a grounded generation call yields: the free text answer plus the
/// ordered citations the model consulted.
#[derive(Debug, Clone, Default)]
pub struct GroundedResponse {
    pub text: String,
    pub chunks: Vec<GroundingChunk>,
}
