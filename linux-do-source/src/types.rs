use crate::processing::effective_date;
use serde::{Deserialize, Serialize};
// Use the interfaces crate for the shared output shape
pub use interfaces::defs::{NewsItem, NewsItemExtra, Source};

/// One category feed as served by `<base>/api/<category>.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFeedResponse {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub home_page_url: Option<String>,
    #[serde(default)]
    pub feed_url: Option<String>,
    pub items: Vec<RawArticle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub content_html: Option<String>,
    pub date_published: String,
    #[serde(default)]
    pub date_modified: Option<String>,
    pub url: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<RawArticle> for NewsItem {
    fn from(article: RawArticle) -> Self {
        let date = effective_date(&article).to_string();

        Self {
            id: article.id,
            title: article.title,
            extra: NewsItemExtra {
                date,
                author: article.author,
                tags: article.tags,
            },
            url: article.url,
        }
    }
}

/// What happens to the whole result when a single category fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Any failing category empties the result.
    #[default]
    AllOrNothing,
    /// Failing categories are logged and skipped.
    BestEffort,
}

impl std::str::FromStr for FailurePolicy {
    type Err = AggregatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-or-nothing" | "all_or_nothing" | "strict" => Ok(Self::AllOrNothing),
            "best-effort" | "best_effort" | "partial" => Ok(Self::BestEffort),
            other => Err(AggregatorError::Config(format!("unknown failure policy: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    pub max_body_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "linux-do-source/0.1".to_string(),
            timeout_seconds: 30,
            follow_redirects: true,
            max_redirects: 5,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Feed size exceeds limit: {size_bytes} bytes from {url}")]
    FeedTooLarge { url: String, size_bytes: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Category {category} failed: {source}")]
    Category {
        category: String,
        #[source]
        source: Box<AggregatorError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AggregatorError {
    pub fn in_category(self, category: &str) -> Self {
        Self::Category {
            category: category.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
