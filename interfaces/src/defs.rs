use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItemExtra {
    pub date: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub extra: NewsItemExtra,
    pub url: String,
}

// Object style note:
// A source is a zero-argument producer. Whatever goes wrong while producing
// (network, decoding, ...) stays inside the source: the scheduler only ever
// sees a list of items, possibly empty. Sources hold their own configuration
// and are shared behind an `Arc` so one instance can sit under several names.

#[async_trait]
pub trait Source: Send + Sync {
    fn source_name(&self) -> String;

    async fn fetch(&self) -> Vec<NewsItem>;
}
