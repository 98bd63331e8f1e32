use crate::config::{SourceConfig, SOURCE_NAMES};
use crate::fetcher::Fetcher;
use crate::processing::process_responses;
use crate::traits::FetchJson;
use crate::types::{FailurePolicy, NewsItem, RawFeedResponse, Result, Source};
use crate::utils::url::category_feed_url;
use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use interfaces::SourceRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What one category fetch produced.
#[derive(Debug)]
pub struct CategoryOutcome {
    pub category: String,
    pub result: Result<RawFeedResponse>,
}

/// linux.do category aggregator: fans out one request per configured
/// category, then merges, sorts and dedupes the results.
#[derive(Clone)]
pub struct LinuxDoSource {
    config: Arc<SourceConfig>,
    fetcher: Arc<dyn FetchJson>,
}

impl LinuxDoSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch.clone())?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    pub fn with_fetcher(config: SourceConfig, fetcher: Arc<dyn FetchJson>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            fetcher,
        })
    }

    /// Merged feed across all categories. Failures are logged and turned
    /// into an empty list (or, best-effort, into the categories that worked).
    pub async fn fetch_aggregated_feed(&self) -> Vec<NewsItem> {
        match self.try_fetch_aggregated_feed().await {
            Ok(items) => items,
            Err(e) => {
                error!("Error fetching linux.do feed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_aggregated_feed(&self) -> Result<Vec<NewsItem>> {
        let responses = match self.config.failure_policy {
            FailurePolicy::AllOrNothing => self.fetch_all_categories().await?,
            FailurePolicy::BestEffort => self.fetch_successful_categories().await,
        };

        let items = process_responses(responses);
        info!("Aggregated {} linux.do items", items.len());
        Ok(items)
    }

    /// Fails as soon as any category fails.
    async fn fetch_all_categories(&self) -> Result<Vec<RawFeedResponse>> {
        try_join_all(self.config.categories.iter().map(|category| async move {
            self.fetch_category(category)
                .await
                .map_err(|e| e.in_category(category))
        }))
        .await
    }

    async fn fetch_successful_categories(&self) -> Vec<RawFeedResponse> {
        self.fetch_each_category()
            .await
            .into_iter()
            .filter_map(|outcome| match outcome.result {
                Ok(response) => Some(response),
                Err(e) => {
                    warn!("Skipping linux.do category {}: {}", outcome.category, e);
                    None
                }
            })
            .collect()
    }

    /// Waits for every category and reports each one separately.
    pub async fn fetch_each_category(&self) -> Vec<CategoryOutcome> {
        join_all(self.config.categories.iter().map(|category| async move {
            CategoryOutcome {
                category: category.clone(),
                result: self.fetch_category(category).await,
            }
        }))
        .await
    }

    pub async fn fetch_category(&self, category: &str) -> Result<RawFeedResponse> {
        let url = category_feed_url(&self.config.base_url, category)?;
        let value = self.fetcher.fetch_json(url.as_str()).await?;
        let response: RawFeedResponse = serde_json::from_value(value)?;

        debug!(
            "Category {} ({}): {} items",
            category,
            response.title.as_deref().unwrap_or("untitled"),
            response.items.len()
        );
        Ok(response)
    }
}

#[async_trait]
impl Source for LinuxDoSource {
    fn source_name(&self) -> String {
        SOURCE_NAMES[0].to_string()
    }

    async fn fetch(&self) -> Vec<NewsItem> {
        self.fetch_aggregated_feed().await
    }
}

/// Expose `source` under every linux.do alias.
pub fn register(registry: &mut SourceRegistry, source: LinuxDoSource) {
    registry.register_all(SOURCE_NAMES, Arc::new(source));
}
