use crate::types::Result;
use async_trait::async_trait;

/// Anything that can GET a URL and hand back the decoded JSON body.
///
/// Implementations must fail on transport errors and on non-2xx statuses;
/// they do not retry.
#[async_trait]
pub trait FetchJson: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value>;
}
