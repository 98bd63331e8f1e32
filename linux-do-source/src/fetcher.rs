use crate::traits::FetchJson;
use crate::types::{AggregatorError, FetchConfig, Result};
use crate::utils::time::format_duration;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect)
            .build()?;

        Ok(Self { client, config })
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>> {
        let start_time = Instant::now();
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.config.max_body_bytes {
                return Err(AggregatorError::FeedTooLarge {
                    url: url.to_string(),
                    size_bytes: content_length as usize,
                });
            }
        }

        let body = response.bytes().await?;
        if body.len() > self.config.max_body_bytes {
            return Err(AggregatorError::FeedTooLarge {
                url: url.to_string(),
                size_bytes: body.len(),
            });
        }

        info!(
            "Fetched {} ({} bytes in {})",
            url,
            body.len(),
            format_duration(start_time.elapsed())
        );
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FetchJson for Fetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let body = self.fetch_body(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
