use crate::types::{AggregatorError, FailurePolicy, FetchConfig, Result};
use crate::utils::url::{is_valid_base_url, validate_category};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://linux.do";

pub const DEFAULT_CATEGORIES: [&str; 4] = ["latest", "featured", "tutorials", "discussion"];

/// Names the source answers to in a registry.
pub const SOURCE_NAMES: [&str; 2] = ["linux-do", "linux-do-feed"];

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub categories: Vec<String>,
    pub failure_policy: FailurePolicy,
    pub fetch: FetchConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            failure_policy: FailurePolicy::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl SourceConfig {
    /// Defaults overridden by `LINUX_DO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("LINUX_DO_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(categories) = lookup("LINUX_DO_CATEGORIES") {
            config.categories = parse_categories(&categories);
        }
        if let Some(policy) = lookup("LINUX_DO_POLICY") {
            config.failure_policy = policy.parse()?;
        }
        if let Some(timeout) = lookup("LINUX_DO_TIMEOUT_SECONDS") {
            config.fetch.timeout_seconds = timeout
                .trim()
                .parse()
                .map_err(|_| AggregatorError::Config(format!("invalid timeout: {}", timeout)))?;
        }
        if let Some(user_agent) = lookup("LINUX_DO_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_base_url(&self.base_url) {
            return Err(AggregatorError::Config(format!("invalid base URL: {}", self.base_url)));
        }
        if self.categories.is_empty() {
            return Err(AggregatorError::Config("no categories configured".to_string()));
        }
        self.categories.iter().try_for_each(|c| validate_category(c))
    }
}

/// Comma separated list, blanks dropped.
pub fn parse_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_forum() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, "https://linux.do");
        assert_eq!(config.categories, vec!["latest", "featured", "tutorials", "discussion"]);
        assert_eq!(config.failure_policy, FailurePolicy::AllOrNothing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = SourceConfig::from_lookup(lookup_from(&[
            ("LINUX_DO_BASE_URL", "http://localhost:9000"),
            ("LINUX_DO_CATEGORIES", "latest, ,news"),
            ("LINUX_DO_POLICY", "best-effort"),
            ("LINUX_DO_TIMEOUT_SECONDS", "7"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.categories, vec!["latest", "news"]);
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.fetch.timeout_seconds, 7);
    }

    #[test]
    fn invalid_environment_is_rejected() {
        assert!(SourceConfig::from_lookup(lookup_from(&[("LINUX_DO_CATEGORIES", " , ")])).is_err());
        assert!(SourceConfig::from_lookup(lookup_from(&[("LINUX_DO_TIMEOUT_SECONDS", "soon")])).is_err());
        assert!(SourceConfig::from_lookup(lookup_from(&[("LINUX_DO_BASE_URL", "linux.do")])).is_err());
        assert!(SourceConfig::from_lookup(lookup_from(&[("LINUX_DO_CATEGORIES", "latest,a?b")])).is_err());
    }

    #[test]
    fn categories_that_cannot_form_a_url_fail_validation() {
        for bad in ["a/b", "a?b", "a#b", "100%", "two words", ""] {
            let config = SourceConfig::default().with_categories(["latest", bad]);
            assert!(
                matches!(config.validate(), Err(AggregatorError::Config(_))),
                "accepted {:?}",
                bad
            );
        }
        assert!(SourceConfig::default().with_categories(["latest", "news"]).validate().is_ok());
    }
}
