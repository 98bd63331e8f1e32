use std::collections::HashMap;
use std::sync::Arc;

use crate::defs::NewsItem;
use crate::defs::Source;

/// Name → producer table handed to whatever schedules the sources.
#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under `name`, returning the producer it replaced.
    pub fn register(&mut self, name: impl Into<String>, source: Arc<dyn Source>) -> Option<Arc<dyn Source>> {
        self.sources.insert(name.into(), source)
    }

    /// Registers one producer under several interchangeable names.
    pub fn register_all<I, S>(&mut self, names: I, source: Arc<dyn Source>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register(name, source.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Source>> {
        self.sources.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Runs the producer registered under `name`. `None` means no such name.
    pub async fn fetch(&self, name: &str) -> Option<Vec<NewsItem>> {
        let source = self.get(name)?;
        Some(source.fetch().await)
    }
}
