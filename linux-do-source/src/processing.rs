//! Transform stages applied to the category responses:
//! flatten → normalize → sort by recency → dedupe by id.

use crate::types::{NewsItem, RawArticle, RawFeedResponse};
use crate::utils::time::parse_timestamp;
use std::collections::HashMap;
use tracing::debug;

/// Concatenate the items of every response, keeping response order and then
/// per-feed order.
pub fn flatten_responses(responses: Vec<RawFeedResponse>) -> Vec<RawArticle> {
    responses.into_iter().flat_map(|response| response.items).collect()
}

/// `date_modified` when it is set and non-empty, otherwise `date_published`.
pub fn effective_date(article: &RawArticle) -> &str {
    match article.date_modified.as_deref() {
        Some(modified) if !modified.is_empty() => modified,
        _ => article.date_published.as_str(),
    }
}

pub fn normalize_article(article: RawArticle) -> NewsItem {
    NewsItem::from(article)
}

pub fn normalize_articles(articles: Vec<RawArticle>) -> Vec<NewsItem> {
    articles.into_iter().map(normalize_article).collect()
}

/// Most recent first. Dates that do not parse rank below every parseable
/// date. The sort is stable, so equal keys keep their incoming order.
pub fn sort_by_recency(items: &mut [NewsItem]) {
    items.sort_by_cached_key(|item| std::cmp::Reverse(parse_timestamp(&item.extra.date)));
}

/// Collapse items sharing an `id`.
///
/// The first occurrence of an id fixes where it appears in the output; each
/// later occurrence overwrites the stored item. Run after
/// [`sort_by_recency`], this keeps the oldest-or-equal copy at the slot of
/// the newest.
pub fn dedupe_by_id(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let total = items.len();

    let (slots, unique) = items.into_iter().fold(
        (HashMap::<String, usize>::new(), Vec::<NewsItem>::with_capacity(total)),
        |(mut slots, mut unique), item| {
            match slots.get(&item.id) {
                Some(&slot) => unique[slot] = item,
                None => {
                    slots.insert(item.id.clone(), unique.len());
                    unique.push(item);
                }
            }
            (slots, unique)
        },
    );

    debug_assert_eq!(slots.len(), unique.len());
    if unique.len() < total {
        debug!("Collapsed {} duplicate items", total - unique.len());
    }
    unique
}

pub fn process_responses(responses: Vec<RawFeedResponse>) -> Vec<NewsItem> {
    let mut items = normalize_articles(flatten_responses(responses));
    sort_by_recency(&mut items);
    dedupe_by_id(items)
}
