pub mod defs;
pub mod registry;

pub use defs::{NewsItem, NewsItemExtra, Source};
pub use registry::SourceRegistry;
