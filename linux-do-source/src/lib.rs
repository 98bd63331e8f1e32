pub mod types;
pub mod config;
pub mod traits;
pub mod fetcher;
pub mod processing;
pub mod sources;
pub mod utils;

pub use types::*;
pub use config::SourceConfig;
pub use traits::FetchJson;
pub use fetcher::Fetcher;
pub use sources::{register, LinuxDoSource};
