use anyhow::{bail, Context};
use clap::Parser;
use interfaces::SourceRegistry;
use linux_do_source::{register, FailurePolicy, LinuxDoSource, SourceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fetch the merged linux.do category feed and print it as JSON.
#[derive(Debug, Parser)]
#[command(name = "linux-do-source", version)]
struct Cli {
    /// Registry name to invoke
    #[arg(long, default_value = "linux-do")]
    source: String,

    /// Forum base URL (overrides LINUX_DO_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Category to fetch; repeat to fetch several (overrides LINUX_DO_CATEGORIES)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Merge whichever categories succeed instead of dropping everything on a failure
    #[arg(long)]
    best_effort: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print at most this many items
    #[arg(long)]
    limit: Option<usize>,
}

/// Command line flags win over the `LINUX_DO_*` environment.
fn apply_cli_overrides(mut config: SourceConfig, cli: &Cli) -> SourceConfig {
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if !cli.categories.is_empty() {
        config = config.with_categories(cli.categories.iter().cloned());
    }
    if cli.best_effort {
        config = config.with_failure_policy(FailurePolicy::BestEffort);
    }
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_seconds = timeout;
    }
    config
}

fn limit_items<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = apply_cli_overrides(
        SourceConfig::from_env().context("invalid LINUX_DO_* environment")?,
        &cli,
    );
    config.validate().context("invalid command line")?;

    info!(
        "Fetching {} categories from {} ({:?})",
        config.categories.len(),
        config.base_url,
        config.failure_policy
    );

    let mut registry = SourceRegistry::new();
    register(&mut registry, LinuxDoSource::new(config)?);

    let Some(items) = registry.fetch(&cli.source).await else {
        bail!("unknown source {:?}, expected one of {:?}", cli.source, registry.names());
    };
    let items = limit_items(items, cli.limit);

    println!("{}", serde_json::to_string_pretty(&items)?);
    info!("Printed {} items", items.len());
    Ok(())
}
