use anyhow::Context;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{registry, EnvFilter};

pub fn parse_level(level: &str) -> Result<LevelFilter, anyhow::Error> {
    level
        .parse()
        .with_context(|| format!("Unable to parse log level: {}", level))
}

/// `RUST_LOG` directives when set, otherwise everything at `level` and above.
pub fn build_filter(level: &str) -> Result<EnvFilter, anyhow::Error> {
    let level = parse_level(level)?;
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .context("Unable to parse RUST_LOG")
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init_tracing(level: &str) -> Result<(), anyhow::Error> {
    let filter = build_filter(level)?;
    let subscriber = registry::Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::Layer::default());
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set up tracing subscriber")?;
    info!(log_level = level, "tracing initialized");
    Ok(())
}
