use anyhow::{Context, Result, bail};
use pocket_chef::{config, server};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Builds the log filter. `RUST_LOG` wins over `server.logs.level`.
fn log_filter(configured: &str) -> Result<EnvFilter> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured.to_string());

    if level.parse::<LevelFilter>().is_err() {
        bail!(
            "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
            level
        );
    }

    EnvFilter::try_new(&level).with_context(|| format!("Failed to build log filter '{}'", level))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is not up yet, so startup errors surface through main's Err.
    let config = config::load()
        .await
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.server.logs.level)?)
        .json()
        .init();

    info!(
        "Starting PocketChef on {}:{} (max {} results per search)",
        config.server.host, config.server.port, config.media.max_results
    );

    server::run(config).await?;

    Ok(())
}
