use anyhow::{Context, Result};
use cloudpose::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses a level or an `EnvFilter` directive list.
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| {
        format!(
            "Invalid log filter: '{}'. Use a level (error, warn, info, debug, trace) or directives like 'cloudpose=debug,tower_http=info'",
            directives
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is not up yet, so startup failures go to stderr
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the config file
    let directives =
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());
    let filter = match log_filter(&directives) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting CloudPose gateway with log filter: {}", directives);

    server::run(config).await?;

    Ok(())
}
