//! Relay server entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use glochat_core::config::ConfigLoader;
use glochat_core::logging::init_logging;
use glochat_providers::{ChatProvider, OpenAiClient};
use glochat_relay::{run_server, AppState};

#[derive(Parser)]
#[command(name = "glochat-relay")]
#[command(about = "Relay server between chat clients and the completion provider")]
#[command(version)]
struct Cli {
    /// Configuration directory
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;

    let _guard = init_logging(&config.logging);

    let provider: Option<Arc<dyn ChatProvider>> = match OpenAiClient::new(
        config.provider.api_key.clone(),
        config.provider.api_base.as_str(),
        config.provider.model.as_str(),
        config.provider.max_tokens,
        config.provider.temperature,
    ) {
        Ok(client) => {
            info!(
                "Provider configured: {} ({})",
                config.provider.api_base, config.provider.model
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            // The server still starts; every chat request will answer
            // with the generic failure until a key is configured.
            warn!("Provider not available: {}", e);
            None
        }
    };

    let port = cli.port.unwrap_or(config.server.port);
    run_server(AppState::new(provider), &config.server.host, port).await
}
