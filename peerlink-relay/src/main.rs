use anyhow::Result;
use peerlink_relay::{RelayConfig, RelayService, serve};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = RelayConfig::from_env()?;
    info!("Starting signaling relay on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    serve(listener, RelayService::new()).await?;
    Ok(())
}
