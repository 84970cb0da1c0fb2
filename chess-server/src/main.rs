use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chess_server::{server, RoomDirectory, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("chess_server=debug".parse()?))
        .init();

    info!("Chess room coordinator starting...");

    let config = ServerConfig::from_env();
    let rooms = Arc::new(RoomDirectory::new());
    let server = server::start(config, rooms)?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    server.shutdown();
    server.wait().await?;

    Ok(())
}
