//! # pcbook-server
//!
//! Serves the laptop catalog over gRPC with in-memory laptop and rating
//! stores and images written to disk.

use std::sync::Arc;

use pcbook::{
    grpc, DiskImageStore, InMemoryLaptopStore, InMemoryRatingStore, LaptopService, ServerConfig,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pcbook=debug")),
        )
        .init();

    info!("Starting pcbook server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    let service = Arc::new(LaptopService::new(
        Arc::new(InMemoryLaptopStore::new().with_scan_delay(config.scan_delay)),
        Arc::new(DiskImageStore::new(config.image_dir.clone())),
        Arc::new(InMemoryRatingStore::new()),
    ));

    grpc::serve_with_shutdown(service, config.addr, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
    })
    .await?;

    Ok(())
}
