//! Callboard - studio management dashboard backend

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use callboard::{config::Args, server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("callboard={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let (uri, db_name) = args.database();

    // Print startup banner
    info!("======================================");
    info!("  Callboard - Studio Dashboard");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!(
        "Mode: {}",
        if args.production { "PRODUCTION" } else { "DEVELOPMENT" }
    );
    info!("MongoDB: {} (database '{}')", uri, db_name);
    info!("======================================");

    let state = Arc::new(AppState::new(args.clone()));

    // Probe the database once at startup. The connection itself is lazy
    // and retried per request, so an unreachable database is not fatal.
    match state.connector.get().await {
        Ok(client) => info!("MongoDB connected to '{}'", client.db_name()),
        Err(e) if args.production => {
            warn!("MongoDB unreachable at startup, requests will fail until it returns: {}", e)
        }
        Err(e) => {
            warn!("MongoDB unreachable at startup, serving fixture data in degraded mode: {}", e)
        }
    }

    // Run the server
    if let Err(e) = server::run(state).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
