//! Callboard Copydb - clone the dashboard collections between MongoDB
//! deployments
//!
//! Usage:
//!   callboard-copydb --source-uri mongodb://dev/callboard_dev --target-uri mongodb://prod/callboard
//!
//! Environment variables:
//!   COPY_SOURCE_URI - source MongoDB URI (read from)
//!   COPY_TARGET_URI - target MongoDB URI (written to)
//!   COPY_SOURCE_DB  - expected source database name (default: callboard_dev)
//!   COPY_TARGET_DB  - expected target database name (default: callboard)
//!
//! Existing target documents are never overwritten, so the copy is safe
//! to re-run; a second run over an unchanged source reports every
//! document as skipped. The tool refuses to run when source and target
//! resolve to the same database.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callboard::copydb::{self, CopyConfig};

#[derive(Parser, Debug)]
#[command(name = "callboard-copydb")]
#[command(about = "Copy the dashboard collections between MongoDB deployments")]
#[command(version)]
struct Args {
    /// Source MongoDB connection URI (read from)
    #[arg(long, env = "COPY_SOURCE_URI")]
    source_uri: String,

    /// Target MongoDB connection URI (written to)
    #[arg(long, env = "COPY_TARGET_URI")]
    target_uri: String,

    /// Database name the source URI must resolve to
    #[arg(long, env = "COPY_SOURCE_DB", default_value = "callboard_dev")]
    source_db: String,

    /// Database name the target URI must resolve to
    #[arg(long, env = "COPY_TARGET_DB", default_value = "callboard")]
    target_db: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,callboard=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();

    // Parse arguments
    let args = Args::parse();

    let config = CopyConfig {
        source_uri: args.source_uri,
        target_uri: args.target_uri,
        source_db: args.source_db,
        target_db: args.target_db,
    };

    info!(
        "Copying '{}' -> '{}'",
        config.source_db, config.target_db
    );

    match copydb::run(&config).await {
        Ok(outcomes) => {
            let mut total_upserted = 0;
            for outcome in &outcomes {
                info!(
                    "{}: found {}, upserted {}, skipped {}",
                    outcome.collection, outcome.found, outcome.upserted, outcome.skipped
                );
                total_upserted += outcome.upserted;
            }
            info!("Copy finished: {} new document(s)", total_upserted);
        }
        Err(e) => {
            error!("Copy aborted: {}", e);
            std::process::exit(1);
        }
    }
}
