//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. One shared
//! `AppState` carries the lazy connector, the per-entity dual-path
//! stores, and the activity logger.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::activity::ActivityLog;
use crate::config::Args;
use crate::db::mongo::Connector;
use crate::db::schemas::{AssetDoc, CompetitorDoc, ExpenseDoc, IdeaDoc, MilestoneDoc, TaskDoc};
use crate::routes::{self, FullBody};
use crate::store::{DualStore, SettingsStore};
use crate::types::Result;

/// Per-entity dual-path stores
pub struct Stores {
    pub tasks: DualStore<TaskDoc>,
    pub assets: DualStore<AssetDoc>,
    pub expenses: DualStore<ExpenseDoc>,
    pub milestones: DualStore<MilestoneDoc>,
    pub ideas: DualStore<IdeaDoc>,
    pub competitors: DualStore<CompetitorDoc>,
}

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Lazy process-wide MongoDB connection
    pub connector: Arc<Connector>,
    pub stores: Stores,
    pub settings: SettingsStore,
    pub activity: ActivityLog,
}

impl AppState {
    pub fn new(args: Args) -> Self {
        let (uri, db_name) = args.database();
        let connector = Arc::new(Connector::new(uri, db_name));
        let production = args.production;

        Self {
            stores: Stores {
                tasks: DualStore::new(Arc::clone(&connector), production),
                assets: DualStore::new(Arc::clone(&connector), production),
                expenses: DualStore::new(Arc::clone(&connector), production),
                milestones: DualStore::new(Arc::clone(&connector), production),
                ideas: DualStore::new(Arc::clone(&connector), production),
                competitors: DualStore::new(Arc::clone(&connector), production),
            },
            settings: SettingsStore::new(Arc::clone(&connector), production),
            activity: ActivityLog::new(Arc::clone(&connector)),
            connector,
            args,
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Callboard listening on {}", state.args.listen);

    if !state.args.production {
        warn!("Development mode - in-memory fallback serves requests when MongoDB is unreachable");
    }

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<FullBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => routes::health_check(&state),

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // CORS preflight
        (Method::OPTIONS, _) => routes::preflight_response(),

        // Collection routes
        _ => routes::handle_api_request(req, Arc::clone(&state)).await,
    };

    Ok(response)
}
