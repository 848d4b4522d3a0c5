//! Health check endpoints
//!
//! - /health, /healthz - liveness probe; always 200 while the process runs
//! - /version - build information for deployment verification
//!
//! The health body reports whether the shared MongoDB connection has been
//! established and whether the in-memory degraded mode is available, so
//! an operator can tell "up and durable" from "up on fixture data".

use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::routes::{json_response, FullBody};
use crate::server::AppState;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    /// True while the service is running
    pub healthy: bool,
    /// Service version
    pub version: &'static str,
    /// Operating mode
    pub mode: String,
    /// Database connection status
    pub database: DatabaseHealth,
    /// Current timestamp
    pub timestamp: String,
}

/// Database connection status
#[derive(Serialize)]
pub struct DatabaseHealth {
    /// Whether the lazy shared connection has been established
    pub connected: bool,
    /// Whether the in-memory fallback may serve requests (never in
    /// production)
    #[serde(rename = "degradedModeAvailable")]
    pub degraded_mode_available: bool,
}

/// Handle liveness probe (/health, /healthz)
pub fn health_check(state: &AppState) -> Response<FullBody> {
    let connected = state.connector.is_connected();

    let response = HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        mode: if state.args.production {
            "production".to_string()
        } else {
            "development".to_string()
        },
        database: DatabaseHealth {
            connected,
            degraded_mode_available: !state.args.production,
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    json_response(StatusCode::OK, &response)
}

/// Version information for deployment verification
#[derive(Serialize)]
pub struct VersionResponse {
    /// Cargo package version
    pub version: &'static str,
    /// Git commit hash (short)
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Handle version endpoint (/version)
pub fn version_info() -> Response<FullBody> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "callboard",
    };

    json_response(StatusCode::OK, &response)
}
