//! Activity feed endpoint
//!
//! `GET /activities` returns the five most recent audit entries, newest
//! first, falling back to the in-memory buffer on any database error.

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};

use crate::routes::{error_response, json_response, to_api_json, FullBody};
use crate::server::AppState;

/// Entries shown on the dashboard panel
const RECENT_LIMIT: i64 = 5;

pub async fn handle(req: Request<Incoming>, state: &AppState) -> Response<FullBody> {
    if req.method() != Method::GET {
        return error_response(StatusCode::NOT_FOUND, "Not found");
    }

    let entries = state.activity.recent(RECENT_LIMIT).await;
    let body: Vec<_> = entries.iter().map(to_api_json).collect();
    json_response(StatusCode::OK, &body)
}
