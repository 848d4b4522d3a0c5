//! Settings endpoints
//!
//! - `GET /settings` - the singleton settings document (defaults before
//!   the first write)
//! - `PUT /settings` - partial upsert of
//!   `{totalBudget, launchDate, revenuePerStudent}`; fields of the wrong
//!   type are silently ignored

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};

use crate::db::schemas::SettingsPatch;
use crate::routes::{error_from, error_response, json_response, to_api_json, FullBody};
use crate::server::AppState;

pub async fn handle(req: Request<Incoming>, state: &AppState) -> Response<FullBody> {
    let method = req.method().clone();
    match method {
        Method::GET => get(state).await,
        Method::PUT => put(req, state).await,
        _ => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn get(state: &AppState) -> Response<FullBody> {
    match state.settings.get().await {
        Ok(settings) => json_response(StatusCode::OK, &to_api_json(&settings)),
        Err(err) => error_from(&err),
    }
}

async fn put(req: Request<Incoming>, state: &AppState) -> Response<FullBody> {
    let body = match req.into_body().collect().await {
        Ok(b) => b.to_bytes(),
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid body"),
    };

    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid JSON"),
    };

    let patch = SettingsPatch::from_json(&value);

    match state.settings.upsert(&patch).await {
        Ok(settings) => json_response(StatusCode::OK, &to_api_json(&settings)),
        Err(err) => error_from(&err),
    }
}
