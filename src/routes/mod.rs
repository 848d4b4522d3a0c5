//! HTTP routes for Callboard
//!
//! ## Endpoints
//!
//! - `GET /{collection}` - list records (collections: tasks, assets,
//!   expenses, milestones, ideas, competitors)
//! - `GET /tasks?migrate=1` - run the label migration
//! - `POST /{collection}` - create a record
//! - `PUT /{collection}/{id}` - partial update
//! - `DELETE /{collection}/{id}` - remove a record
//! - `GET /settings`, `PUT /settings` - singleton settings
//! - `GET /activities` - five most recent audit entries
//! - `GET /health`, `GET /version` - probes

pub mod activities;
pub mod entities;
pub mod health;
pub mod settings;

pub use health::{health_check, version_info};

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::db::schemas::{
    AssetDoc, CompetitorDoc, ExpenseDoc, HasRecordId, IdeaDoc, MilestoneDoc, TaskDoc,
};
use crate::migration;
use crate::server::AppState;
use crate::types::CallboardError;

pub type FullBody = Full<Bytes>;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Success response body for deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Response Helpers
// =============================================================================

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<FullBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(json)))
        .unwrap()
}

pub fn error_response(status: StatusCode, error: &str) -> Response<FullBody> {
    json_response(
        status,
        &ErrorResponse {
            error: error.to_string(),
        },
    )
}

/// Map a store error onto its HTTP shape. A connection failure that made
/// it this far was not eligible for fallback, so it reads as the database
/// being unavailable.
pub fn error_from(err: &CallboardError) -> Response<FullBody> {
    let message = match err {
        CallboardError::Connection(_) => "Database unavailable".to_string(),
        other => other.to_string(),
    };
    error_response(err.status(), &message)
}

/// CORS preflight response
pub fn preflight_response() -> Response<FullBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Serialize a document for the API: `_id` becomes a plain `id` string.
pub fn to_api_json<T: Serialize + HasRecordId>(doc: &T) -> serde_json::Value {
    let mut value = serde_json::to_value(doc).unwrap_or(serde_json::Value::Null);
    if let serde_json::Value::Object(map) = &mut value {
        map.remove("_id");
        if let Some(id) = doc.record_id() {
            map.insert("id".to_string(), serde_json::Value::String(id.as_string()));
        }
    }
    value
}

/// Whether the query string asks for the label migration (`migrate=1`)
fn wants_migration(query: Option<&str>) -> bool {
    let Some(query) = query else {
        return false;
    };
    query.split('&').any(|pair| {
        match pair.split_once('=') {
            Some((key, value)) => {
                key == "migrate" && urlencoding::decode(value).unwrap_or_default() == "1"
            }
            None => false,
        }
    })
}

// =============================================================================
// Dispatch
// =============================================================================

/// Route `/{collection}` and `/{collection}/{id}` requests.
pub async fn handle_api_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<FullBody> {
    let path = req.uri().path().trim_matches('/').to_string();
    let mut parts = path.splitn(2, '/');
    let collection = parts.next().unwrap_or("").to_string();
    let id = parts.next().map(str::to_string);

    // No nesting below /{collection}/{id}
    if id.as_deref().is_some_and(|rest| rest.contains('/')) {
        return error_response(StatusCode::NOT_FOUND, "Not found");
    }
    let id = id.as_deref();

    match collection.as_str() {
        "tasks" => {
            if req.method() == Method::GET && id.is_none() && wants_migration(req.uri().query()) {
                return run_label_migration(&state).await;
            }
            entities::handle::<TaskDoc>(req, &state, &state.stores.tasks, id).await
        }
        "assets" => entities::handle::<AssetDoc>(req, &state, &state.stores.assets, id).await,
        "expenses" => entities::handle::<ExpenseDoc>(req, &state, &state.stores.expenses, id).await,
        "milestones" => {
            entities::handle::<MilestoneDoc>(req, &state, &state.stores.milestones, id).await
        }
        "ideas" => entities::handle::<IdeaDoc>(req, &state, &state.stores.ideas, id).await,
        "competitors" => {
            entities::handle::<CompetitorDoc>(req, &state, &state.stores.competitors, id).await
        }
        "settings" if id.is_none() => settings::handle(req, &state).await,
        "activities" if id.is_none() => activities::handle(req, &state).await,
        _ => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// GET /tasks?migrate=1 - rewrite legacy labels in place
async fn run_label_migration(state: &AppState) -> Response<FullBody> {
    match migration::migrate_task_labels(&state.connector).await {
        Ok(report) => json_response(StatusCode::OK, &report),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_migration() {
        assert!(wants_migration(Some("migrate=1")));
        assert!(wants_migration(Some("foo=bar&migrate=1")));
        assert!(!wants_migration(Some("migrate=0")));
        assert!(!wants_migration(Some("migrate")));
        assert!(!wants_migration(None));
    }

    #[test]
    fn test_to_api_json_maps_id() {
        use crate::db::schemas::{RecordId, TaskDoc};

        let task = TaskDoc {
            id: Some(RecordId::Key("1722-ab12".into())),
            title: "مهمة".into(),
            ..Default::default()
        };
        let value = to_api_json(&task);
        assert_eq!(value["id"], "1722-ab12");
        assert!(value.get("_id").is_none());
        assert_eq!(value["title"], "مهمة");
    }
}
