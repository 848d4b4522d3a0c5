//! Generic CRUD handlers shared by the collection routes.
//!
//! Every entity gets the same surface: list, create, update, delete.
//! Mutations emit an activity entry after they succeed, against whichever
//! store served them; the entry's action for updates is derived from the
//! before/after snapshots.

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use tracing::warn;

use crate::activity::{describe, ActivityAction};
use crate::routes::{error_from, error_response, json_response, to_api_json, FullBody, MessageResponse};
use crate::server::AppState;
use crate::store::{DualStore, Entity};
use crate::types::CallboardError;

pub async fn handle<E: Entity>(
    req: Request<Incoming>,
    state: &AppState,
    store: &DualStore<E>,
    id: Option<&str>,
) -> Response<FullBody> {
    match (req.method().clone(), id) {
        (Method::GET, None) => list(store).await,
        (Method::POST, None) => create(req, state, store).await,
        (Method::PUT, Some(id)) => update(req, state, store, id).await,
        (Method::DELETE, Some(id)) => delete(state, store, id).await,
        _ => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// GET /{collection}
async fn list<E: Entity>(store: &DualStore<E>) -> Response<FullBody> {
    match store.list().await {
        Ok(docs) => {
            let body: Vec<_> = docs.iter().map(to_api_json).collect();
            json_response(StatusCode::OK, &body)
        }
        Err(err) => error_from(&err),
    }
}

/// POST /{collection}
async fn create<E: Entity>(
    req: Request<Incoming>,
    state: &AppState,
    store: &DualStore<E>,
) -> Response<FullBody> {
    let body = match req.into_body().collect().await {
        Ok(b) => b.to_bytes(),
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid body"),
    };

    let doc: E = match serde_json::from_slice(&body) {
        Ok(d) => d,
        Err(e) => {
            warn!(collection = E::COLLECTION, "rejected create payload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    match store.create(doc).await {
        Ok(stored) => {
            let description = describe(ActivityAction::Create, E::NOUN, &stored.display_name());
            state
                .activity
                .log(ActivityAction::Create, E::KIND, description)
                .await;
            json_response(StatusCode::CREATED, &to_api_json(&stored))
        }
        Err(CallboardError::Connection(_)) => {
            // Production with the store down: never pretend the write
            // was persisted
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
        }
        Err(err) => error_from(&err),
    }
}

/// PUT /{collection}/{id}
async fn update<E: Entity>(
    req: Request<Incoming>,
    state: &AppState,
    store: &DualStore<E>,
    id: &str,
) -> Response<FullBody> {
    let body = match req.into_body().collect().await {
        Ok(b) => b.to_bytes(),
        Err(_) => return error_response(StatusCode::BAD_REQUEST, "Invalid body"),
    };

    let patch: E::Patch = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(collection = E::COLLECTION, "rejected update payload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    match store.update(id, &patch).await {
        Ok((before, after)) => {
            let action = E::classify_update(&before, &after);
            let description = describe(action, E::NOUN, &after.display_name());
            state.activity.log(action, E::KIND, description).await;
            json_response(StatusCode::OK, &to_api_json(&after))
        }
        Err(err) => error_from(&err),
    }
}

/// DELETE /{collection}/{id}
async fn delete<E: Entity>(
    state: &AppState,
    store: &DualStore<E>,
    id: &str,
) -> Response<FullBody> {
    match store.delete(id).await {
        Ok(removed) => {
            let description = describe(ActivityAction::Delete, E::NOUN, &removed.display_name());
            state
                .activity
                .log(ActivityAction::Delete, E::KIND, description)
                .await;
            json_response(
                StatusCode::OK,
                &MessageResponse {
                    message: "تم الحذف بنجاح".to_string(),
                },
            )
        }
        Err(err) => error_from(&err),
    }
}
