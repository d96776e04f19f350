use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    debug_handler,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{lenient_json, reply, store::HubStore};

#[debug_handler]
pub(crate) async fn list_hubs(
    State(hubs): State<Arc<dyn HubStore>>,
    Query(filter): Query<HashMap<String, String>>,
) -> Response {
    match hubs.find(&filter).await {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "listing hubs failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving the hubs")
        }
    }
}

#[debug_handler]
pub(crate) async fn get_hub(
    State(hubs): State<Arc<dyn HubStore>>,
    Path(id): Path<String>,
) -> Response {
    match hubs.find_by_id(&id).await {
        Ok(Some(hub)) => (StatusCode::OK, Json(hub)).into_response(),
        Ok(None) => reply::message(StatusCode::NOT_FOUND, "Hub not found"),
        Err(err) => {
            tracing::error!(error = %err, id, "fetching hub failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving the hub")
        }
    }
}

#[debug_handler]
pub(crate) async fn add_hub(
    State(hubs): State<Arc<dyn HubStore>>,
    body: Bytes,
) -> Response {
    match hubs.add(lenient_json(&body)).await {
        Ok(hub) => (StatusCode::CREATED, Json(hub)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "adding hub failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error adding the hub")
        }
    }
}

#[debug_handler]
pub(crate) async fn update_hub(
    State(hubs): State<Arc<dyn HubStore>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    match hubs.update(&id, lenient_json(&body)).await {
        Ok(Some(hub)) => (StatusCode::OK, Json(hub)).into_response(),
        Ok(None) => reply::message(StatusCode::NOT_FOUND, "The hub could not be found"),
        Err(err) => {
            tracing::error!(error = %err, id, "updating hub failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error updating the hub")
        }
    }
}

#[debug_handler]
pub(crate) async fn remove_hub(
    State(hubs): State<Arc<dyn HubStore>>,
    Path(id): Path<String>,
) -> Response {
    match hubs.remove(&id).await {
        Ok(count) if count > 0 => reply::message(StatusCode::OK, "The hub has been nuked"),
        Ok(_) => reply::message(StatusCode::NOT_FOUND, "The hub could not be found"),
        Err(err) => {
            tracing::error!(error = %err, id, "removing hub failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error removing the hub")
        }
    }
}
