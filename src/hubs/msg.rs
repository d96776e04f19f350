use std::sync::Arc;

use axum::{
    body::Bytes,
    debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{lenient_json, reply, store::{HubStore, NewMessage}};

#[debug_handler]
pub(crate) async fn hub_messages(
    State(hubs): State<Arc<dyn HubStore>>,
    Path(id): Path<String>,
) -> Response {
    match hubs.find_hub_messages(&id).await {
        Ok(messages) if !messages.is_empty() => {
            (StatusCode::OK, Json(messages)).into_response()
        }
        // a hub with no messages is indistinguishable from a missing hub
        // here; both report 404 (known ambiguity, kept as-is)
        Ok(_) => reply::message(StatusCode::NOT_FOUND, "Hub with this ID does not exist"),
        Err(err) => {
            tracing::error!(error = %err, id, "fetching hub messages failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving the hub")
        }
    }
}

#[debug_handler]
pub(crate) async fn post_message(
    State(hubs): State<Arc<dyn HubStore>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let body = lenient_json(&body);
    let message = NewMessage {
        hub_id: id,
        sender: str_field(&body, "sender"),
        text: str_field(&body, "text"),
    };

    match hubs.add_message(message).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "posting message failed");
            reply::message(StatusCode::INTERNAL_SERVER_ERROR, "Error posting the message")
        }
    }
}

fn str_field(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_owned)
}
