use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Fixed `{message}` body clients key off of; the wording per endpoint is
/// part of the API contract.
pub fn message(status: StatusCode, text: &'static str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}
