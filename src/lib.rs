pub mod hubs;
pub mod index;
pub mod reply;
pub mod res;
pub mod store;
pub mod trace;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use serde_json::{Map, Value};

use crate::store::HubStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub hubs: Arc<dyn HubStore>,
}

/// Builds the full router. `main` serves this; tests mount it on an
/// ephemeral port with a store of their choosing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .nest("/api/hubs", hubs::router())
        .with_state(state)
}

/// Parses a request body the way the original middleware did: anything that
/// is not valid JSON (including an empty body) becomes an empty object
/// instead of a client error.
pub fn lenient_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
}
