mod hub;
mod msg;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hub::list_hubs).post(hub::add_hub))
        .route("/{id}", get(hub::get_hub).put(hub::update_hub).delete(hub::remove_hub))
        .route("/{id}/messages", get(msg::hub_messages).post(msg::post_message))
}
