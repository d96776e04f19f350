use std::sync::Arc;

use lambdahubs::{app, store::sqlite::SqliteHubs, trace, AppState};
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() {
    trace::init();

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(dotenv::var("DATABASE_URL").unwrap().as_str())
        .await.unwrap();

    let hubs = SqliteHubs::new(db_pool);
    hubs.init().await.unwrap();

    let app = app(AppState { hubs: Arc::new(hubs) });
    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
