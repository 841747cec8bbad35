use crate::server::AppContext;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};

pub fn api_routes() -> Router<AppContext> {
    Router::new().route("/health", get(health))
}

async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    let relay_configured = ctx.notifications.read().has_target();
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "relay_configured": relay_configured,
        "catalog_items": ctx.catalog.len()
    }))
}
