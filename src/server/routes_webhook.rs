use crate::notifications::Dispatch;
use crate::server::AppContext;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use media_notifier_common::MediaItem;
use serde::Serialize;

pub fn webhook_routes() -> Router<AppContext> {
    Router::new().route("/item-added", post(item_added))
}

#[derive(Debug, Serialize)]
struct WebhookResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// The host reports a new library item.
///
/// The response only says whether a delivery was queued; its outcome is
/// logged by the delivery task.
async fn item_added(State(ctx): State<AppContext>, Json(item): Json<MediaItem>) -> impl IntoResponse {
    tracing::info!(
        item = %item.display_name(),
        kind = %item.kind(),
        "Received item-added event"
    );

    ctx.catalog.insert(item.clone());

    let config = ctx.notification_snapshot();
    match ctx.dispatcher.on_media_added(&item, Some(&config)) {
        Dispatch::Queued(_) => (
            StatusCode::ACCEPTED,
            Json(WebhookResponse {
                status: "queued",
                reason: None,
            }),
        ),
        Dispatch::Skipped(reason) => (
            StatusCode::OK,
            Json(WebhookResponse {
                status: "ignored",
                reason: Some(reason.to_string()),
            }),
        ),
    }
}
