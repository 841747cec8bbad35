use crate::notifications::{send_test_notification, TestFailure};
use crate::server::AppContext;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};

pub fn notify_routes() -> Router<AppContext> {
    Router::new().route("/notifications/test", post(send_test))
}

async fn send_test(State(ctx): State<AppContext>) -> impl IntoResponse {
    let config = ctx.notification_snapshot();
    let result = send_test_notification(&config, ctx.catalog.as_ref(), &ctx.client).await;

    let status = match result.failure {
        None => StatusCode::OK,
        Some(TestFailure::Configuration) => StatusCode::BAD_REQUEST,
        Some(TestFailure::Delivery) => StatusCode::BAD_GATEWAY,
    };

    (status, Json(result))
}
