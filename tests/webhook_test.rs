//! Item-added webhook tests
//!
//! Events go through the real dispatcher; `wiremock` records what reaches
//! the relay.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_to_json, config_for, json_request, test_context, wait_for_requests};
use media_notifier::config::Config;
use media_notifier::server::create_router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn relay() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_movie_is_queued_and_delivered() {
    let server = relay().await;
    let app = create_router(test_context(config_for(&server)));

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "movie", "name": "Dune", "production_year": 2021 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "queued");

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(String::from_utf8_lossy(&requests[0].body), "Dune (2021)");
    assert_eq!(
        requests[0].headers.get("Tags").unwrap().to_str().unwrap(),
        "clapper,movie"
    );
    assert_eq!(
        requests[0].headers.get("Title").unwrap().to_str().unwrap(),
        "New Media Added"
    );
}

#[tokio::test]
async fn test_track_body_strips_artist_prefix() {
    let server = relay().await;
    let app = create_router(test_context(config_for(&server)));

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({
                "kind": "audio",
                "name": "Daft Punk - One More Time",
                "artists": ["Daft Punk"],
                "album": "Discovery"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let requests = wait_for_requests(&server, 1).await;
    assert_eq!(
        String::from_utf8_lossy(&requests[0].body),
        "One More Time - Daft Punk"
    );
}

#[tokio::test]
async fn test_virtual_item_is_ignored() {
    let server = relay().await;
    let app = create_router(test_context(config_for(&server)));

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "episode", "name": "Pilot", "is_virtual": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ignored");
    assert_eq!(json["reason"], "item is virtual");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_category_is_ignored() {
    let server = relay().await;
    let mut config = config_for(&server);
    config.notifications.enable_series_notifications = false;
    let app = create_router(test_context(config));

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "episode", "name": "Pilot", "series_name": "The Office" }),
        ))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ignored");
    assert_eq!(json["reason"], "series notifications are disabled");
}

#[tokio::test]
async fn test_edit_applies_to_next_event() {
    let server = relay().await;
    let ctx = test_context(config_for(&server));
    let app = create_router(ctx.clone());

    ctx.notifications.write().enable_movie_notifications = false;

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "movie", "name": "Dune" }),
        ))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["reason"], "movie notifications are disabled");
}

#[tokio::test]
async fn test_items_are_recorded_in_catalog() {
    let ctx = test_context(Config::default());
    let app = create_router(ctx.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "other", "name": "Holiday photos" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ctx.catalog.len(), 1);

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["catalog_items"], 1);
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let app = create_router(test_context(Config::default()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/webhook/item-added",
            json!({ "kind": "spaceship", "name": "?" }),
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
