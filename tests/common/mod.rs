//! Shared helpers for integration tests.
//!
//! Builds an [`AppContext`] around an in-memory catalog and, where needed, a
//! `wiremock` server standing in for the relay.

#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use media_notifier::config::{Config, NotificationConfig};
use media_notifier::library::InMemoryCatalog;
use media_notifier::server::AppContext;
use tokio::runtime::Handle;
use wiremock::MockServer;

/// Context with the given config and an empty catalog.
pub fn test_context(config: Config) -> AppContext {
    AppContext::new(config, None, InMemoryCatalog::new(), Handle::current())
}

/// Config whose relay target is the mock server.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        notifications: NotificationConfig {
            server_url: server.uri(),
            topic: "media".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper to get response body as JSON
pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Wait until the relay has seen `count` requests.
///
/// Deliveries run on spawned tasks, so the HTTP response can arrive first.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..100 {
        let requests = server.received_requests().await.unwrap();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("relay did not receive {} requests in time", count);
}
