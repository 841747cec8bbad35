//! Operator-triggered test notification.

use media_notifier_common::non_blank;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::message::{NotificationMessage, Priority, SendOutcome};
use super::ntfy::{NtfyClient, PublishTarget};
use crate::config::NotificationConfig;
use crate::library::MediaCatalog;

/// How many catalog items a test draws its random pick from.
pub const TEST_SAMPLE_LIMIT: usize = 50;

pub const TEST_TITLE: &str = "Test Notification";
pub const TEST_BODY: &str = "Your media notifier is working correctly!";
pub const TEST_TAGS: &str = "white_check_mark,test";

/// Which stage a failed test stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestFailure {
    /// Rejected before any network call
    Configuration,
    /// The relay refused the message or could not be reached
    Delivery,
}

/// Structured result reported back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNotificationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip)]
    pub failure: Option<TestFailure>,
}

impl TestNotificationResult {
    fn succeeded() -> Self {
        Self {
            success: true,
            message: "Test notification sent successfully!".to_string(),
            failure: None,
        }
    }

    fn failed(failure: TestFailure, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            failure: Some(failure),
        }
    }
}

/// Send a test notification built from a random catalog item.
///
/// The topic and server URL are checked first; a missing one fails without
/// touching the network. An empty or failing catalog falls back to a canned
/// message. No error escapes: everything is folded into the result.
pub async fn send_test_notification(
    config: &NotificationConfig,
    catalog: &dyn MediaCatalog,
    client: &NtfyClient,
) -> TestNotificationResult {
    if non_blank(Some(config.topic.as_str())).is_none() {
        tracing::warn!("Relay topic is not configured");
        return TestNotificationResult::failed(
            TestFailure::Configuration,
            "Relay topic is not configured",
        );
    }
    if non_blank(Some(config.server_url.as_str())).is_none() {
        tracing::warn!("Relay server URL is not configured");
        return TestNotificationResult::failed(
            TestFailure::Configuration,
            "Relay server URL is not configured",
        );
    }

    let target = PublishTarget::from_config(config);
    tracing::info!(topic = %target.topic, "Sending test notification");

    let message = sample_message(config, catalog).await;
    match client.send(&target, &message).await {
        SendOutcome::Delivered => TestNotificationResult::succeeded(),
        outcome => TestNotificationResult::failed(
            TestFailure::Delivery,
            format!("Failed to send test notification: {}", outcome),
        ),
    }
}

async fn sample_message(config: &NotificationConfig, catalog: &dyn MediaCatalog) -> NotificationMessage {
    let items = match catalog.recent_items(TEST_SAMPLE_LIMIT).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog query failed, using default test message");
            return canned_message(config);
        }
    };

    let picked = {
        let mut rng = rand::thread_rng();
        items.choose(&mut rng).cloned()
    };

    match picked {
        Some(item) => {
            tracing::debug!(
                item = %item.display_name(),
                sampled = items.len(),
                "Using catalog item for test notification"
            );
            super::compose_message(&item, config)
        }
        None => {
            tracing::debug!("Catalog is empty, using default test message");
            canned_message(config)
        }
    }
}

fn canned_message(config: &NotificationConfig) -> NotificationMessage {
    NotificationMessage::new(TEST_TITLE, TEST_BODY)
        .with_tags(TEST_TAGS)
        .with_priority(Priority::new(config.priority).unwrap_or_default())
}
