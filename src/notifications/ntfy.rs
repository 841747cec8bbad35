//! Publishing client for an ntfy relay.
//!
//! Messages are published as plain-text `POST {server}/{topic}` requests with
//! the metadata carried in headers. Binary attachments take two steps: the
//! bytes are `PUT` to the topic first and the URL the relay hands back is
//! referenced from the message's `Attach` header.
//!
//! Nothing here returns an error. Every attempt ends in a [`SendOutcome`]
//! that is logged and handed back; there is no retry.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use media_notifier_common::non_blank;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use super::message::{Attachment, NotificationMessage, SendOutcome};
use crate::config::NotificationConfig;

/// HTTP timeout for relay requests.
const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Marker the upload response is scanned for.
const ATTACHMENT_URL_MARKER: &str = "\"url\":\"";

/// Where a message is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub server_url: String,
    pub topic: String,
    pub access_token: Option<String>,
}

impl PublishTarget {
    pub fn new(server_url: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            topic: topic.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            server_url: config.server_url.trim().to_string(),
            topic: config.topic.trim().to_string(),
            access_token: config.access_token.clone(),
        }
    }

    /// `{server_url}/{topic}` with any trailing slash on the server removed.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.server_url.trim_end_matches('/'), self.topic)
    }

    fn bearer(&self) -> Option<String> {
        non_blank(self.access_token.as_deref()).map(|token| format!("Bearer {}", token.trim()))
    }
}

/// Relay client holding one shared connection pool.
///
/// Cloning is cheap and every clone shares the same pool, so a single
/// instance serves all concurrent deliveries.
#[derive(Debug, Clone)]
pub struct NtfyClient {
    client: Client,
}

impl NtfyClient {
    /// Build the client.
    ///
    /// Certificate validation is disabled: relays are commonly self-hosted
    /// behind certificates no public CA signed.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(NOTIFICATION_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build relay HTTP client: {e}");
                Client::new()
            });

        Self { client }
    }

    /// Publish one message. Never fails; the outcome says what happened.
    pub async fn send(&self, target: &PublishTarget, message: &NotificationMessage) -> SendOutcome {
        let url = target.endpoint();

        let attach_url = match &message.attachment {
            Some(Attachment::Bytes { data, filename }) => {
                self.upload_attachment(target, data.clone(), filename).await
            }
            Some(Attachment::Url(link)) => non_blank(Some(link.as_str())).map(str::to_string),
            None => None,
        };

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .header("Title", header_text(&message.title))
            .body(message.body.clone());

        if let Some(auth) = target.bearer() {
            request = request.header(AUTHORIZATION, auth);
        }
        if let Some(tags) = non_blank(message.tags.as_deref()) {
            request = request.header("Tags", header_text(tags));
        }
        if let Some(priority) = message.priority {
            request = request.header("Priority", priority.to_string());
        }
        if let Some(ref attach) = attach_url {
            request = request.header("Attach", attach.as_str());
        }

        tracing::debug!(
            topic = %target.topic,
            title = %message.title,
            attachment = attach_url.is_some(),
            "Publishing notification"
        );

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(topic = %target.topic, "Notification published");
                SendOutcome::Delivered
            }
            Ok(resp) => {
                let status = resp.status();
                let reason = status.canonical_reason().unwrap_or("").to_string();
                let body = resp.text().await.unwrap_or_default();
                tracing::warn!(
                    topic = %target.topic,
                    status = %status,
                    body = %body,
                    "Relay returned non-success status"
                );
                SendOutcome::Rejected {
                    status: status.as_u16(),
                    reason,
                }
            }
            Err(e) => {
                tracing::warn!(
                    topic = %target.topic,
                    error = %e,
                    "Failed to contact relay"
                );
                SendOutcome::Transport(e.to_string())
            }
        }
    }

    /// Upload attachment bytes and return the URL the relay assigned.
    ///
    /// Any failure is logged and yields `None`; the message then goes out
    /// without an attachment.
    async fn upload_attachment(
        &self,
        target: &PublishTarget,
        data: Bytes,
        filename: &str,
    ) -> Option<String> {
        let mut request = self
            .client
            .put(target.endpoint())
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("Filename", header_text(filename))
            .body(data);

        if let Some(auth) = target.bearer() {
            request = request.header(AUTHORIZATION, auth);
        }

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(topic = %target.topic, error = %e, "Attachment upload failed");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                topic = %target.topic,
                status = %status,
                "Relay rejected attachment upload"
            );
            return None;
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(topic = %target.topic, error = %e, "Failed to read upload response");
                return None;
            }
        };

        match extract_attachment_url(&body) {
            Some(url) => {
                tracing::info!(topic = %target.topic, url = %url, "Attachment uploaded");
                Some(url)
            }
            None => {
                tracing::warn!(
                    topic = %target.topic,
                    "Upload response carried no attachment URL"
                );
                None
            }
        }
    }
}

impl Default for NtfyClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the first `"url":"…"` value out of an upload response body.
pub fn extract_attachment_url(body: &str) -> Option<String> {
    let start = body.find(ATTACHMENT_URL_MARKER)? + ATTACHMENT_URL_MARKER.len();
    let len = body[start..].find('"')?;
    if len == 0 {
        return None;
    }
    Some(body[start..start + len].to_string())
}

/// Make a value safe for an HTTP header.
///
/// Printable ASCII passes through; anything else is sent as an RFC 2047
/// encoded word, which the relay decodes.
pub fn header_text(value: &str) -> String {
    if value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value.as_bytes()))
    }
}
