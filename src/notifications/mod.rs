//! Notification formatting and delivery.

pub mod dispatcher;
pub mod message;
pub mod ntfy;
pub mod tags;
pub mod template;
pub mod test_notification;

pub use dispatcher::{screen, Dispatch, Dispatcher, MediaCategory, SkipReason};
pub use message::{Attachment, NotificationMessage, Priority, SendOutcome};
pub use ntfy::{NtfyClient, PublishTarget};
pub use tags::classify_tags;
pub use template::{resolve, ResolvedMessage};
pub use test_notification::{send_test_notification, TestFailure, TestNotificationResult};

use crate::config::NotificationConfig;
use media_notifier_common::MediaItem;

/// Build the full message for an item: resolved text, tags and priority.
///
/// Attachments are added later by the caller since loading artwork is I/O.
pub fn compose_message(item: &MediaItem, config: &NotificationConfig) -> NotificationMessage {
    let resolved = resolve(item, Some(config));
    NotificationMessage::new(resolved.title, resolved.body)
        .with_tags(classify_tags(item.kind()))
        .with_priority(Priority::new(config.priority).unwrap_or_default())
}
