//! The ephemeral message handed from the resolver to the relay client.

use bytes::Bytes;
use media_notifier_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relay priority, 1 (min) to 5 (max).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Priority = Priority(1);
    pub const DEFAULT: Priority = Priority(3);
    pub const MAX: Priority = Priority(5);

    pub fn new(value: u8) -> Result<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_input(format!(
                "priority must be between 1 and 5, got {}",
                value
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Artwork attached to a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Attachment {
    /// Raw bytes, uploaded to the relay before the message is published
    Bytes { data: Bytes, filename: String },
    /// A URL the relay links to directly
    Url(String),
}

/// A formatted notification, built per dispatch and dropped after sending.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    /// Comma-joined tag list
    pub tags: Option<String>,
    pub priority: Option<Priority>,
    pub attachment: Option<Attachment>,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: None,
            priority: None,
            attachment: None,
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// How a single publish attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The relay answered with a 2xx status
    Delivered,
    /// The relay answered with any other status
    Rejected { status: u16, reason: String },
    /// The request never got an answer
    Transport(String),
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Rejected { status, reason } => {
                write!(f, "relay rejected the message ({} {})", status, reason)
            }
            Self::Transport(e) => write!(f, "relay unreachable: {}", e),
        }
    }
}
