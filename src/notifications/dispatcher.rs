//! Item-added event handling.
//!
//! The dispatcher filters each event, builds the message and hands delivery to
//! a spawned task on an explicitly supplied runtime. The caller is never
//! blocked and never sees a delivery error. Spawned deliveries are neither
//! cancelled nor persisted; a task that is in flight when the process exits
//! is lost.

use media_notifier_common::{non_blank, ItemKind, MediaItem};
use std::fmt;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::message::{Attachment, NotificationMessage, SendOutcome};
use super::ntfy::{NtfyClient, PublishTarget};
use crate::config::NotificationConfig;

/// Filename used when an artwork path has no usable file name.
const DEFAULT_ARTWORK_NAME: &str = "image.jpg";

/// The toggle group an item kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Movie,
    Series,
    Music,
}

impl MediaCategory {
    /// `None` for kinds that are never announced.
    pub fn of(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Movie => Some(Self::Movie),
            ItemKind::Series | ItemKind::Episode => Some(Self::Series),
            ItemKind::MusicAlbum | ItemKind::Audio => Some(Self::Music),
            ItemKind::Other => None,
        }
    }

    pub fn is_enabled(self, config: &NotificationConfig) -> bool {
        match self {
            Self::Movie => config.enable_movie_notifications,
            Self::Series => config.enable_series_notifications,
            Self::Music => config.enable_music_notifications,
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
            Self::Music => write!(f, "music"),
        }
    }
}

/// Why an event produced no notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No configuration has been loaded yet
    NotInitialized,
    Virtual,
    Folder,
    Unsupported(ItemKind),
    Disabled(MediaCategory),
    /// Server URL or topic is blank
    MissingTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "notifier is not initialized"),
            Self::Virtual => write!(f, "item is virtual"),
            Self::Folder => write!(f, "item is a folder"),
            Self::Unsupported(kind) => write!(f, "unsupported item kind: {}", kind),
            Self::Disabled(category) => write!(f, "{} notifications are disabled", category),
            Self::MissingTarget => write!(f, "relay server URL or topic is not configured"),
        }
    }
}

/// Result of handing an event to the dispatcher.
#[derive(Debug)]
pub enum Dispatch {
    Skipped(SkipReason),
    /// Delivery is running; dropping the handle detaches it
    Queued(JoinHandle<SendOutcome>),
}

impl Dispatch {
    pub fn is_queued(&self) -> bool {
        matches!(self, Self::Queued(_))
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Skipped(reason) => Some(reason),
            Self::Queued(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Artwork {
    File(PathBuf),
    Url(String),
}

impl Artwork {
    fn for_item(item: &MediaItem) -> Option<Self> {
        if let Some(ref path) = item.primary_image {
            return Some(Self::File(path.clone()));
        }
        non_blank(item.image_url.as_deref()).map(|url| Self::Url(url.to_string()))
    }

    async fn load(self) -> Option<Attachment> {
        match self {
            Self::File(path) => match tokio::fs::read(&path).await {
                Ok(data) => {
                    let filename = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or(DEFAULT_ARTWORK_NAME)
                        .to_string();
                    Some(Attachment::Bytes {
                        data: data.into(),
                        filename,
                    })
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read artwork, sending without attachment"
                    );
                    None
                }
            },
            Self::Url(url) => Some(Attachment::Url(url)),
        }
    }
}

/// Turns item-added events into relay deliveries.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: NtfyClient,
    runtime: Handle,
}

impl Dispatcher {
    pub fn new(client: NtfyClient, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    /// Handle one item-added event.
    ///
    /// `config` is the caller's current snapshot; `None` means the notifier
    /// has not finished starting. This never awaits.
    pub fn on_media_added(&self, item: &MediaItem, config: Option<&NotificationConfig>) -> Dispatch {
        let (config, category) = match screen(item, config) {
            Ok(passed) => passed,
            Err(reason) => return Dispatch::Skipped(reason),
        };

        let target = PublishTarget::from_config(config);
        let message = super::compose_message(item, config);
        let artwork = if config.enable_thumbnails {
            Artwork::for_item(item)
        } else {
            None
        };

        tracing::info!(
            item = %item.display_name(),
            id = %item.id,
            category = %category,
            topic = %target.topic,
            "Queueing notification"
        );

        let client = self.client.clone();
        let item_name = item.display_name().to_string();
        let handle = self.runtime.spawn(async move {
            let message = match artwork {
                Some(artwork) => attach(message, artwork).await,
                None => message,
            };

            let outcome = client.send(&target, &message).await;
            if !outcome.is_success() {
                tracing::warn!(
                    item = %item_name,
                    outcome = %outcome,
                    "Notification delivery failed"
                );
            }
            outcome
        });

        Dispatch::Queued(handle)
    }
}

/// Run the event filters in order; the first failing one wins.
pub fn screen<'a>(
    item: &MediaItem,
    config: Option<&'a NotificationConfig>,
) -> Result<(&'a NotificationConfig, MediaCategory), SkipReason> {
    let Some(config) = config else {
        tracing::debug!(item = %item.display_name(), "Notifier not initialized, ignoring item");
        return Err(SkipReason::NotInitialized);
    };

    if item.is_virtual {
        return Err(SkipReason::Virtual);
    }
    if item.is_folder {
        return Err(SkipReason::Folder);
    }

    let kind = item.kind();
    let Some(category) = MediaCategory::of(kind) else {
        tracing::trace!(item = %item.display_name(), kind = %kind, "Unsupported item kind");
        return Err(SkipReason::Unsupported(kind));
    };

    if !category.is_enabled(config) {
        tracing::debug!(
            item = %item.display_name(),
            category = %category,
            "Notifications disabled for category"
        );
        return Err(SkipReason::Disabled(category));
    }

    if !config.has_target() {
        tracing::warn!(
            item = %item.display_name(),
            "Relay server URL or topic not configured, skipping notification"
        );
        return Err(SkipReason::MissingTarget);
    }

    Ok((config, category))
}

async fn attach(message: NotificationMessage, artwork: Artwork) -> NotificationMessage {
    match artwork.load().await {
        Some(attachment) => message.with_attachment(attachment),
        None => message,
    }
}
