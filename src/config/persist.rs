//! Configuration persistence using toml_edit to preserve formatting and comments.

use super::NotificationConfig;
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::DocumentMut;

/// Update just the notifications section of the config file
pub fn update_notifications(path: &Path, notifications: &NotificationConfig) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    let section_toml = toml::to_string(&NotificationsWrapper {
        notifications: notifications.clone(),
    })
    .with_context(|| "Failed to serialize notifications")?;
    let section_doc: DocumentMut = section_toml
        .parse()
        .with_context(|| "Failed to parse serialized notifications")?;

    if let Some(item) = section_doc.get("notifications") {
        doc["notifications"] = item.clone();
    } else {
        doc.remove("notifications");
    }

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[derive(serde::Serialize)]
struct NotificationsWrapper {
    notifications: NotificationConfig,
}
