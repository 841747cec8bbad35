use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Require an API key on `/api` routes
    #[serde(default)]
    pub enabled: bool,

    /// API key for administrative access (used with Authorization: Bearer header)
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8096
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

/// Relay target, toggles and message templates.
///
/// Read once per event; admins may edit it between events.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_topic")]
    pub topic: String,

    /// Bearer token for protected topics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default = "default_notification_title")]
    pub notification_title: String,

    #[serde(default = "default_true")]
    pub enable_movie_notifications: bool,

    #[serde(default = "default_true")]
    pub enable_series_notifications: bool,

    #[serde(default = "default_true")]
    pub enable_music_notifications: bool,

    /// Blank means the built-in `{title} ({year})`
    #[serde(default)]
    pub movie_format: String,

    /// Blank means the built-in `{series} - S{season:00}E{episode:00}: {name}`
    #[serde(default)]
    pub episode_format: String,

    /// Blank means the built-in `{track} - {artist}`
    #[serde(default)]
    pub music_format: String,

    /// Attach item artwork to notifications
    #[serde(default = "default_true")]
    pub enable_thumbnails: bool,

    /// Relay priority, 1 (min) to 5 (max)
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_server_url() -> String {
    "https://ntfy.sh".to_string()
}
fn default_topic() -> String {
    "media-notifications".to_string()
}
fn default_notification_title() -> String {
    "New Media Added".to_string()
}
fn default_true() -> bool {
    true
}
fn default_priority() -> u8 {
    3
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            topic: default_topic(),
            access_token: None,
            notification_title: default_notification_title(),
            enable_movie_notifications: true,
            enable_series_notifications: true,
            enable_music_notifications: true,
            movie_format: String::new(),
            episode_format: String::new(),
            music_format: String::new(),
            enable_thumbnails: true,
            priority: default_priority(),
        }
    }
}

impl NotificationConfig {
    /// Whether both the relay URL and the topic are filled in.
    pub fn has_target(&self) -> bool {
        !self.server_url.trim().is_empty() && !self.topic.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// JSON array of items preloaded into the in-memory catalog
    #[serde(default)]
    pub items_file: Option<PathBuf>,
}
