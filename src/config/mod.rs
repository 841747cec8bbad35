pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Locations tried, in order, when no config path is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "./config.toml",
    "./media-notifier.toml",
    "~/.config/media-notifier/config.toml",
    "/etc/media-notifier/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config.
///
/// Also returns the file the config came from, if any, so edits can be
/// written back to it.
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    load_config_searching(custom_path, DEFAULT_CONFIG_PATHS)
}

/// Like [`load_config_or_default`], with an explicit search list
pub fn load_config_searching(
    custom_path: Option<&Path>,
    search_paths: &[&str],
) -> Result<(Config, Option<PathBuf>)> {
    match find_config(custom_path, search_paths) {
        Some(path) => {
            tracing::debug!("Loading config from {:?}", path);
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}

fn find_config(custom_path: Option<&Path>, search_paths: &[&str]) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        return Some(path.to_path_buf());
    }

    search_paths
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .find(|p| p.exists())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let auth = &config.server.auth;
    if auth.enabled && auth.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        anyhow::bail!("Auth is enabled but no API key is configured");
    }

    validate_notifications(&config.notifications)?;

    if let Some(ref items) = config.library.items_file {
        if !items.exists() {
            tracing::warn!("Library items file does not exist: {:?}", items);
        }
    }

    Ok(())
}

/// Validate the notification section on its own (also used for live edits)
pub fn validate_notifications(notifications: &NotificationConfig) -> Result<()> {
    if !(1..=5).contains(&notifications.priority) {
        anyhow::bail!(
            "Notification priority must be between 1 and 5, got {}",
            notifications.priority
        );
    }

    // A missing target is reported when a send is attempted, not at load time
    if notifications.topic.trim().is_empty() {
        tracing::warn!("Notification topic is not configured");
    }
    if notifications.server_url.trim().is_empty() {
        tracing::warn!("Notification server URL is not configured");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_match_plugin_defaults() {
        let config = Config::default();
        let n = &config.notifications;
        assert_eq!(n.server_url, "https://ntfy.sh");
        assert_eq!(n.notification_title, "New Media Added");
        assert!(n.enable_movie_notifications);
        assert!(n.enable_series_notifications);
        assert!(n.enable_music_notifications);
        assert!(n.enable_thumbnails);
        assert_eq!(n.priority, 3);
        assert!(n.access_token.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_config(
            r#"
[notifications]
topic = "my-topic"
access_token = "tk_secret"
enable_music_notifications = false
episode_format = "{series} {season}x{episode}"
"#,
        );

        let config = load_config(file.path()).unwrap();
        let n = &config.notifications;
        assert_eq!(n.topic, "my-topic");
        assert_eq!(n.access_token.as_deref(), Some("tk_secret"));
        assert!(!n.enable_music_notifications);
        assert!(n.enable_movie_notifications);
        assert_eq!(n.episode_format, "{series} {season}x{episode}");
        assert_eq!(n.server_url, "https://ntfy.sh");
        assert_eq!(config.server.port, 8096);
    }

    #[test]
    fn test_rejects_out_of_range_priority() {
        let file = write_config("[notifications]\npriority = 9\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn test_rejects_auth_without_key() {
        let file = write_config("[server.auth]\nenabled = true\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_blank_topic_is_not_a_load_error() {
        let file = write_config("[notifications]\ntopic = \"\"\n");
        let config = load_config(file.path()).unwrap();
        assert!(!config.notifications.has_target());
    }

    #[test]
    fn test_search_returns_first_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let found = dir.path().join("media-notifier.toml");
        std::fs::write(&found, "[notifications]\ntopic = \"found\"\n").unwrap();

        let missing = dir.path().join("config.toml");
        let search = [missing.to_str().unwrap(), found.to_str().unwrap()];

        let (config, path) = load_config_searching(None, &search).unwrap();
        assert_eq!(config.notifications.topic, "found");
        assert_eq!(path.as_deref(), Some(found.as_path()));
    }

    #[test]
    fn test_search_without_match_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");

        let (config, path) = load_config_searching(None, &[missing.to_str().unwrap()]).unwrap();
        assert!(path.is_none());
        assert_eq!(config.notifications.topic, Config::default().notifications.topic);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_config_searching(Some(&missing), &[]).is_err());
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let file = write_config("[notifications\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
