use crate::config::{persist, validate_notifications, NotificationConfig};
use crate::server::AppContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

pub fn config_routes() -> Router<AppContext> {
    Router::new().route(
        "/config/notifications",
        get(get_notifications).put(update_notifications),
    )
}

#[derive(Debug, Serialize)]
struct NotificationsResponse {
    server_url: String,
    topic: String,
    // Access token is not included in response for security
    has_access_token: bool,
    notification_title: String,
    enable_movie_notifications: bool,
    enable_series_notifications: bool,
    enable_music_notifications: bool,
    movie_format: String,
    episode_format: String,
    music_format: String,
    enable_thumbnails: bool,
    priority: u8,
}

impl From<&NotificationConfig> for NotificationsResponse {
    fn from(n: &NotificationConfig) -> Self {
        Self {
            server_url: n.server_url.clone(),
            topic: n.topic.clone(),
            has_access_token: n
                .access_token
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty()),
            notification_title: n.notification_title.clone(),
            enable_movie_notifications: n.enable_movie_notifications,
            enable_series_notifications: n.enable_series_notifications,
            enable_music_notifications: n.enable_music_notifications,
            movie_format: n.movie_format.clone(),
            episode_format: n.episode_format.clone(),
            music_format: n.music_format.clone(),
            enable_thumbnails: n.enable_thumbnails,
            priority: n.priority,
        }
    }
}

async fn get_notifications(State(ctx): State<AppContext>) -> impl IntoResponse {
    let notifications = ctx.notification_snapshot();
    Json(NotificationsResponse::from(&notifications))
}

/// Partial update; absent fields keep their value. An empty access token
/// clears it.
#[derive(Debug, Default, Deserialize)]
struct UpdateNotificationsRequest {
    server_url: Option<String>,
    topic: Option<String>,
    access_token: Option<String>,
    notification_title: Option<String>,
    enable_movie_notifications: Option<bool>,
    enable_series_notifications: Option<bool>,
    enable_music_notifications: Option<bool>,
    movie_format: Option<String>,
    episode_format: Option<String>,
    music_format: Option<String>,
    enable_thumbnails: Option<bool>,
    priority: Option<u8>,
}

impl UpdateNotificationsRequest {
    fn apply(self, n: &mut NotificationConfig) {
        if let Some(server_url) = self.server_url {
            n.server_url = server_url.trim().to_string();
        }
        if let Some(topic) = self.topic {
            n.topic = topic.trim().to_string();
        }
        if let Some(token) = self.access_token {
            let token = token.trim();
            n.access_token = (!token.is_empty()).then(|| token.to_string());
        }
        if let Some(title) = self.notification_title {
            n.notification_title = title;
        }
        if let Some(enabled) = self.enable_movie_notifications {
            n.enable_movie_notifications = enabled;
        }
        if let Some(enabled) = self.enable_series_notifications {
            n.enable_series_notifications = enabled;
        }
        if let Some(enabled) = self.enable_music_notifications {
            n.enable_music_notifications = enabled;
        }
        if let Some(format) = self.movie_format {
            n.movie_format = format;
        }
        if let Some(format) = self.episode_format {
            n.episode_format = format;
        }
        if let Some(format) = self.music_format {
            n.music_format = format;
        }
        if let Some(enabled) = self.enable_thumbnails {
            n.enable_thumbnails = enabled;
        }
        if let Some(priority) = self.priority {
            n.priority = priority;
        }
    }
}

async fn update_notifications(
    State(ctx): State<AppContext>,
    Json(req): Json<UpdateNotificationsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let snapshot = {
        let mut notifications = ctx.notifications.write();

        let mut updated = notifications.clone();
        req.apply(&mut updated);
        validate_notifications(&updated).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        *notifications = updated;
        notifications.clone()
    };
    tracing::info!(topic = %snapshot.topic, "Notification settings updated");

    // Persist to file, off the async workers and without the lock held
    if let Some(path) = ctx.config_path.clone() {
        let section = snapshot.clone();
        let written = tokio::task::spawn_blocking(move || {
            persist::update_notifications(&path, &section)
        })
        .await;

        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Failed to persist notification settings: {}", e),
            Err(e) => tracing::error!("Notification settings persist task failed: {}", e),
        }
    }

    Ok(Json(NotificationsResponse::from(&snapshot)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_masks_token() {
        let config = NotificationConfig {
            access_token: Some("tk_secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(NotificationsResponse::from(&config)).unwrap();

        assert_eq!(json["has_access_token"], true);
        assert!(json.get("access_token").is_none());
        assert!(!json.to_string().contains("tk_secret"));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut config = NotificationConfig {
            access_token: Some("old".to_string()),
            ..Default::default()
        };
        let req: UpdateNotificationsRequest = serde_json::from_value(serde_json::json!({
            "topic": "  movies  ",
            "enable_music_notifications": false,
            "access_token": ""
        }))
        .unwrap();
        req.apply(&mut config);

        assert_eq!(config.topic, "movies");
        assert!(!config.enable_music_notifications);
        assert!(config.enable_movie_notifications);
        assert!(config.access_token.is_none());
        assert_eq!(config.server_url, "https://ntfy.sh");
    }
}
