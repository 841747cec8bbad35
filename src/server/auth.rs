//! API key authentication for the `/api` routes.

use crate::config::AuthConfig;
use crate::server::AppContext;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeader,
};

/// Check the bearer token against the configured API key
fn check_api_key(
    auth_config: &AuthConfig,
    bearer_token: Option<&str>,
) -> Result<(), (StatusCode, &'static str)> {
    if !auth_config.enabled {
        return Ok(());
    }

    match (bearer_token, auth_config.api_key.as_deref()) {
        (Some(token), Some(api_key)) if token == api_key => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "Authentication required")),
    }
}

/// Middleware for API key authentication
pub async fn api_auth_middleware(
    State(ctx): State<AppContext>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let bearer_token = bearer.map(|b| b.token().to_string());

    if let Err(rejection) = check_api_key(&ctx.config.server.auth, bearer_token.as_deref()) {
        tracing::debug!(path = %request.uri().path(), "Rejected unauthenticated API request");
        return Err(rejection);
    }

    Ok(next.run(request).await)
}

/// Generate a random API key for programmatic access
pub fn generate_api_key() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(enabled: bool, key: Option<&str>) -> AuthConfig {
        AuthConfig {
            enabled,
            api_key: key.map(String::from),
        }
    }

    #[test]
    fn test_disabled_auth_allows_everything() {
        assert!(check_api_key(&auth(false, None), None).is_ok());
    }

    #[test]
    fn test_matching_key_is_accepted() {
        assert!(check_api_key(&auth(true, Some("secret")), Some("secret")).is_ok());
    }

    #[test]
    fn test_missing_or_wrong_key_is_rejected() {
        let config = auth(true, Some("secret"));
        assert_eq!(
            check_api_key(&config, None).unwrap_err().0,
            StatusCode::UNAUTHORIZED
        );
        assert!(check_api_key(&config, Some("guess")).is_err());
        assert!(check_api_key(&auth(true, None), Some("anything")).is_err());
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
    }
}
