use crate::config::{Config, NotificationConfig};
use crate::library::InMemoryCatalog;
use crate::notifications::{Dispatcher, NtfyClient};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod auth;
pub mod routes_api;
pub mod routes_config;
pub mod routes_notify;
pub mod routes_webhook;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Path to config file (for persistence)
    pub config_path: Option<PathBuf>,
    /// Live notification settings (can be edited via API)
    pub notifications: Arc<RwLock<NotificationConfig>>,
    pub catalog: Arc<InMemoryCatalog>,
    pub client: NtfyClient,
    pub dispatcher: Dispatcher,
}

impl AppContext {
    /// Build the context. Deliveries are spawned on `runtime`.
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        catalog: InMemoryCatalog,
        runtime: Handle,
    ) -> Self {
        let client = NtfyClient::new();
        Self {
            notifications: Arc::new(RwLock::new(config.notifications.clone())),
            config: Arc::new(config),
            config_path,
            catalog: Arc::new(catalog),
            dispatcher: Dispatcher::new(client.clone(), runtime),
            client,
        }
    }

    /// Copy of the current notification settings.
    ///
    /// Each event works from its own snapshot so a concurrent edit never
    /// changes a message that is already being built.
    pub fn notification_snapshot(&self) -> NotificationConfig {
        self.notifications.read().clone()
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // API routes (with optional auth)
        .nest("/api", api_routes(&ctx))
        // Host library events
        .nest("/webhook", routes_webhook::webhook_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn api_routes(ctx: &AppContext) -> Router<AppContext> {
    let routes = routes_api::api_routes()
        .merge(routes_notify::notify_routes())
        .merge(routes_config::config_routes());

    if ctx.config.server.auth.enabled {
        routes.layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::api_auth_middleware,
        ))
    } else {
        routes
    }
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Start the HTTP server
pub async fn start_server(config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let catalog = match config.library.items_file {
        Some(ref path) => InMemoryCatalog::load_json(path)
            .with_context(|| format!("Failed to load library items: {:?}", path))?,
        None => InMemoryCatalog::new(),
    };
    tracing::info!("Catalog seeded with {} items", catalog.len());

    let ctx = AppContext::new(config, config_path, catalog, Handle::current());
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
