mod cli;

use media_notifier::{
    config,
    library::InMemoryCatalog,
    notifications::{self, NtfyClient, PublishTarget},
    server::{self, auth},
};
use media_notifier_common::MediaItem;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    // Load config
    let (mut config, config_file) = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting media-notifier server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    if !config.notifications.has_target() {
        tracing::warn!("No relay target configured; item events will be ignored");
    }

    match config_file {
        Some(ref path) => tracing::info!("Settings edits will be saved to {:?}", path),
        None => tracing::info!("No config file loaded; settings edits will not be saved"),
    }

    server::start_server(config, config_file).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "media_notifier=trace,media_notifier_common=debug,tower_http=debug".to_string()
        } else {
            "media_notifier=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Test { items } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(send_test(items.as_deref(), cli.config.as_deref()))
        }
        Commands::Preview { item } => preview_item(&item, cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("media-notifier {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::GenerateApiKey => {
            println!("{}", auth::generate_api_key());
            Ok(())
        }
    }
}

async fn send_test(items: Option<&Path>, config_path: Option<&Path>) -> Result<()> {
    let (config, _) = config::load_config_or_default(config_path)?;

    let items_path = items.or(config.library.items_file.as_deref());
    let catalog = match items_path {
        Some(path) => InMemoryCatalog::load_json(path)
            .with_context(|| format!("Failed to load library items: {:?}", path))?,
        None => InMemoryCatalog::new(),
    };

    let result =
        notifications::send_test_notification(&config.notifications, &catalog, &NtfyClient::new())
            .await;

    if result.success {
        println!("✓ {}", result.message);
        Ok(())
    } else {
        anyhow::bail!("{}", result.message)
    }
}

fn preview_item(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let (config, _) = config::load_config_or_default(config_path)?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read item file: {:?}", path))?;
    let item: MediaItem = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse item file: {:?}", path))?;

    let settings = &config.notifications;
    let message = notifications::compose_message(&item, settings);

    println!("Title:    {}", message.title);
    println!("Body:     {}", message.body);
    println!("Tags:     {}", message.tags.as_deref().unwrap_or(""));
    if let Some(priority) = message.priority {
        println!("Priority: {}", priority);
    }

    match notifications::screen(&item, Some(settings)) {
        Ok((_, category)) => println!(
            "\nWould send ({}) to {}",
            category,
            PublishTarget::from_config(settings).endpoint()
        ),
        Err(reason) => println!("\nWould be skipped: {}", reason),
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            let n = &config.notifications;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Auth enabled: {}", config.server.auth.enabled);
            println!("  Relay: {}", PublishTarget::from_config(n).endpoint());
            println!("  Movies: {}", n.enable_movie_notifications);
            println!("  Series: {}", n.enable_series_notifications);
            println!("  Music: {}", n.enable_music_notifications);
            println!("  Thumbnails: {}", n.enable_thumbnails);
            println!("  Priority: {}", n.priority);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!(
                "  Relay: {}",
                PublishTarget::from_config(&config.notifications).endpoint()
            );
        }
    }

    Ok(())
}
