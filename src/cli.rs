use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "media-notifier")]
#[command(author, version, about = "Push notifications for new library media")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server with the item-added webhook and admin API
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send a test notification to the configured topic
    Test {
        /// JSON array of library items to sample from
        #[arg(long)]
        items: Option<PathBuf>,
    },

    /// Show the notification an item would produce, without sending it
    Preview {
        /// JSON file holding a single item
        #[arg(required = true)]
        item: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,

    /// Generate a random API key for programmatic access
    GenerateApiKey,
}
