//! contact-api entry point
//!
//! `contact-api` (or `contact-api serve`) runs the HTTP server;
//! `contact-api migrate` creates the database if needed and applies migrations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use contact_api::{config::Config, migration, server, telemetry};
use tracing::info;

/// Contact management REST API
#[derive(Parser, Debug)]
#[command(name = "contact-api", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default).
    Serve,

    /// Create the database if missing and apply pending migrations.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    telemetry::init(&config.telemetry);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            info!("Starting contact API");
            info!("HTTP server listening on {}", config.http_addr());
            server::run(config).await
        }
        Commands::Migrate => migration::run_migrations(&config).await,
    }
}
