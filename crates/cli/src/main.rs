//! Showcase CLI - database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! showcase-cli migrate
//!
//! # Load the bundled demo catalogue
//! showcase-cli seed
//!
//! # Load a different fixture file
//! showcase-cli seed --file path/to/catalogue.yaml
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Replace products and settings with fixture data

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "showcase-cli")]
#[command(author, version, about = "Showcase CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Replace products and settings with fixture data
    Seed {
        /// YAML fixture file
        #[arg(short, long, default_value = commands::seed::DEFAULT_SEED_FILE)]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::run(&file).await?,
    }
    Ok(())
}
