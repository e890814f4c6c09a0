//! Wardrobe CLI - Database migrations and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront tables and the session table
//! wardrobe-cli migrate
//!
//! # Print the catalog the storefront would serve
//! wardrobe-cli catalog
//! wardrobe-cli catalog --path catalog.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wardrobe-cli")]
#[command(author, version, about = "Wardrobe CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Validate and print the product catalog
    Catalog {
        /// Catalog JSON file (defaults to `STOREFRONT_CATALOG_PATH`, then the built-in list)
        #[arg(short, long)]
        path: Option<PathBuf>,
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
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Catalog { path } => commands::catalog::print(path)?,
    }
    Ok(())
}
