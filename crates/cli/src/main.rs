//! UB-Jewellers CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! ubj-cli migrate
//!
//! # Load products from a JSON array, replacing what is there
//! ubj-cli seed products data/products.json --clear
//!
//! # Mint a session token for local testing
//! ubj-cli token '{"email":"dev@example.com"}'
//! ```
//!
//! All commands read the same environment as the server (`.env` included).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ubj-cli")]
#[command(author, version, about = "UB-Jewellers CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert documents from a JSON array file into a collection
    Seed {
        /// Collection name (`products`, `reviews`, `navNotifications`, `categories`, `cart`)
        collection: String,

        /// Path to a JSON file holding an array of objects
        file: PathBuf,

        /// Remove existing documents first
        #[arg(long)]
        clear: bool,
    },
    /// Issue a session token for an identity object
    Token {
        /// Identity as a JSON object, e.g. `{"email":"dev@example.com"}`
        identity: String,
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
        Commands::Seed {
            collection,
            file,
            clear,
        } => commands::seed::run(&collection, &file, clear).await?,
        Commands::Token { identity } => commands::token::run(&identity)?,
    }
    Ok(())
}
