//! Tienda Austral CLI - Store seeding and validation tools.
//!
//! # Usage
//!
//! ```bash
//! # Write a demo catalog and empty user/order collections
//! tienda-cli seed
//!
//! # Seed into a specific directory, replacing an existing catalog
//! tienda-cli seed -d ./data --force
//!
//! # Validate that all collection files load
//! tienda-cli check -d ./data
//! ```
//!
//! # Commands
//!
//! - `seed` - Write demo data into the data directory
//! - `check` - Load every store and report collection counts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tienda-cli")]
#[command(author, version, about = "Tienda Austral CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a demo catalog and empty user/order collections
    Seed {
        /// Data directory to seed
        #[arg(short, long, default_value = "data")]
        data_dir: String,

        /// Overwrite an existing product catalog
        #[arg(short, long)]
        force: bool,
    },
    /// Load every collection and report counts
    Check {
        /// Data directory to validate
        #[arg(short, long, default_value = "data")]
        data_dir: String,
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
        Commands::Seed { data_dir, force } => commands::seed::run(&data_dir, force).await?,
        Commands::Check { data_dir } => commands::check::run(&data_dir).await?,
    }
    Ok(())
}
