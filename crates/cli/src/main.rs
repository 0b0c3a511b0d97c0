//! RocketShoes CLI - the storefront cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with the amount of each product already in the cart
//! rs-cart products
//!
//! # Show the cart
//! rs-cart show
//!
//! # Add one unit of product 3
//! rs-cart add 3
//!
//! # Set product 3 to two units
//! rs-cart update 3 2
//!
//! # Remove product 3
//! rs-cart remove 3
//! ```
//!
//! The inventory API URL and the local-storage file come from the
//! environment (see `rocketshoes_cart::config`) and can be overridden with
//! `--api-url` and `--storage`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rocketshoes_cart::CartConfig;
use rocketshoes_core::ProductId;
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes cart")]
struct Cli {
    /// Inventory API base URL
    #[arg(long, global = true)]
    api_url: Option<Url>,

    /// Local-storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the amount of a product in the cart (0 is ignored)
    Update {
        /// Product id
        id: ProductId,
        /// New amount
        amount: u32,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cli=info,rocketshoes_cart=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.inventory.base_url = api_url;
    }
    if let Some(storage) = cli.storage {
        config.storage_path = storage;
    }

    let mut cart = commands::open_cart(&config)?;

    match cli.command {
        Commands::Products => commands::catalog::list(&cart).await?,
        Commands::Show => commands::cart::show(&cart),
        Commands::Add { id } => commands::cart::add(&mut cart, id).await?,
        Commands::Remove { id } => commands::cart::remove(&mut cart, id)?,
        Commands::Update { id, amount } => commands::cart::update(&mut cart, id, amount).await?,
    }
    Ok(())
}
