//! Treadly CLI - drive the storefront cart from a terminal.
//!
//! The composition root for the cart: wires the HTTP catalog, the
//! file-backed snapshot store, and the tracing notification sink into one
//! [`NotifyingCart`], then runs a single command against it. State survives
//! between invocations through the snapshot file.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! treadly show
//!
//! # Add one unit of product 1
//! treadly add 1
//!
//! # Set product 1 to 3 units
//! treadly set-amount 1 3
//!
//! # Remove product 1
//! treadly remove 1
//! ```
//!
//! Configuration comes from the environment (see `treadly-cart`'s config
//! module): `TREADLY_CATALOG_URL` is required.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Rendering the cart to stdout is this binary's job.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use treadly_cart::catalog::HttpCatalog;
use treadly_cart::config::CartConfig;
use treadly_cart::manager::CartManager;
use treadly_cart::notify::{NotifyingCart, TracingNotifier};
use treadly_cart::storage::FileStore;
use treadly_cart::Cart;
use treadly_core::ProductId;

#[derive(Parser)]
#[command(name = "treadly")]
#[command(author, version, about = "Treadly cart driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product id
        product_id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product_id: i32,
    },
    /// Set the amount of a product already in the cart
    SetAmount {
        /// Catalog product id
        product_id: i32,
        /// New amount (0 is ignored)
        amount: u32,
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
    let config = CartConfig::from_env()?;
    let catalog = HttpCatalog::new(&config.catalog)?;
    let store = FileStore::new(&config.storage_path);

    let manager = CartManager::restore(catalog, store);
    let mut cart = NotifyingCart::new(manager, TracingNotifier);

    match cli.command {
        Commands::Show => {}
        Commands::Add { product_id } => {
            cart.add_product(ProductId::new(product_id)).await;
        }
        Commands::Remove { product_id } => {
            cart.remove_product(ProductId::new(product_id));
        }
        Commands::SetAmount { product_id, amount } => {
            cart.update_product_amount(ProductId::new(product_id), amount)
                .await;
        }
    }

    render(cart.cart());
    Ok(())
}

/// Print the cart, one line item per row.
fn render(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart.items() {
        println!(
            "{:>3} x {} - {} (id {})",
            item.amount,
            item.product.title,
            item.product.price,
            item.product_id()
        );
    }
    println!(
        "{} line item(s), {} unit(s)",
        cart.len(),
        cart.total_quantity()
    );
}
