//! Treadly Cart - client-side cart state for the storefront UI.
//!
//! The cart manager owns an ordered collection of line items and exposes
//! three mutations (add, remove, set-amount) plus a read view. Mutations are
//! validated against the stock ceiling reported by the catalog service, and
//! every successful mutation overwrites the persisted snapshot, so storage
//! always matches memory.
//!
//! Two surfaces are provided:
//! - [`manager::CartManager`] returns typed results and never notifies;
//! - [`notify::NotifyingCart`] wraps it for UIs that want "did it change"
//!   plus a message pushed to the notification sink on every failure.
//!
//! # Example
//!
//! ```rust,ignore
//! use treadly_cart::catalog::HttpCatalog;
//! use treadly_cart::config::CartConfig;
//! use treadly_cart::manager::CartManager;
//! use treadly_cart::notify::{NotifyingCart, TracingNotifier};
//! use treadly_cart::storage::FileStore;
//! use treadly_core::ProductId;
//!
//! let config = CartConfig::from_env()?;
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let store = FileStore::new(&config.storage_path);
//!
//! let manager = CartManager::restore(catalog, store);
//! let mut cart = NotifyingCart::new(manager, TracingNotifier);
//!
//! cart.add_product(ProductId::new(1)).await;
//! for item in cart.cart().items() {
//!     // render the line
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod notify;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use cart::{Cart, LineItem, Product};
pub use error::{CartError, ServiceError};
pub use manager::CartManager;
pub use notify::{Notifier, NotifyingCart, TracingNotifier};
