//! Shared test doubles for the cart's collaborators.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use treadly_core::{CurrencyCode, Price, ProductId};

use crate::cart::Product;
use crate::catalog::{CatalogError, CatalogService, StockLevel};
use crate::notify::Notifier;
use crate::storage::{SnapshotStore, StorageError};

/// A catalog product with plausible attributes.
pub fn product(id: i32, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::from_cents(13990, CurrencyCode::USD),
        image: format!("https://cdn.treadly.shop/products/{id}.jpg"),
    }
}

/// In-memory catalog with fixed products and stock levels.
#[derive(Default)]
pub struct StubCatalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    stock_calls: AtomicUsize,
    fail: bool,
}

impl StubCatalog {
    /// A catalog knowing `products`, with stock per `(id, amount)` pair.
    pub fn with(products: Vec<Product>, stock: &[(i32, u32)]) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: stock
                .iter()
                .map(|&(id, amount)| (ProductId::new(id), amount))
                .collect(),
            stock_calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A catalog whose every request fails, as if the service were down.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of stock lookups served so far.
    pub fn stock_fetches(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    fn outage() -> CatalogError {
        CatalogError::Api {
            status: 503,
            message: "catalog offline".to_string(),
        }
    }
}

impl CatalogService for StubCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if self.fail {
            return Err(Self::outage());
        }
        self.products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::outage());
        }
        self.stock
            .get(&id)
            .map(|&amount| StockLevel { id, amount })
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Notification sink that records every message it is given.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget everything received so far.
    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Store whose writes always fail, as if the slot were read-only.
pub struct FailingStore;

impl SnapshotStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _snapshot: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            ErrorKind::PermissionDenied,
            "slot is read-only",
        )))
    }
}
