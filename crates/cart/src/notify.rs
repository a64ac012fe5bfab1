//! User-facing failure notifications.
//!
//! The cart core returns typed results and never talks to the user.
//! [`NotifyingCart`] is the UI boundary: it swallows those results into a
//! "did the cart change" answer and forwards one short message per failure
//! to the notification sink.

use tracing::{error, warn};
use treadly_core::ProductId;

use crate::cart::Cart;
use crate::catalog::CatalogService;
use crate::error::CartError;
use crate::manager::CartManager;
use crate::storage::SnapshotStore;

/// Message shown for any out-of-stock rejection.
const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
/// Generic per-operation failure messages.
const ADD_FAILED: &str = "Could not add the product to the cart";
const REMOVE_FAILED: &str = "Could not remove the product from the cart";
const UPDATE_FAILED: &str = "Could not update the product quantity";

/// Fire-and-forget sink for short, human-readable error messages.
///
/// The cart never waits on or inspects the outcome of a notification.
pub trait Notifier {
    /// Display a message to the user.
    fn notify(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, message: &str) {
        (**self).notify(message);
    }
}

/// Default sink: logs the message at warn level.
///
/// Used when no toast layer is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!("{message}");
    }
}

/// UI-facing cart adapter.
///
/// Exposes the same four entry points as [`CartManager`] but reports only
/// whether the cart changed; every failure is surfaced to the user through
/// the sink instead of the return value.
pub struct NotifyingCart<C, S, N> {
    manager: CartManager<C, S>,
    notifier: N,
}

impl<C: CatalogService, S: SnapshotStore, N: Notifier> NotifyingCart<C, S, N> {
    /// Wrap a manager with a notification sink.
    pub const fn new(manager: CartManager<C, S>, notifier: N) -> Self {
        Self { manager, notifier }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.manager.cart()
    }

    /// Add one unit of a product. Returns whether the cart changed.
    pub async fn add_product(&mut self, product_id: ProductId) -> bool {
        let result = self.manager.add_product(product_id).await;
        self.surface(result, ADD_FAILED)
    }

    /// Remove a product's line item. Returns whether the cart changed.
    pub fn remove_product(&mut self, product_id: ProductId) -> bool {
        let result = self.manager.remove_product(product_id);
        self.surface(result, REMOVE_FAILED)
    }

    /// Set a line item to an explicit amount. Returns whether the cart
    /// changed; an amount of 0 is ignored without a notification.
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        let result = self.manager.update_product_amount(product_id, amount).await;
        self.surface(result, UPDATE_FAILED)
    }

    /// Map a typed result onto the sink: one message per failure, chosen by
    /// error kind, falling back to the operation's generic message.
    fn surface(&self, result: Result<(), CartError>, failed: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(CartError::OutOfStock) => {
                self.notifier.notify(OUT_OF_STOCK);
                false
            }
            Err(CartError::NotFound(_)) => {
                self.notifier.notify(failed);
                false
            }
            Err(CartError::Service(err)) => {
                error!(error = %err, "cart operation failed");
                self.notifier.notify(failed);
                false
            }
        }
    }
}
