//! Cart mutations validated against the stock ceiling.

use tracing::{instrument, warn};
use treadly_core::ProductId;

use crate::cart::Cart;
use crate::catalog::CatalogService;
use crate::error::CartError;
use crate::storage::{SnapshotStore, StorageError, storage_keys};

/// Owns the cart for the lifetime of a UI session.
///
/// Collaborators are injected at construction; the manager holds the only
/// mutable handle to the cart and exposes a read-only view. Mutations take
/// `&mut self`, so two operations can never overlap on one manager. An async
/// mutation validates against the state it read before suspending at its
/// catalog fetch; reads interleaved during that window observe the
/// pre-mutation cart. That check-then-commit window is an accepted
/// limitation, not something the manager locks against.
pub struct CartManager<C, S> {
    catalog: C,
    store: S,
    cart: Cart,
}

impl<C: CatalogService, S: SnapshotStore> CartManager<C, S> {
    /// Create a manager with the cart restored from the snapshot store.
    ///
    /// An absent, unreadable, or unparseable snapshot yields an empty cart;
    /// restoring never fails.
    pub fn restore(catalog: C, store: S) -> Self {
        let cart = match store.read(storage_keys::CART) {
            Ok(Some(snapshot)) => match serde_json::from_str(&snapshot) {
                Ok(cart) => cart,
                Err(err) => {
                    warn!(error = %err, "discarding unparseable cart snapshot");
                    Cart::default()
                }
            },
            Ok(None) => Cart::default(),
            Err(err) => {
                warn!(error = %err, "cart snapshot unavailable, starting empty");
                Cart::default()
            }
        };

        Self {
            catalog,
            store,
            cart,
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product, appending a new line item if needed.
    ///
    /// # Errors
    ///
    /// `OutOfStock` when the cart already holds all obtainable units (or the
    /// product has none); `Service` when either catalog lookup or the
    /// snapshot write fails. The cart is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        // Product attributes and the stock ceiling are both required before
        // any mutation; either lookup failing aborts the add.
        let product = self.catalog.product(product_id).await?;
        let stock = self.catalog.stock(product_id).await?;

        let next = match self.cart.amount_of(product_id) {
            Some(amount) => {
                if amount >= stock.amount {
                    return Err(CartError::OutOfStock);
                }
                self.cart.with_amount(product_id, amount + 1)
            }
            None => {
                if stock.amount < 1 {
                    return Err(CartError::OutOfStock);
                }
                self.cart.with_added(product)
            }
        };

        self.commit(next)
    }

    /// Remove a product's line item entirely. Synchronous; no catalog call.
    ///
    /// # Errors
    ///
    /// `NotFound` when the product has no line item; `Service` when the
    /// snapshot write fails. The cart is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }

        self.commit(self.cart.without(product_id))
    }

    /// Set a line item to an explicit amount.
    ///
    /// An amount of 0 is intentionally ignored and reports success without
    /// touching anything. Decreases apply without a stock fetch — shrinking
    /// a line is always safe. Increases (and equal amounts) validate against
    /// the ceiling first.
    ///
    /// # Errors
    ///
    /// `NotFound` when the product has no line item; `OutOfStock` when the
    /// catalog reports fewer units than requested; `Service` when the stock
    /// lookup or snapshot write fails. The cart is unchanged on any error.
    #[instrument(skip(self), fields(product_id = %product_id, amount))]
    pub async fn update_product_amount(
        &mut self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        if amount == 0 {
            return Ok(());
        }

        let Some(current) = self.cart.amount_of(product_id) else {
            return Err(CartError::NotFound(product_id));
        };

        if amount >= current {
            let stock = self.catalog.stock(product_id).await?;
            if stock.amount < amount {
                return Err(CartError::OutOfStock);
            }
        }

        self.commit(self.cart.with_amount(product_id, amount))
    }

    /// Persist `next`, then make it current.
    ///
    /// The snapshot write happens first: a storage failure leaves the
    /// in-memory cart untouched, and after a success the persisted snapshot
    /// always deserializes to the in-memory cart.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.store.write(storage_keys::CART, &snapshot)?;
        self.cart = next;
        Ok(())
    }
}
