//! Cart state types.
//!
//! The cart is an immutable value: every mutation produces a new `Cart` and
//! the previous value is discarded, never aliased. [`crate::manager::CartManager`]
//! owns the current value and swaps it in only after the snapshot write
//! succeeds.

use serde::{Deserialize, Serialize};
use treadly_core::{Price, ProductId};

/// A product as described by the catalog.
///
/// The cart carries these attributes for display; only the id participates
/// in cart transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
}

/// One product's quantity in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product this line holds, as fetched when it was added.
    pub product: Product,
    /// Units of the product. Always >= 1; a line never persists at 0.
    pub amount: u32,
}

impl LineItem {
    /// Id of the product this line holds.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }
}

/// Ordered cart contents. Insertion order is the order products were added.
///
/// At most one line item exists per product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line item for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// The stored amount for a product, if present.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> Option<u32> {
        self.line(product_id).map(|item| item.amount)
    }

    /// Whether a line item exists for the product.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// A new cart with a line item for `product` appended at amount 1.
    #[must_use]
    pub(crate) fn with_added(&self, product: Product) -> Self {
        let mut items = self.items.clone();
        items.push(LineItem { product, amount: 1 });
        Self { items }
    }

    /// A new cart with the line item for `product_id` set to `amount`.
    ///
    /// Positions of all lines are preserved. Absent ids yield an unchanged
    /// copy; callers check presence first.
    #[must_use]
    pub(crate) fn with_amount(&self, product_id: ProductId, amount: u32) -> Self {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.product_id() == product_id {
                    LineItem {
                        product: item.product.clone(),
                        amount,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Self { items }
    }

    /// A new cart with the line item for `product_id` filtered out.
    ///
    /// A clean exclusion: the remaining lines keep their relative order and
    /// the sequence can never contain a gap.
    #[must_use]
    pub(crate) fn without(&self, product_id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|item| item.product_id() != product_id)
            .cloned()
            .collect();
        Self { items }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::product;

    #[test]
    fn test_with_added_appends_in_order() {
        let cart = Cart::default()
            .with_added(product(1, "Alpine Runner"))
            .with_added(product(2, "Court Classic"))
            .with_added(product(3, "Trail Blazer"));

        let ids: Vec<i32> = cart.items().iter().map(|i| i.product_id().as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(cart.items().iter().all(|i| i.amount == 1));
    }

    #[test]
    fn test_without_keeps_relative_order() {
        let cart = Cart::default()
            .with_added(product(1, "Alpine Runner"))
            .with_added(product(2, "Court Classic"))
            .with_added(product(3, "Trail Blazer"))
            .without(ProductId::new(2));

        let ids: Vec<i32> = cart.items().iter().map(|i| i.product_id().as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_with_amount_touches_only_the_target() {
        let cart = Cart::default()
            .with_added(product(1, "Alpine Runner"))
            .with_added(product(2, "Court Classic"))
            .with_amount(ProductId::new(2), 4);

        assert_eq!(cart.amount_of(ProductId::new(1)), Some(1));
        assert_eq!(cart.amount_of(ProductId::new(2)), Some(4));
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_mutations_leave_the_source_cart_alone() {
        let before = Cart::default().with_added(product(1, "Alpine Runner"));
        let _ = before.with_amount(ProductId::new(1), 9);
        let _ = before.without(ProductId::new(1));

        assert_eq!(before.amount_of(ProductId::new(1)), Some(1));
    }

    #[test]
    fn test_snapshot_is_a_plain_array() {
        let cart = Cart::default().with_added(product(1, "Alpine Runner"));
        let snapshot = serde_json::to_string(&cart).unwrap();
        assert!(snapshot.starts_with('['));

        let back: Cart = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(back, cart);
    }
}
