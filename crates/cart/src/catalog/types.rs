//! Wire types for the catalog service.

use serde::{Deserialize, Serialize};
use treadly_core::ProductId;

/// Current availability for a product, as reported by the catalog.
///
/// Ephemeral: fetched per validation and discarded, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Catalog product id.
    pub id: ProductId,
    /// Units currently obtainable — the stock ceiling.
    pub amount: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_wire_format() {
        let stock: StockLevel = serde_json::from_str(r#"{"id":1,"amount":5}"#).unwrap();
        assert_eq!(stock.id, ProductId::new(1));
        assert_eq!(stock.amount, 5);
    }
}
