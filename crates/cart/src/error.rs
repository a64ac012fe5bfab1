//! Typed results for cart operations.
//!
//! Mutations return these instead of notifying anyone; the notification
//! policy lives at the UI boundary (see [`crate::notify::NotifyingCart`]).

use thiserror::Error;
use treadly_core::ProductId;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Failure of a collaborator the cart depends on.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Catalog or stock lookup failed.
    #[error("catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    /// Snapshot write failed.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}

/// Outcome of a cart mutation, when it is not a success.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity exceeds the stock ceiling.
    #[error("requested quantity is out of stock")]
    OutOfStock,

    /// The operation targets a product that is not in the cart.
    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    /// A catalog lookup or snapshot write failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        Self::Service(ServiceError::Catalog(err))
    }
}

impl From<StorageError> for CartError {
    fn from(err: StorageError) -> Self {
        Self::Service(ServiceError::Storage(err))
    }
}
