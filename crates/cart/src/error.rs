//! Cart operation errors.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::inventory::ApiError;
use crate::notifier::CartMessage;
use crate::storage::StorageError;

/// Why a cart operation was rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested amount is more than the remote stock.
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Inventory API request failed.
    #[error("Inventory error: {0}")]
    Inventory(#[from] ApiError),

    /// Writing the cart to storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Toast for this error, given the operation's generic failure toast.
    #[must_use]
    pub const fn toast(&self, fallback: CartMessage) -> CartMessage {
        match self {
            Self::OutOfStock { .. } => CartMessage::OutOfStock,
            _ => fallback,
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
