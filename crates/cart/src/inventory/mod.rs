//! Remote inventory: product details and stock levels.
//!
//! # Architecture
//!
//! - [`Inventory`] is the seam the cart talks to
//! - [`InventoryClient`] implements it over HTTP with `reqwest`
//! - Product lookups are cached via `moka`; stock is always fetched fresh
//!
//! # Endpoints
//!
//! - `GET /products` - the catalog
//! - `GET /products/{id}` - one product
//! - `GET /stock/{id}` - available quantity for one product

mod client;

pub use client::InventoryClient;

use std::future::Future;

use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the inventory API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status other than 404.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Base URL could not be combined with a path.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Source of product details and stock levels.
pub trait Inventory: Send + Sync {
    /// Fetch one product.
    fn product(&self, id: ProductId) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Fetch the current stock for one product.
    fn stock(&self, id: ProductId) -> impl Future<Output = Result<Stock, ApiError>> + Send;

    /// Fetch the full catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}
