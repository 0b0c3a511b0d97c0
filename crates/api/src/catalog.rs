//! Product catalog and stock levels loaded from a JSON seed file.
//!
//! The seed file has the shape:
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "...", "price": 179.9, "image": "..." }],
//!   "stock": [{ "id": 1, "amount": 3 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rocketshoes_core::{Product, ProductId, Stock};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),

    #[error("Duplicate stock record for product {0}")]
    DuplicateStock(ProductId),
}

#[derive(Debug, Deserialize)]
struct Seed {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// Read-only products and stock.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    stock: Vec<Stock>,
    product_index: HashMap<ProductId, usize>,
    stock_index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids. Seed order is kept for listings.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` or `CatalogError::DuplicateStock`
    /// if an id appears twice.
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Result<Self, CatalogError> {
        let mut product_index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if product_index.insert(product.id, i).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        let mut stock_index = HashMap::with_capacity(stock.len());
        for (i, record) in stock.iter().enumerate() {
            if stock_index.insert(record.id, i).is_some() {
                return Err(CatalogError::DuplicateStock(record.id));
            }
        }

        let orphans = stock
            .iter()
            .filter(|s| !product_index.contains_key(&s.id))
            .count();
        if orphans > 0 {
            tracing::warn!(orphans, "Stock records without a matching product");
        }

        Ok(Self {
            products,
            stock,
            product_index,
            stock_index,
        })
    }

    /// Parse a catalog from seed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let seed: Seed = serde_json::from_str(raw)?;
        Self::new(seed.products, seed.stock)
    }

    /// Load a catalog from a seed file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid seed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.product_index
            .get(&id)
            .and_then(|&i| self.products.get(i))
    }

    #[must_use]
    pub fn stock(&self) -> &[Stock] {
        &self.stock
    }

    #[must_use]
    pub fn stock_of(&self, id: ProductId) -> Option<Stock> {
        self.stock_index
            .get(&id)
            .and_then(|&i| self.stock.get(i))
            .copied()
    }
}
