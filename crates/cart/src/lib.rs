//! RocketShoes cart library.
//!
//! Client-side cart state for the storefront: add, remove, and change the
//! amount of products, with every change mirrored to local storage and every
//! increase checked against the remote stock.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{Cart, CartConfig, FileStorage, InventoryClient, LogNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let inventory = InventoryClient::new(&config.inventory)?;
//! let storage = FileStorage::new(&config.storage_path);
//!
//! let mut cart = Cart::load(inventory, storage, LogNotifier);
//! cart.add_product(ProductId::new(1)).await?;
//! cart.update_product_amount(ProductId::new(1), 3).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod inventory;
pub mod notifier;
pub mod storage;

pub use cart::Cart;
pub use config::{CartConfig, ConfigError, InventoryConfig};
pub use error::CartError;
pub use inventory::{ApiError, Inventory, InventoryClient};
pub use notifier::{CartMessage, LogNotifier, Notifier, RecordingNotifier};
pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};
