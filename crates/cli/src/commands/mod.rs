//! CLI command implementations.

pub mod cart;
pub mod catalog;

use rocketshoes_cart::{ApiError, Cart, CartConfig, FileStorage, InventoryClient, LogNotifier};

/// The cart as the CLI runs it: HTTP inventory, file-backed storage, logged toasts.
pub type CliCart = Cart<InventoryClient, FileStorage, LogNotifier>;

/// Restore the cart described by `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn open_cart(config: &CartConfig) -> Result<CliCart, ApiError> {
    let inventory = InventoryClient::new(&config.inventory)?;
    let storage = FileStorage::new(&config.storage_path);
    tracing::debug!(
        api = %inventory.base_url(),
        storage = %storage.path().display(),
        "Opening cart"
    );
    Ok(Cart::load(inventory, storage, LogNotifier))
}
