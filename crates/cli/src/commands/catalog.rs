//! Product catalog listing.

use rocketshoes_cart::{ApiError, Inventory};
use tracing::info;

use super::CliCart;

/// List every product with the amount already in the cart.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list(cart: &CliCart) -> Result<(), ApiError> {
    let products = cart.inventory().products().await?;
    let amounts = cart.amounts();

    info!("{} products", products.len());
    for product in &products {
        let in_cart = amounts.get(&product.id).copied().unwrap_or(0);
        info!(
            "  [{}] {} - {} ({in_cart} in cart)",
            product.id,
            product.title,
            product.price
        );
    }

    Ok(())
}
