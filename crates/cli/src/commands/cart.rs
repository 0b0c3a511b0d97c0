//! Cart commands.
//!
//! Failures have already been toasted by the cart when these return `Err`.

use rocketshoes_cart::CartError;
use rocketshoes_core::ProductId;
use tracing::info;

use super::CliCart;

/// Print the cart lines and subtotal.
pub fn show(cart: &CliCart) {
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    info!(
        "Cart: {} products, {} items",
        cart.len(),
        cart.total_amount()
    );
    for item in cart.items() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            item.id(),
            item.product.title,
            item.amount,
            item.product.price,
            item.subtotal()
        );
    }
    info!("Subtotal: {}", cart.subtotal());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns the cart error if the product could not be added.
pub async fn add(cart: &mut CliCart, id: ProductId) -> Result<(), CartError> {
    cart.add_product(id).await?;
    info!("Product {id} in cart: {}", cart.amount_of(id));
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns the cart error if the product could not be removed.
pub fn remove(cart: &mut CliCart, id: ProductId) -> Result<(), CartError> {
    cart.remove_product(id)?;
    info!("Product {id} removed, {} products left", cart.len());
    Ok(())
}

/// Set the amount of a product.
///
/// # Errors
///
/// Returns the cart error if the amount could not be changed.
pub async fn update(cart: &mut CliCart, id: ProductId, amount: u32) -> Result<(), CartError> {
    if amount == 0 {
        info!("Amount must be at least 1, nothing changed");
        return Ok(());
    }

    cart.update_product_amount(id, amount).await?;
    info!("Product {id} in cart: {}", cart.amount_of(id));
    Ok(())
}
