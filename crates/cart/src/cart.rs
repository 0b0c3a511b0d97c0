//! The cart state container.
//!
//! A [`Cart`] owns the in-memory list of [`CartItem`]s and mirrors it into a
//! [`CartStorage`]. Every mutation that raises an amount first checks the
//! remote stock through an [`Inventory`]. Failures are reported twice: as a
//! toast through the [`Notifier`] and as the returned [`CartError`].
//!
//! The new list is written to storage before it replaces the in-memory one,
//! so a failed write leaves both untouched.

use std::collections::BTreeMap;

use rocketshoes_core::{CartItem, Price, ProductId, Stock};
use tracing::{info, instrument, warn};

use crate::error::{CartError, Result};
use crate::inventory::Inventory;
use crate::notifier::{CartMessage, Notifier};
use crate::storage::{self, CartStorage};

/// Shopping cart backed by local storage and validated against remote stock.
pub struct Cart<I, S, N> {
    inventory: I,
    storage: S,
    notifier: N,
    items: Vec<CartItem>,
}

impl<I, S, N> Cart<I, S, N>
where
    I: Inventory,
    S: CartStorage,
    N: Notifier,
{
    /// Restore the cart from storage.
    ///
    /// Starts empty when nothing usable is stored.
    pub fn load(inventory: I, storage: S, notifier: N) -> Self {
        let items = storage::load_cart(&storage);
        Self {
            inventory,
            storage,
            notifier,
            items,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Amount of one product in the cart, zero when absent.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map_or(0, |item| item.amount)
    }

    /// Amount per product.
    #[must_use]
    pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
        self.items
            .iter()
            .map(|item| (item.id(), item.amount))
            .collect()
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total_amount(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    #[must_use]
    pub const fn inventory(&self) -> &I {
        &self.inventory
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented if stock allows. A new
    /// product is fetched from the inventory and added with an amount of one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutOfStock` if the stock cannot cover the new
    /// amount, or the inventory/storage error that stopped the operation.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) -> Result<()> {
        let result = self.try_add(product_id).await;
        self.report(result, CartMessage::AddFailed)
    }

    /// Remove a product entirely.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product is absent, or the storage
    /// error if the write failed.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<()> {
        let result = self.try_remove(product_id);
        self.report(result, CartMessage::RemoveFailed)
    }

    /// Set the amount of a product already in the cart.
    ///
    /// An amount of zero is ignored: nothing is fetched, stored, or shown.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product is absent,
    /// `CartError::OutOfStock` if the stock cannot cover `amount`, or the
    /// inventory/storage error that stopped the operation.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(&mut self, product_id: ProductId, amount: u32) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }

        let result = self.try_update(product_id, amount).await;
        self.report(result, CartMessage::UpdateFailed)
    }

    async fn try_add(&mut self, product_id: ProductId) -> Result<()> {
        let mut next = self.items.clone();

        if let Some(item) = next.iter_mut().find(|item| item.id() == product_id) {
            let requested = item.amount.saturating_add(1);
            let stock = self.inventory.stock(product_id).await?;
            ensure_stock(&stock, product_id, requested)?;
            item.amount = requested;
        } else {
            let product = self.inventory.product(product_id).await?;
            let stock = self.inventory.stock(product_id).await?;
            ensure_stock(&stock, product_id, 1)?;
            next.push(CartItem::first(product));
        }

        self.commit(next)?;
        info!(amount = self.amount_of(product_id), "Product added to cart");
        Ok(())
    }

    fn try_remove(&mut self, product_id: ProductId) -> Result<()> {
        if self.find(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();

        self.commit(next)?;
        info!("Product removed from cart");
        Ok(())
    }

    async fn try_update(&mut self, product_id: ProductId, amount: u32) -> Result<()> {
        if self.find(product_id).is_none() {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.inventory.stock(product_id).await?;
        ensure_stock(&stock, product_id, amount)?;

        let mut next = self.items.clone();
        if let Some(item) = next.iter_mut().find(|item| item.id() == product_id) {
            item.amount = amount;
        }

        self.commit(next)?;
        info!(amount, "Product amount updated");
        Ok(())
    }

    fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    /// Persist `next`, then make it the current state.
    fn commit(&mut self, next: Vec<CartItem>) -> Result<()> {
        storage::save_cart(&self.storage, &next)?;
        self.items = next;
        Ok(())
    }

    /// Toast a failed operation and pass the result through.
    fn report(&self, result: Result<()>, fallback: CartMessage) -> Result<()> {
        if let Err(e) = &result {
            warn!(error = %e, "Cart operation failed");
            self.notifier.error(e.toast(fallback));
        }
        result
    }
}

fn ensure_stock(stock: &Stock, product_id: ProductId, requested: u32) -> Result<()> {
    if stock.covers(requested) {
        Ok(())
    } else {
        Err(CartError::OutOfStock {
            product_id,
            requested,
            available: stock.amount,
        })
    }
}
