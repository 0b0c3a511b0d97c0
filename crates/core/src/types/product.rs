//! Catalog products, cart lines, and stock records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as served by the inventory API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// A product in the cart.
///
/// Serializes flat: the product fields plus `amount` on the same level, which
/// is the shape persisted in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    /// Put a product in the cart with an amount of one.
    #[must_use]
    pub const fn first(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.amount)
    }
}

/// Remote-reported available quantity for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    /// Whether `requested` units can be held in a cart.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Price::from_cents(17990),
            image: "https://example.com/tenis1.jpg".to_string(),
        }
    }

    #[test]
    fn test_cart_item_serializes_flat() {
        let item = CartItem {
            product: sneaker(),
            amount: 2,
        };

        let value = serde_json::to_value(&item).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "Tênis de Caminhada Leve Confortável",
                "price": 179.9,
                "image": "https://example.com/tenis1.jpg",
                "amount": 2
            })
        );

        let back: CartItem = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, item);
    }

    #[test]
    fn test_cart_item_subtotal() {
        let item = CartItem {
            product: sneaker(),
            amount: 3,
        };
        assert_eq!(item.subtotal(), Price::from_cents(53970));
        assert_eq!(CartItem::first(sneaker()).amount, 1);
    }

    #[test]
    fn test_stock_covers() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
        assert!(!Stock { amount: 0, ..stock }.covers(1));
    }
}
