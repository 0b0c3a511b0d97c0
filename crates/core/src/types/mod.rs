//! Core types for RocketShoes.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::Price;
pub use product::{CartItem, Product, Stock};
