//! RocketShoes Core - Shared types library.
//!
//! This crate provides the domain types used across all RocketShoes components:
//! - `cart` - Cart state container with local-storage persistence
//! - `api` - Inventory service for products and stock
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, products, cart items, and stock

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
