//! RocketShoes inventory API library.
//!
//! Serves the product catalog and stock levels the cart validates against.
//! Split out from the binary so the router can be tested and embedded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use catalog::{Catalog, CatalogError};
pub use config::ApiConfig;
pub use routes::router;
pub use state::AppState;
