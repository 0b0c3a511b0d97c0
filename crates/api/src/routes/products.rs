//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rocketshoes_core::Product;
use tracing::instrument;

use super::parse_id;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().to_vec())
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_id(&id, "products")?;
    state
        .catalog()
        .product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("products/{id}")))
}
