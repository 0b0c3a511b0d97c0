//! Stock route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rocketshoes_core::Stock;
use tracing::instrument;

use super::parse_id;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List stock for every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Stock>> {
    Json(state.catalog().stock().to_vec())
}

/// Show stock for one product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Stock>> {
    let id = parse_id(&id, "stock")?;
    state
        .catalog()
        .stock_of(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("stock/{id}")))
}
