//! HTTP route handlers for the inventory API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health           - Health check
//!
//! # Products
//! GET  /products         - Product listing
//! GET  /products/{id}    - Product detail
//!
//! # Stock
//! GET  /stock            - Stock for every product
//! GET  /stock/{id}       - Stock for one product
//! ```

pub mod products;
pub mod stock;

use axum::{Router, http::Method, routing::get};
use rocketshoes_core::ProductId;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Create the full application router.
pub fn router(state: AppState) -> Router {
    // The storefront calls this API straight from the browser
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/stock", get(stock::index))
        .route("/stock/{id}", get(stock::show))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a path id. Anything that is not an id cannot name a resource.
fn parse_id(raw: &str, resource: &str) -> Result<ProductId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("{resource}/{raw}")))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;

    fn app() -> Router {
        let catalog = Catalog::from_json(
            r#"{
                "products": [
                    {"id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "a.jpg"},
                    {"id": 2, "title": "Tênis VR", "price": 139.9, "image": "b.jpg"}
                ],
                "stock": [{"id": 1, "amount": 3}]
            }"#,
        )
        .expect("catalog");
        router(AppState::new(catalog))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_products_index_keeps_seed_order() {
        let (status, body) = get_json("/products").await;
        assert_eq!(status, StatusCode::OK);

        let ids: Vec<_> = body
            .as_array()
            .expect("array")
            .iter()
            .map(|p| p["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn test_product_show() {
        let (status, body) = get_json("/products/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": 2, "title": "Tênis VR", "price": 139.9, "image": "b.jpg"})
        );
    }

    #[tokio::test]
    async fn test_stock_show() {
        let (status, body) = get_json("/stock/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "amount": 3}));

        let (status, body) = get_json("/stock").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "amount": 3}]));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_empty_404() {
        for uri in ["/products/9", "/stock/2", "/stock/abc"] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({}), "{uri}");
        }
    }
}
