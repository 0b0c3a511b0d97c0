//! HTTP client for the inventory API.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use rocketshoes_core::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, Inventory};
use crate::config::InventoryConfig;

/// Maximum number of products kept in the lookup cache.
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// Client for the inventory API.
///
/// Cheap to clone; clones share the connection pool and product cache.
#[derive(Clone)]
pub struct InventoryClient {
    inner: Arc<InventoryClientInner>,
}

struct InventoryClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<ProductId, Product>,
}

impl InventoryClient {
    /// Create a new inventory API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &InventoryConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(config.product_cache_ttl)
            .build();

        // `Url::join` replaces the last path segment unless it ends with '/'
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(InventoryClientInner {
                client,
                base_url,
                products,
            }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// GET a path below the base URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Inventory API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse inventory API response"
            );
            ApiError::Parse(e)
        })
    }
}

impl Inventory for InventoryClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        if let Some(product) = self.inner.products.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("products/{id}")).await?;

        self.inner.products.insert(id, product.clone()).await;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        let stock: Stock = self.get_json(&format!("stock/{id}")).await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }

    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.get_json("products").await?;

        for product in &products {
            self.inner
                .products
                .insert(product.id, product.clone())
                .await;
        }

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> InventoryClient {
        let config = InventoryConfig {
            base_url: server.uri().parse().expect("mock server uri"),
            timeout: Duration::from_secs(5),
            product_cache_ttl: Duration::from_secs(300),
        };
        InventoryClient::new(&config).expect("client")
    }

    fn product_body(id: i32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://example.com/tenis2.jpg"
        })
    }

    #[tokio::test]
    async fn test_product_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body(2)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.product(ProductId::new(2)).await.expect("first");
        let second = client.product(ProductId::new(2)).await.expect("second");

        assert_eq!(first, second);
        assert_eq!(first.price.format_brl(), "R$ 139,90");
    }

    #[tokio::test]
    async fn test_stock_is_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1, "amount": 3})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let stock = client.stock(ProductId::new(1)).await.expect("stock");
            assert_eq!(stock.amount, 3);
        }
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/99"))
            .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .product(ProductId::new(99))
            .await
            .expect_err("should be missing");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .stock(ProductId::new(1))
            .await
            .expect_err("should fail");
        assert!(matches!(
            err,
            ApiError::Status { status: 503, ref message } if message == "maintenance"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": 1}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .stock(ProductId::new(1))
            .await
            .expect_err("should fail");
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_catalog_fills_product_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([product_body(1), product_body(2)])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body(2)))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let catalog = client.products().await.expect("catalog");
        assert_eq!(catalog.len(), 2);

        let product = client.product(ProductId::new(2)).await.expect("cached");
        assert_eq!(product.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/stock/4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 4, "amount": 0})),
            )
            .mount(&server)
            .await;

        let config = InventoryConfig {
            base_url: format!("{}/api", server.uri()).parse().expect("url"),
            timeout: Duration::from_secs(5),
            product_cache_ttl: Duration::from_secs(300),
        };
        let client = InventoryClient::new(&config).expect("client");

        let stock = client.stock(ProductId::new(4)).await.expect("stock");
        assert_eq!(stock.amount, 0);
    }
}
