//! Catalog service client.
//!
//! Products and stock levels are fetched over plain JSON endpoints. Products
//! are cached using `moka` (5-minute TTL); stock levels are never cached so
//! availability is always current at validation time.

pub mod types;

pub use types::StockLevel;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};
use treadly_core::ProductId;

use crate::cart::Product;
use crate::config::CatalogConfig;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// Product not known to the catalog.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Read access to the product catalog and its stock levels.
#[allow(async_fn_in_trait)]
pub trait CatalogService {
    /// Fetch a product's attributes by id.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetch the current stock level for a product.
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError>;
}

/// HTTP client for the catalog service.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<ProductId, Product>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// When the config carries an access token it is installed as a default
    /// `Authorization` header on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the access
    /// token is not a valid header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.access_token {
            let value = format!("Bearer {}", token.expose_secret());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&value)
                    .map_err(|e| CatalogError::Parse(format!("invalid access token: {e}")))?,
            );
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        })
    }

    /// Fetch a JSON body from a catalog endpoint.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Drop a cached product, forcing the next fetch to hit the service.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&id).await;
    }
}

impl CatalogService for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(&id).await {
            debug!("cache hit for product");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("products/{id}"), id).await?;

        self.inner.cache.insert(id, product.clone()).await;

        Ok(product)
    }

    // Stock is deliberately not cached; the ceiling must be read fresh for
    // every validation.
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.get_json(&format!("stock/{id}"), id).await
    }
}
