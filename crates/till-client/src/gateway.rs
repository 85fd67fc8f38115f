//! # Sale Gateway
//!
//! The three backend calls the POS makes.
//!
//! ```text
//! ┌──────────────┐   GET  /api/products/stock   ┌─────────────────────────┐
//! │              │ ───────────────────────────► │                         │
//! │  PosSession  │   GET  /api/product/{id}     │  Sale-recording backend │
//! │              │ ───────────────────────────► │                         │
//! │              │   POST /sales/checkout       │                         │
//! │              │ ───────────────────────────► │                         │
//! └──────────────┘                              └─────────────────────────┘
//! ```
//!
//! ## Checkout Answers
//! | HTTP | Body | Result |
//! |---|---|---|
//! | any | `{"status":"success"}` | `Ok(())` |
//! | any | `{"status":"error","error":"Out of stock"}` | `Rejected { message: Some(..) }` |
//! | any | not JSON | `MalformedResponse` |
//! | - | connection failure | `Http` |
//!
//! The checkout status lives in the body, so the HTTP status code is logged
//! but not trusted on its own.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use till_core::{Product, SaleRequest, StockLevel};

use crate::config::BackendConfig;
use crate::error::{ClientError, ClientResult};

const STATUS_SUCCESS: &str = "success";

/// Backend operations used by the session.
///
/// [`HttpGateway`] is the real implementation; tests can substitute their own.
pub trait SaleGateway {
    /// Current stock for every product.
    async fn fetch_stock(&self) -> ClientResult<Vec<StockLevel>>;

    /// One product by id.
    async fn fetch_product(&self, id: &str) -> ClientResult<Product>;

    /// Records the sale. `Ok` only when the backend reports success.
    async fn submit_sale(&self, request: &SaleRequest) -> ClientResult<()>;
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    status: String,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// [`SaleGateway`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
    request_timeout: Duration,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(base_url: impl Into<String>, request_timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpGateway {
            http: Client::new(),
            base_url,
            request_timeout,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::with_timeout(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SaleGateway for HttpGateway {
    async fn fetch_stock(&self) -> ClientResult<Vec<StockLevel>> {
        let url = self.url("/api/products/stock");
        debug!(url = %url, "Fetching stock levels");

        let levels: Vec<StockLevel> = self
            .http
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(count = levels.len(), "Fetched stock levels");
        Ok(levels)
    }

    async fn fetch_product(&self, id: &str) -> ClientResult<Product> {
        let url = self.url(&format!("/api/product/{id}"));
        debug!(url = %url, "Fetching product");

        let response = self
            .http
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(id, "Product not found");
            return Err(ClientError::ProductNotFound(id.to_string()));
        }

        let product: Product = response.error_for_status()?.json().await?;
        Ok(product)
    }

    async fn submit_sale(&self, request: &SaleRequest) -> ClientResult<()> {
        let url = self.url("/sales/checkout");
        info!(url = %url, lines = request.cart.len(), "Submitting sale");

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let answer: CheckoutResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(%status, error = %e, "Checkout response is not JSON");
            ClientError::MalformedResponse(e.to_string())
        })?;

        if answer.status == STATUS_SUCCESS {
            info!(%status, "Sale recorded");
            return Ok(());
        }

        let message = answer.error.or(answer.message);
        warn!(%status, reported = %answer.status, ?message, "Sale rejected");
        Err(ClientError::Rejected { message })
    }
}
