//! HTTP client for the storefront REST backend.
//!
//! Every endpoint answers with an [`ApiResponse`] envelope; a `success: false`
//! envelope surfaces as [`ClientError::Api`]. Transient failures are retried
//! with exponential back-off.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use shopfront_core::{AppConfig, Product};
use shopfront_report::{ProductRecord, SalesRecord, SellerRecord};

use crate::error::ClientError;
use crate::retry::retry_with_backoff;
use crate::types::{ApiResponse, PagedResponse};

/// Maximum number of pages [`ShopClient::fetch_catalog`] will request.
const MAX_PAGES: u32 = 100;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Typed client for the storefront backend.
///
/// Use [`ShopClient::from_config`] in the binary or
/// [`ShopClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct ShopClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for ShopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl ShopClient {
    /// Build a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `api_url` does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let mut client = Self::build(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        client.token.clone_from(&config.api_token);
        client.max_retries = config.max_retries;
        client.backoff_base_ms = config.retry_backoff_base_ms;
        Ok(client)
    }

    /// Creates a client against `base_url` with no token and retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Self::build(base_url, timeout_secs, "shopfront/0.1 (storefront-cli)")
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `Url::join` append to the path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Attach a bearer token to every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetch one page of the catalog, ordered by upstream ranking.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend reports failure.
    /// - [`ClientError::Http`] on network failure or non-2xx status.
    /// - [`ClientError::Deserialize`] if the body does not match the expected shape.
    pub async fn list_products(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PagedResponse<Product>, ClientError> {
        let url = self.build_url(
            "products",
            &[
                ("page", &page.to_string()),
                ("size", &size.to_string()),
                ("sortBy", "ranking"),
                ("direction", "asc"),
            ],
        )?;
        self.get(url, &format!("products(page={page})")).await
    }

    /// Fetch the whole catalog by walking pages of `page_size`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::list_products`]. Returns
    /// [`ClientError::PaginationLimit`] after [`MAX_PAGES`] pages.
    pub async fn fetch_catalog(&self, page_size: u32) -> Result<Vec<Product>, ClientError> {
        let mut products = Vec::new();
        let mut page = 0u32;

        loop {
            if page >= MAX_PAGES {
                return Err(ClientError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let batch = self.list_products(page, page_size).await?;
            let is_last = batch.is_last();
            products.extend(batch.content);
            tracing::debug!(page, fetched = products.len(), "fetched catalog page");

            if is_last {
                break;
            }
            page += 1;
        }

        tracing::info!(products = products.len(), "catalog fetched");
        Ok(products)
    }

    /// Fetch a single product by ASIN.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn get_product(&self, asin: &str) -> Result<Product, ClientError> {
        let url = self.build_url(&format!("products/{asin}"), &[])?;
        self.get(url, &format!("product({asin})")).await
    }

    /// Fetch the top `limit` products by upstream ranking.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn top_products(&self, limit: u32) -> Result<Vec<Product>, ClientError> {
        let url = self.build_url(&format!("products/top/{limit}"), &[])?;
        self.get(url, "top products").await
    }

    /// Confirmed and delivered orders placed between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn export_sales(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SalesRecord>, ClientError> {
        let url = self.build_url(
            "analyst/reports/export/sales",
            &[
                ("startDate", &start.format("%Y-%m-%d").to_string()),
                ("endDate", &end.format("%Y-%m-%d").to_string()),
            ],
        )?;
        self.get(url, "sales export").await
    }

    /// Approved products with sales and stock figures.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn export_products(&self) -> Result<Vec<ProductRecord>, ClientError> {
        let url = self.build_url("analyst/reports/export/products", &[])?;
        self.get(url, "products export").await
    }

    /// Sellers ranked by revenue.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_products`].
    pub async fn export_sellers(&self) -> Result<Vec<SellerRecord>, ClientError> {
        let url = self.build_url("analyst/reports/export/sellers", &[])?;
        self.get(url, "sellers export").await
    }

    pub(crate) fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GET `url` with retries and unwrap the response envelope.
    async fn get<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.send_once(url.clone(), context)
        })
        .await
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%url, %request_id, "backend request");

        let mut request = self
            .client
            .get(url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        envelope.into_result(context)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
