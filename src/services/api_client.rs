use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::{
    error::FetchError,
    models::{FreightResponse, OrdersResponse, RegionsResponse},
};

/// Where the order list comes from.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_orders(&self, status: &str) -> Result<OrdersResponse, FetchError>;
}

/// Where region codes and freight values come from.
#[async_trait]
pub trait FreightSource: Send + Sync {
    async fn fetch_regions(&self) -> Result<RegionsResponse, FetchError>;
    async fn fetch_freight(&self, region: &str) -> Result<FreightResponse, FetchError>;
}

/// reqwest client for the upstream `/api/*` endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        require_success: bool,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .get(&url)
            .query(query)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = res.status();
        if require_success && !status.is_success() {
            tracing::warn!("GET {} answered {}", path, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        Ok(serde_json::from_str::<T>(&body)?)
    }
}

#[async_trait]
impl OrderSource for ApiClient {
    async fn fetch_orders(&self, status: &str) -> Result<OrdersResponse, FetchError> {
        self.get_json("/api/pedidos", &[("status", status)], true).await
    }
}

// The freight endpoints report failures in the body (with 400/404), so the
// status code is not checked there.
#[async_trait]
impl FreightSource for ApiClient {
    async fn fetch_regions(&self) -> Result<RegionsResponse, FetchError> {
        self.get_json("/api/ufs", &[], false).await
    }

    async fn fetch_freight(&self, region: &str) -> Result<FreightResponse, FetchError> {
        self.get_json("/api/frete", &[("uf", region)], false).await
    }
}
