use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::forecast::{ForecastQuery, ForecastResult, OptimizeQuery};
use crate::domain::inventory::InventoryRecord;
use crate::domain::optimization::OptimizationResult;
use crate::services::dashboard_config::DashboardConfig;
use crate::services::data_source::{DashboardDataSource, DataSourceError};

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    products: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

pub struct BackendApiClient {
    base_url: Url,
    client: Client,
}

impl BackendApiClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, DataSourceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| DataSourceError::Other(format!("invalid base url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DataSourceError::Other(format!(
                "base url cannot be used as an origin: {base_url}"
            )));
        }
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| DataSourceError::Connection(err.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Appends `segments` to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DataSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DataSourceError::Other("base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, DataSourceError> {
        debug!(%url, ?params, "requesting");
        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|err| DataSourceError::Connection(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = error_from_response(status, &body);
            warn!(%url, %status, %error, "request failed");
            return Err(error);
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DataSourceError::Parse(err.to_string()))
    }
}

/// Prefers a string `detail` from the JSON body, otherwise falls back to the
/// status line.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> DataSourceError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        });

    match detail {
        Some(detail) => DataSourceError::Api {
            status: status.as_u16(),
            detail,
        },
        None => DataSourceError::Status(status.to_string()),
    }
}

#[async_trait]
impl DashboardDataSource for BackendApiClient {
    async fn get_products(&self) -> Result<Vec<String>, DataSourceError> {
        let url = self.endpoint(&["products"])?;
        let payload: ProductsResponse = self.fetch_json(url, &[]).await?;
        match payload.products {
            Some(products) if !products.is_empty() => Ok(products),
            _ => Err(DataSourceError::NoProducts),
        }
    }

    async fn get_forecast(
        &self,
        product_id: &str,
        query: &ForecastQuery,
    ) -> Result<ForecastResult, DataSourceError> {
        let url = self.endpoint(&["forecast", product_id])?;
        self.fetch_json(url, &query.to_params()).await
    }

    async fn get_optimization(
        &self,
        product_id: &str,
        query: &OptimizeQuery,
    ) -> Result<OptimizationResult, DataSourceError> {
        let url = self.endpoint(&["optimize", product_id])?;
        self.fetch_json(url, &query.to_params()).await
    }

    async fn get_inventory(
        &self,
        product_id: &str,
    ) -> Result<Vec<InventoryRecord>, DataSourceError> {
        let url = self.endpoint(&["inventory", product_id])?;
        self.fetch_json(url, &[]).await
    }
}
