use async_trait::async_trait;
use thiserror::Error;

use crate::domain::forecast::{ForecastQuery, ForecastResult, OptimizeQuery};
use crate::domain::inventory::InventoryRecord;
use crate::domain::optimization::OptimizationResult;

/// Failures talking to the inventory service. `Display` is the message
/// shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataSourceError {
    #[error("Network error: {0}")]
    Connection(String),
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("HTTP {0}")]
    Status(String),
    #[error("Invalid response: {0}")]
    Parse(String),
    #[error("No products found.")]
    NoProducts,
    #[error("{0}")]
    Other(String),
}

/// Read access to the inventory-optimization service.
#[async_trait]
pub trait DashboardDataSource: Send + Sync {
    async fn get_products(&self) -> Result<Vec<String>, DataSourceError>;

    async fn get_forecast(
        &self,
        product_id: &str,
        query: &ForecastQuery,
    ) -> Result<ForecastResult, DataSourceError>;

    async fn get_optimization(
        &self,
        product_id: &str,
        query: &OptimizeQuery,
    ) -> Result<OptimizationResult, DataSourceError>;

    async fn get_inventory(&self, product_id: &str)
    -> Result<Vec<InventoryRecord>, DataSourceError>;
}
