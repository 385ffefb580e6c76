use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::forecast::{ForecastQuery, ForecastResult, ModelType, OptimizeQuery};
use crate::domain::inventory::InventoryRecord;
use crate::domain::optimization::{AssumptionsUsed, OptimizationResult};
use crate::services::data_source::{DashboardDataSource, DataSourceError};

pub fn on_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn inventory_record(
    year: i32,
    month: u32,
    day: u32,
    inventory_level: Option<i64>,
    units_sold: Option<i64>,
) -> InventoryRecord {
    InventoryRecord {
        date: on_date(year, month, day),
        inventory_level,
        units_sold,
    }
}

pub fn forecast_result(product_id: &str, days: usize) -> ForecastResult {
    ForecastResult {
        product_id: product_id.to_string(),
        model_type: Some(ModelType::Arima),
        forecast_days: Some(days as u32),
        seasonal_periods_used: None,
        forecast: (0..days).map(|day| 100.0 + day as f64).collect(),
    }
}

pub fn optimization_result(product_id: &str, model_type: ModelType) -> OptimizationResult {
    OptimizationResult {
        product_id: product_id.to_string(),
        current_inventory: Some(60),
        safety_stock: Some(14),
        demand_during_lead_time: Some(70),
        economic_order_quantity: Some(230),
        reorder_point: Some(84),
        suggestion: Some("Order 230 units (Current: 60, ROP: 84).".to_string()),
        assumptions_used: Some(AssumptionsUsed {
            lead_time_days: Some(7),
            service_level_percent: Some(95.0),
            holding_cost_per_unit_per_year: Some(1.5),
            ordering_cost_per_order: Some(50.0),
            demand_variability_method: Some("90-Day Rolling Std Dev".to_string()),
            annual_demand_method: Some("Forecasted Average".to_string()),
        }),
        model_type_used: Some(model_type),
        forecast_days_used: Some(30),
        seasonal_periods_used: model_type.is_seasonal().then_some(7),
    }
}

/// In-memory service. Answers are built from the request so tests can see
/// which configuration reached the "network".
#[derive(Default)]
pub struct FakeDataSource {
    pub products: Vec<String>,
    pub product_error: Option<DataSourceError>,
    pub optimization_error: Option<DataSourceError>,
    pub inventory: HashMap<String, Vec<InventoryRecord>>,
    /// Artificial latency per product, for out-of-order completions.
    pub delays: HashMap<String, Duration>,
    pub forecast_calls: Mutex<Vec<(String, ForecastQuery)>>,
    pub optimize_calls: Mutex<Vec<(String, OptimizeQuery)>>,
}

impl FakeDataSource {
    pub fn with_products(products: &[&str]) -> Self {
        Self {
            products: products.iter().map(|product| product.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn forecast_calls(&self) -> Vec<(String, ForecastQuery)> {
        self.forecast_calls.lock().unwrap().clone()
    }

    pub fn optimize_calls(&self) -> Vec<(String, OptimizeQuery)> {
        self.optimize_calls.lock().unwrap().clone()
    }

    async fn latency(&self, product_id: &str) {
        if let Some(delay) = self.delays.get(product_id) {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[async_trait]
impl DashboardDataSource for FakeDataSource {
    async fn get_products(&self) -> Result<Vec<String>, DataSourceError> {
        match &self.product_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.products.clone()),
        }
    }

    async fn get_forecast(
        &self,
        product_id: &str,
        query: &ForecastQuery,
    ) -> Result<ForecastResult, DataSourceError> {
        self.forecast_calls
            .lock()
            .unwrap()
            .push((product_id.to_string(), *query));
        self.latency(product_id).await;
        let mut result = forecast_result(product_id, query.forecast_days as usize);
        result.model_type = Some(query.model_type);
        Ok(result)
    }

    async fn get_optimization(
        &self,
        product_id: &str,
        query: &OptimizeQuery,
    ) -> Result<OptimizationResult, DataSourceError> {
        self.optimize_calls
            .lock()
            .unwrap()
            .push((product_id.to_string(), *query));
        self.latency(product_id).await;
        if let Some(error) = &self.optimization_error {
            return Err(error.clone());
        }
        let mut result = optimization_result(product_id, query.forecast.model_type);
        if let Some(used) = result.assumptions_used.as_mut() {
            used.service_level_percent = Some(query.service_level_percent);
            used.lead_time_days = Some(query.lead_time_days);
        }
        result.forecast_days_used = Some(query.forecast.forecast_days);
        Ok(result)
    }

    async fn get_inventory(
        &self,
        product_id: &str,
    ) -> Result<Vec<InventoryRecord>, DataSourceError> {
        self.latency(product_id).await;
        self.inventory
            .get(product_id)
            .cloned()
            .ok_or_else(|| DataSourceError::Api {
                status: 404,
                detail: format!("Product ID '{product_id}' not found in dataset."),
            })
    }
}
