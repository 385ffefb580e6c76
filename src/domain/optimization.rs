use serde::{Deserialize, Serialize};

use crate::domain::forecast::ModelType;

/// Assumptions echoed back by the optimize endpoint. Service level is
/// already a percentage here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionsUsed {
    pub lead_time_days: Option<u32>,
    pub service_level_percent: Option<f64>,
    pub holding_cost_per_unit_per_year: Option<f64>,
    pub ordering_cost_per_order: Option<f64>,
    pub demand_variability_method: Option<String>,
    pub annual_demand_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationResult {
    pub product_id: String,
    pub current_inventory: Option<i64>,
    pub safety_stock: Option<i64>,
    pub demand_during_lead_time: Option<i64>,
    pub economic_order_quantity: Option<i64>,
    pub reorder_point: Option<i64>,
    pub suggestion: Option<String>,
    pub assumptions_used: Option<AssumptionsUsed>,
    pub model_type_used: Option<ModelType>,
    pub forecast_days_used: Option<u32>,
    pub seasonal_periods_used: Option<u32>,
}

impl OptimizationResult {
    /// True when the service answered but reported none of the metrics.
    pub fn is_empty(&self) -> bool {
        self.current_inventory.is_none()
            && self.safety_stock.is_none()
            && self.demand_during_lead_time.is_none()
            && self.economic_order_quantity.is_none()
            && self.reorder_point.is_none()
            && self.suggestion.is_none()
    }
}
