use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown model type {0:?} (expected arima or exponential-smoothing)")]
pub struct ParseModelTypeError(String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    #[default]
    #[serde(rename = "ARIMA")]
    Arima,
    #[serde(rename = "ExponentialSmoothing")]
    ExponentialSmoothing,
}

impl ModelType {
    /// Name used in query strings and echoed back by the service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ModelType::Arima => "ARIMA",
            ModelType::ExponentialSmoothing => "ExponentialSmoothing",
        }
    }

    pub fn is_seasonal(&self) -> bool {
        matches!(self, ModelType::ExponentialSmoothing)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Arima => f.write_str("ARIMA"),
            ModelType::ExponentialSmoothing => f.write_str("Exponential Smoothing"),
        }
    }
}

impl FromStr for ModelType {
    type Err = ParseModelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arima" => Ok(ModelType::Arima),
            "es" | "exponential-smoothing" | "exponential_smoothing" | "exponentialsmoothing" => {
                Ok(ModelType::ExponentialSmoothing)
            }
            _ => Err(ParseModelTypeError(s.to_string())),
        }
    }
}

/// Parameters for `GET /forecast/{product}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastQuery {
    pub model_type: ModelType,
    pub forecast_days: u32,
    /// Omitted from the request when unset; the service falls back to its default.
    pub seasonal_periods: Option<u32>,
}

impl ForecastQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("model_type", self.model_type.wire_name().to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ];
        if let Some(periods) = self.seasonal_periods {
            params.push(("seasonal_periods", periods.to_string()));
        }
        params
    }
}

/// Parameters for `GET /optimize/{product}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizeQuery {
    pub forecast: ForecastQuery,
    pub lead_time_days: u32,
    pub service_level_percent: f64,
    pub holding_cost: f64,
    pub ordering_cost: f64,
}

impl OptimizeQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("model_type", self.forecast.model_type.wire_name().to_string()),
            ("lead_time_days", self.lead_time_days.to_string()),
            ("service_level", (self.service_level_percent / 100.0).to_string()),
            ("holding_cost", self.holding_cost.to_string()),
            ("ordering_cost", self.ordering_cost.to_string()),
            ("forecast_days", self.forecast.forecast_days.to_string()),
        ];
        if let Some(periods) = self.forecast.seasonal_periods {
            params.push(("seasonal_periods", periods.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastResult {
    pub product_id: String,
    pub model_type: Option<ModelType>,
    /// Horizon the service actually used, which may differ from the request.
    pub forecast_days: Option<u32>,
    pub seasonal_periods_used: Option<u32>,
    pub forecast: Vec<f64>,
}

impl ForecastResult {
    pub fn horizon(&self) -> usize {
        self.forecast_days
            .map(|days| days as usize)
            .unwrap_or(self.forecast.len())
    }
}
