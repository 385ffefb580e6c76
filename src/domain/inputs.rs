use crate::domain::assumptions::{
    Assumptions, DEFAULT_FORECAST_DAYS, DEFAULT_SEASONAL_PERIODS, Field, FieldValue,
    ValidationError, parse_field,
};
use crate::domain::forecast::{ForecastQuery, ModelType, OptimizeQuery};

/// The debounced group of inputs: forecast horizon, seasonal periods and
/// the cost assumptions. The dashboard keeps a raw and a committed copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardInputs {
    pub forecast_days: Option<u32>,
    pub seasonal_periods: Option<u32>,
    pub assumptions: Assumptions,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            forecast_days: Some(DEFAULT_FORECAST_DAYS),
            seasonal_periods: Some(DEFAULT_SEASONAL_PERIODS),
            assumptions: Assumptions::default(),
        }
    }
}

impl DashboardInputs {
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::ForecastDays => FieldValue::Count(self.forecast_days),
            Field::SeasonalPeriods => FieldValue::Count(self.seasonal_periods),
            Field::LeadTime => FieldValue::Count(self.assumptions.lead_time_days),
            Field::ServiceLevel => FieldValue::Amount(self.assumptions.service_level_percent),
            Field::HoldingCost => FieldValue::Amount(self.assumptions.holding_cost),
            Field::OrderingCost => FieldValue::Amount(self.assumptions.ordering_cost),
        }
    }

    /// Validates `text` and stores it. On error nothing changes.
    pub fn edit(&mut self, field: Field, text: &str) -> Result<FieldValue, ValidationError> {
        let value = parse_field(field, text)?;
        self.store(field, value)?;
        Ok(value)
    }

    fn store(&mut self, field: Field, value: FieldValue) -> Result<(), ValidationError> {
        match (field, value) {
            (Field::ForecastDays, FieldValue::Count(count)) => self.forecast_days = count,
            (Field::SeasonalPeriods, FieldValue::Count(count)) => self.seasonal_periods = count,
            (Field::LeadTime, FieldValue::Count(count)) => self.assumptions.lead_time_days = count,
            (Field::ServiceLevel, FieldValue::Amount(amount)) => {
                self.assumptions.service_level_percent = amount
            }
            (Field::HoldingCost, FieldValue::Amount(amount)) => {
                self.assumptions.holding_cost = amount
            }
            (Field::OrderingCost, FieldValue::Amount(amount)) => {
                self.assumptions.ordering_cost = amount
            }
            (field, _) => return Err(ValidationError::WrongKind { field }),
        }
        Ok(())
    }

    pub fn differs(&self, other: &DashboardInputs, field: Field) -> bool {
        self.get(field) != other.get(field)
    }

    /// First field that must be filled in before `model_type` can be requested.
    pub fn missing_field(&self, model_type: ModelType) -> Option<Field> {
        if self.forecast_days.is_none() {
            return Some(Field::ForecastDays);
        }
        if model_type.is_seasonal() && self.seasonal_periods.is_none() {
            return Some(Field::SeasonalPeriods);
        }
        None
    }

    pub fn forecast_query(&self, model_type: ModelType) -> Option<ForecastQuery> {
        if self.missing_field(model_type).is_some() {
            return None;
        }
        Some(ForecastQuery {
            model_type,
            forecast_days: self.forecast_days?,
            seasonal_periods: self.seasonal_periods,
        })
    }

    pub fn optimize_query(&self, model_type: ModelType) -> Option<OptimizeQuery> {
        Some(OptimizeQuery {
            forecast: self.forecast_query(model_type)?,
            lead_time_days: self.assumptions.lead_time_days?,
            service_level_percent: self.assumptions.service_level_percent,
            holding_cost: self.assumptions.holding_cost,
            ordering_cost: self.assumptions.ordering_cost,
        })
    }
}
