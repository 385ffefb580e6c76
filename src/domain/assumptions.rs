use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_FORECAST_DAYS: u32 = 30;
pub const DEFAULT_SEASONAL_PERIODS: u32 = 7;
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;
pub const DEFAULT_SERVICE_LEVEL_PERCENT: f64 = 95.0;
pub const DEFAULT_HOLDING_COST: f64 = 1.5;
pub const DEFAULT_ORDERING_COST: f64 = 50.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a whole number, got {value:?}")]
    NotAnInteger { field: Field, value: String },
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: Field, value: String },
    #[error("{field} must be {rule}")]
    OutOfRange { field: Field, rule: &'static str },
    #[error("{field} cannot be empty")]
    Empty { field: Field },
    #[error("{field} does not take that kind of value")]
    WrongKind { field: Field },
    #[error("unknown field {0:?}")]
    UnknownField(String),
}

/// The six user-editable numeric inputs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ForecastDays,
    SeasonalPeriods,
    LeadTime,
    ServiceLevel,
    HoldingCost,
    OrderingCost,
}

impl Field {
    pub const ASSUMPTIONS: [Field; 4] = [
        Field::LeadTime,
        Field::ServiceLevel,
        Field::HoldingCost,
        Field::OrderingCost,
    ];

    pub const ALL: [Field; 6] = [
        Field::ForecastDays,
        Field::SeasonalPeriods,
        Field::LeadTime,
        Field::ServiceLevel,
        Field::HoldingCost,
        Field::OrderingCost,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::ForecastDays => "forecast-days",
            Field::SeasonalPeriods => "seasonal-periods",
            Field::LeadTime => "lead-time",
            Field::ServiceLevel => "service-level",
            Field::HoldingCost => "holding-cost",
            Field::OrderingCost => "ordering-cost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::ForecastDays => "Forecast Days",
            Field::SeasonalPeriods => "Seasonal Periods",
            Field::LeadTime => "Lead Time (days)",
            Field::ServiceLevel => "Service Level (%)",
            Field::HoldingCost => "Holding Cost (per unit/year)",
            Field::OrderingCost => "Ordering Cost (per order)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Field::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

/// A validated value for one [`Field`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Integer fields; `None` is the empty editing state.
    Count(Option<u32>),
    Amount(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Count(Some(value)) => write!(f, "{value}"),
            FieldValue::Count(None) => f.write_str(""),
            FieldValue::Amount(value) => write!(f, "{value}"),
        }
    }
}

/// Parses and validates raw text for `field`. Out-of-range values are
/// rejected, never clamped.
pub fn parse_field(field: Field, text: &str) -> Result<FieldValue, ValidationError> {
    let text = text.trim();
    match field {
        Field::ForecastDays | Field::LeadTime => parse_count(field, text, 1, "greater than 0"),
        Field::SeasonalPeriods => parse_count(field, text, 2, "greater than 1"),
        Field::ServiceLevel => {
            let value = parse_amount(field, text)?;
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    field,
                    rule: "between 0 and 100",
                });
            }
            Ok(FieldValue::Amount(value))
        }
        Field::HoldingCost | Field::OrderingCost => {
            let value = parse_amount(field, text)?;
            if value < 0.0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    rule: "0 or greater",
                });
            }
            Ok(FieldValue::Amount(value))
        }
    }
}

fn parse_count(
    field: Field,
    text: &str,
    minimum: i64,
    rule: &'static str,
) -> Result<FieldValue, ValidationError> {
    if text.is_empty() {
        return Ok(FieldValue::Count(None));
    }
    let value: i64 = text.parse().map_err(|_| ValidationError::NotAnInteger {
        field,
        value: text.to_string(),
    })?;
    if value < minimum {
        return Err(ValidationError::OutOfRange { field, rule });
    }
    let value = u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        rule: "a reasonable size",
    })?;
    Ok(FieldValue::Count(Some(value)))
}

fn parse_amount(field: Field, text: &str) -> Result<f64, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let value: f64 = text.parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: text.to_string(),
        });
    }
    Ok(value)
}

/// Cost and service-level assumptions. Service level is stored as a
/// percentage; it only becomes a fraction on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assumptions {
    pub lead_time_days: Option<u32>,
    pub service_level_percent: f64,
    pub holding_cost: f64,
    pub ordering_cost: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            lead_time_days: Some(DEFAULT_LEAD_TIME_DAYS),
            service_level_percent: DEFAULT_SERVICE_LEVEL_PERCENT,
            holding_cost: DEFAULT_HOLDING_COST,
            ordering_cost: DEFAULT_ORDERING_COST,
        }
    }
}
