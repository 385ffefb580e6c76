use std::io::Write;

use crate::commands::base_commands::{AssumptionArgs, ForecastArgs};
use crate::commands::command_error::CommandError;
use crate::domain::assumptions::Field;
use crate::domain::inputs::DashboardInputs;
use crate::services::data_source::DashboardDataSource;
use crate::services::optimization_display::render_optimization;

pub async fn optimize_command(
    source: &dyn DashboardDataSource,
    forecast: &ForecastArgs,
    assumptions: &AssumptionArgs,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut inputs = DashboardInputs::default();
    forecast.apply(&mut inputs)?;
    assumptions.apply(&mut inputs)?;
    if let Some(field) = inputs.missing_field(forecast.model) {
        return Err(CommandError::MissingValue(field));
    }
    let query = inputs
        .optimize_query(forecast.model)
        .ok_or(CommandError::MissingValue(Field::LeadTime))?;

    let result = source
        .get_optimization(&forecast.product, &query)
        .await
        .map_err(CommandError::request("Optimization Error"))?;

    writeln!(out, "{}", render_optimization(Some(&result), &inputs.assumptions))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::ModelType;
    use crate::services::data_source::DataSourceError;
    use crate::test_support::FakeDataSource;

    fn forecast_args() -> ForecastArgs {
        ForecastArgs {
            product: "P0001".to_string(),
            model: ModelType::Arima,
            forecast_days: "30".to_string(),
            seasonal_periods: "7".to_string(),
        }
    }

    fn assumption_args() -> AssumptionArgs {
        AssumptionArgs {
            lead_time: "10".to_string(),
            service_level: "99".to_string(),
            holding_cost: "2".to_string(),
            ordering_cost: "75".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_assumptions_and_renders_metrics() {
        let source = FakeDataSource::default();
        let mut out = Vec::new();

        optimize_command(&source, &forecast_args(), &assumption_args(), &mut out)
            .await
            .unwrap();

        let (product, query) = &source.optimize_calls()[0];
        assert_eq!(product, "P0001");
        assert_eq!(query.lead_time_days, 10);
        assert_eq!(query.service_level_percent, 99.0);
        assert_eq!(query.ordering_cost, 75.0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Inventory Optimization: P0001"));
        assert!(output.contains("99.00"));
    }

    #[tokio::test]
    async fn service_error_carries_optimization_context() {
        let source = FakeDataSource {
            optimization_error: Some(DataSourceError::Api {
                status: 500,
                detail: "bad input".to_string(),
            }),
            ..FakeDataSource::default()
        };
        let mut out = Vec::new();

        let err = optimize_command(&source, &forecast_args(), &assumption_args(), &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Optimization Error: bad input");
    }

    #[tokio::test]
    async fn empty_lead_time_is_rejected_before_any_request() {
        let source = FakeDataSource::default();
        let mut out = Vec::new();
        let mut assumptions = assumption_args();
        assumptions.lead_time = String::new();

        let err = optimize_command(&source, &forecast_args(), &assumptions, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::MissingValue(Field::LeadTime)));
        assert!(source.optimize_calls().is_empty());
    }
}
