use std::io::Write;

use tracing::info;

use crate::commands::base_commands::ForecastArgs;
use crate::commands::command_error::CommandError;
use crate::domain::assumptions::Field;
use crate::domain::inputs::DashboardInputs;
use crate::services::data_source::DashboardDataSource;
use crate::services::forecast_chart::{render_forecast_text, write_forecast_chart_png};

pub async fn forecast_command(
    source: &dyn DashboardDataSource,
    args: &ForecastArgs,
    chart: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut inputs = DashboardInputs::default();
    args.apply(&mut inputs)?;
    if let Some(field) = inputs.missing_field(args.model) {
        return Err(CommandError::MissingValue(field));
    }
    let query = inputs
        .forecast_query(args.model)
        .ok_or(CommandError::MissingValue(Field::ForecastDays))?;

    let result = source
        .get_forecast(&args.product, &query)
        .await
        .map_err(CommandError::request("Forecast Error"))?;

    writeln!(out, "{}", render_forecast_text(&args.product, &result.forecast))?;
    writeln!(out, "Model: {}", result.model_type.unwrap_or(args.model))?;
    writeln!(out, "Horizon: {} days", result.horizon())?;
    if let Some(seasonal) = result.seasonal_periods_used {
        writeln!(out, "Seasonal Periods: {seasonal}")?;
    }

    if let Some(path) = chart {
        write_forecast_chart_png(path, &args.product, &result.forecast).await?;
        info!(path, "forecast chart written");
        writeln!(out, "Forecast chart written to {path}")?;
    }
    Ok(())
}
