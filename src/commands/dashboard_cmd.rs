use std::io::Write;
use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tracing::info;

use crate::commands::command_error::CommandError;
use crate::domain::forecast::ModelType;
use crate::domain::inputs::DashboardInputs;
use crate::services::dashboard::DashboardState;
use crate::services::dashboard_config::DashboardConfig;
use crate::services::dashboard_runtime::{DashboardRuntime, HELP};
use crate::services::data_source::DashboardDataSource;

/// Runs an interactive session reading commands from `input`.
pub async fn dashboard_command<R, W>(
    source: Arc<dyn DashboardDataSource>,
    config: &DashboardConfig,
    model_type: ModelType,
    chart: Option<String>,
    input: R,
    mut output: W,
) -> Result<(), CommandError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{HELP}")?;
    let state = DashboardState::with_inputs(DashboardInputs::default(), model_type);
    let runtime = DashboardRuntime::new(source, config.debounce(), output)
        .with_state(state)
        .with_chart_path(chart);

    let (state, _) = runtime.run(input).await?;
    info!(
        product = state.selected_product().unwrap_or("-"),
        "dashboard session ended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeDataSource;

    #[tokio::test(start_paused = true)]
    async fn session_renders_first_product_after_refresh() {
        let source = Arc::new(FakeDataSource::with_products(&["P0001", "P0002"]));
        let mut output = Vec::new();

        dashboard_command(
            source.clone(),
            &DashboardConfig::default(),
            ModelType::ExponentialSmoothing,
            None,
            &b""[..],
            &mut output,
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Commands:"));
        assert!(output.contains("Product: P0001"));
        assert!(output.contains("Exponential Smoothing"));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_waits_for_pending_commit() {
        let source = Arc::new(FakeDataSource::with_products(&["P0001"]));
        let mut output = Vec::new();

        dashboard_command(
            source.clone(),
            &DashboardConfig::default(),
            ModelType::Arima,
            None,
            &b"set forecast-days 12\n"[..],
            &mut output,
        )
        .await
        .unwrap();

        let last = source.forecast_calls().last().cloned().unwrap();
        assert_eq!(last.1.forecast_days, 12);
    }
}
