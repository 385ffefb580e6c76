use crate::domain::assumptions::Field;
use crate::services::assumptions_input::{render_assumptions_input, render_field};
use crate::services::dashboard::DashboardState;
use crate::services::forecast_chart::render_forecast_text;
use crate::services::optimization_display::render_optimization;

const LISTED_PRODUCTS: usize = 10;

pub fn status_line(state: &DashboardState) -> &'static str {
    if state.is_loading() {
        "Loading..."
    } else if state.is_debouncing() {
        "Syncing changes..."
    } else {
        "Ready"
    }
}

fn product_line(state: &DashboardState) -> String {
    let selected = state.selected_product().unwrap_or("(none)");
    let products = state.products();
    if products.is_empty() {
        return format!("Product: {selected}");
    }
    let mut listed = products
        .iter()
        .take(LISTED_PRODUCTS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if products.len() > LISTED_PRODUCTS {
        listed.push_str(", ...");
    }
    format!("Product: {selected} ({} available: {listed})", products.len())
}

fn forecast_settings(state: &DashboardState) -> String {
    let mut lines = vec!["Forecast Settings".to_string()];
    lines.push(format!("  {:<30} {}", "Model:", state.model_type()));
    lines.push(render_field(
        Field::ForecastDays,
        state.raw(),
        state.committed(),
        state.is_debouncing(),
    ));
    if state.show_seasonal_periods() {
        lines.push(render_field(
            Field::SeasonalPeriods,
            state.raw(),
            state.committed(),
            state.is_debouncing(),
        ));
    }
    lines.join("\n")
}

fn forecast_panel(state: &DashboardState, product_id: &str) -> String {
    match state.forecast() {
        Some(forecast) => format!(
            "{}\nHorizon: {} days",
            render_forecast_text(product_id, &forecast.forecast),
            forecast.horizon()
        ),
        None if state.is_loading() => "Loading forecast...".to_string(),
        None => "No forecast loaded.".to_string(),
    }
}

/// Full text rendering of the dashboard. Forecast and optimization panels
/// always reflect the committed inputs.
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut sections = vec![
        "=== Inventory Optimization Dashboard ===".to_string(),
        product_line(state),
        format!("Status: {}", status_line(state)),
    ];
    let pending = state.pending_fields();
    if !pending.is_empty() {
        let labels: Vec<&str> = pending.iter().map(|field| field.key()).collect();
        sections.push(format!("Pending: {}", labels.join(", ")));
    }
    if let Some(error) = state.error() {
        sections.push(format!("Error: {error}"));
    }
    sections.push(String::new());
    sections.push(forecast_settings(state));
    sections.push(String::new());
    sections.push(render_assumptions_input(
        state.raw(),
        state.committed(),
        state.is_debouncing(),
    ));

    if let Some(product_id) = state.selected_product() {
        if !state.cycle_failed() {
            sections.push(String::new());
            sections.push(forecast_panel(state, product_id));
            sections.push(String::new());
            sections.push(render_optimization(
                state.optimization(),
                &state.committed().assumptions,
            ));
        }
        sections.push(String::new());
        sections.push(state.inventory().render());
    }
    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::ModelType;
    use crate::services::dashboard::DashboardEffect;
    use crate::services::data_source::DataSourceError;
    use crate::test_support::{forecast_result, optimization_result};

    fn state_with_cycle() -> (DashboardState, u64) {
        let mut state = DashboardState::new();
        state.start();
        let effects = state.products_resolved(Ok(vec!["P0001".into(), "P0002".into()]));
        let cycle = effects
            .iter()
            .find_map(|effect| match effect {
                DashboardEffect::FetchCycle(request) => Some(request.cycle),
                _ => None,
            })
            .unwrap();
        (state, cycle)
    }

    #[test]
    fn loading_dashboard_shows_placeholders() {
        let (state, _) = state_with_cycle();
        let output = render_dashboard(&state);

        assert!(output.contains("Product: P0001 (2 available: P0001, P0002)"));
        assert!(output.contains("Status: Loading..."));
        assert!(output.contains("Loading forecast..."));
        assert!(output.contains("Loading optimization metrics..."));
        assert!(output.contains("Loading inventory history for P0001..."));
        assert!(!output.contains("Seasonal Periods"));
    }

    #[test]
    fn loaded_dashboard_renders_all_panels() {
        let (mut state, cycle) = state_with_cycle();
        state.cycle_resolved(
            cycle,
            Ok((
                forecast_result("P0001", 3),
                optimization_result("P0001", ModelType::Arima),
            )),
        );

        let output = render_dashboard(&state);
        assert!(output.contains("Status: Ready"));
        assert!(output.contains("Demand Forecast: P0001"));
        assert!(output.contains("Horizon: 3 days"));
        assert!(output.contains("Inventory Optimization: P0001"));
    }

    #[test]
    fn error_replaces_forecast_panels() {
        let (mut state, cycle) = state_with_cycle();
        state.cycle_resolved(
            cycle,
            Err(DataSourceError::Api {
                status: 500,
                detail: "bad input".into(),
            }),
        );

        let output = render_dashboard(&state);
        assert!(output.contains("Error: Optimization Error: bad input"));
        assert!(!output.contains("Demand Forecast"));
        assert!(!output.contains(crate::services::optimization_display::LOADING_PLACEHOLDER));
        // inventory keeps its own state
        assert!(output.contains("Loading inventory history for P0001..."));
    }

    #[test]
    fn product_list_error_keeps_loaded_panels() {
        let (mut state, cycle) = state_with_cycle();
        state.cycle_resolved(
            cycle,
            Ok((
                forecast_result("P0001", 3),
                optimization_result("P0001", ModelType::Arima),
            )),
        );
        state.start();
        state.products_resolved(Err(DataSourceError::Connection("refused".into())));

        let output = render_dashboard(&state);
        assert!(output.contains("Error: Product Error: Network error: refused"));
        assert!(output.contains("Demand Forecast: P0001"));
        assert!(output.contains("Inventory Optimization: P0001"));
    }

    #[test]
    fn pending_edit_is_marked_and_status_syncing() {
        let (mut state, cycle) = state_with_cycle();
        state.cycle_resolved(
            cycle,
            Ok((
                forecast_result("P0001", 30),
                optimization_result("P0001", ModelType::Arima),
            )),
        );
        state.edit(Field::ForecastDays, "14").unwrap();

        let output = render_dashboard(&state);
        assert!(output.contains("Status: Syncing changes..."));
        assert!(output.contains("Pending: forecast-days"));
        let line = output
            .lines()
            .find(|line| line.contains("Forecast Days:"))
            .unwrap();
        assert!(line.contains("14 (pending)"));
        // still showing the committed horizon
        assert!(output.contains("Horizon: 30 days"));
    }

    #[test]
    fn seasonal_periods_shown_for_seasonal_model() {
        let (mut state, _) = state_with_cycle();
        state.select_model(ModelType::ExponentialSmoothing);
        let output = render_dashboard(&state);
        assert!(output.contains("Seasonal Periods:"));
        assert!(output.contains("Exponential Smoothing"));
    }
}
