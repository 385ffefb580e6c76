use crate::domain::assumptions::{Assumptions, Field};
use crate::domain::forecast::ModelType;
use crate::domain::optimization::OptimizationResult;
use crate::services::inventory_table::{MISSING_VALUE, format_count};

pub const LOADING_PLACEHOLDER: &str = "Loading optimization metrics...";

const LABEL_WIDTH: usize = 30;

/// Renders reorder metrics together with the assumptions behind them.
/// `assumptions` are the committed inputs; echoed values from the service
/// take precedence when present.
pub fn render_optimization(result: Option<&OptimizationResult>, assumptions: &Assumptions) -> String {
    let Some(result) = result else {
        return LOADING_PLACEHOLDER.to_string();
    };

    let mut lines = Vec::new();
    if result.is_empty() {
        lines.push(format!(
            "No optimization data available for {}.",
            product_label(result)
        ));
    } else {
        lines.push(format!("Inventory Optimization: {}", product_label(result)));
        lines.push(metric_line("Current Inventory", format_count(result.current_inventory)));
        lines.push(metric_line("Safety Stock", format_count(result.safety_stock)));
        lines.push(metric_line(
            "Demand During Lead Time",
            format_count(result.demand_during_lead_time),
        ));
        lines.push(metric_line(
            "Economic Order Quantity",
            format_count(result.economic_order_quantity),
        ));
        lines.push(metric_line("Reorder Point", format_count(result.reorder_point)));
        lines.push(format!(
            "Suggestion: {}",
            result.suggestion.as_deref().unwrap_or(MISSING_VALUE)
        ));
    }

    lines.push(String::new());
    lines.push("Assumptions Used".to_string());
    lines.extend(assumption_lines(result, assumptions));
    lines.join("\n")
}

fn product_label(result: &OptimizationResult) -> &str {
    if result.product_id.is_empty() {
        "selected product"
    } else {
        &result.product_id
    }
}

fn assumption_lines(result: &OptimizationResult, assumptions: &Assumptions) -> Vec<String> {
    let used = result.assumptions_used.clone().unwrap_or_default();
    let mut lines = Vec::new();

    lines.push(metric_line(
        "Model",
        result
            .model_type_used
            .map(|model| model.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
    ));
    lines.push(metric_line("Forecast Days", format_optional(result.forecast_days_used)));
    if result.model_type_used == Some(ModelType::ExponentialSmoothing) {
        lines.push(metric_line(
            "Seasonal Periods",
            format_optional(result.seasonal_periods_used),
        ));
    }

    let lead_time = used.lead_time_days.or(assumptions.lead_time_days);
    lines.push(metric_line(Field::LeadTime.label(), format_optional(lead_time)));
    lines.push(metric_line(
        Field::ServiceLevel.label(),
        format_amount(
            used.service_level_percent
                .unwrap_or(assumptions.service_level_percent),
        ),
    ));
    lines.push(metric_line(
        Field::HoldingCost.label(),
        format_amount(
            used.holding_cost_per_unit_per_year
                .unwrap_or(assumptions.holding_cost),
        ),
    ));
    lines.push(metric_line(
        Field::OrderingCost.label(),
        format_amount(used.ordering_cost_per_order.unwrap_or(assumptions.ordering_cost)),
    ));
    if let Some(method) = used.demand_variability_method {
        lines.push(metric_line("Demand Variability", method));
    }
    if let Some(method) = used.annual_demand_method {
        lines.push(metric_line("Annual Demand", method));
    }
    lines
}

fn metric_line(label: &str, value: String) -> String {
    format!("  {:<width$} {value}", format!("{label}:"), width = LABEL_WIDTH)
}

fn format_optional(value: Option<u32>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
