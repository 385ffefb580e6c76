use plotters::prelude::*;
use thiserror::Error;

pub const X_AXIS_LABEL: &str = "Day";
pub const Y_AXIS_LABEL: &str = "Forecasted Demand (Units)";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("forecast data is empty")]
    EmptyForecast,
    #[error("failed to render forecast chart: {0}")]
    Plot(String),
}

/// Maps a forecast to (day, value) pairs, starting at day 1.
pub fn chart_points(values: &[f64]) -> Vec<(u32, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| (index as u32 + 1, *value))
        .collect()
}

pub fn render_forecast_text(product_id: &str, values: &[f64]) -> String {
    if values.is_empty() {
        return format!("No forecast data available for {product_id}.");
    }
    let mut lines = Vec::with_capacity(values.len() + 3);
    lines.push(format!("Demand Forecast: {product_id}"));
    lines.push(format!("{X_AXIS_LABEL:>5} | {Y_AXIS_LABEL}"));
    lines.push(format!("{}-|-{}", "-".repeat(5), "-".repeat(Y_AXIS_LABEL.len())));
    for (day, value) in chart_points(values) {
        lines.push(format!("{day:>5} | {value:.2}"));
    }
    lines.join("\n")
}

pub async fn write_forecast_chart_png(
    output_path: &str,
    product_id: &str,
    values: &[f64],
) -> Result<(), ChartError> {
    if values.is_empty() {
        return Err(ChartError::EmptyForecast);
    }
    let output_path = output_path.to_string();
    let caption = format!("Demand Forecast ({product_id})");
    let points = chart_points(values);
    tokio::task::spawn_blocking(move || render_chart_png(&output_path, &caption, &points))
        .await
        .map_err(|e| ChartError::Plot(e.to_string()))??;
    Ok(())
}

fn render_chart_png(
    output_path: &str,
    caption: &str,
    points: &[(u32, f64)],
) -> Result<(), ChartError> {
    let max_x = points.len().max(1) as u32 + 1;
    let max_value = points
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_value = points
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::INFINITY, f64::min)
        .min(0.0);
    let max_y = if max_value <= min_value {
        min_value + 1.0
    } else {
        max_value + (max_value - min_value) * 0.1
    };

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(caption, ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, min_value..max_y)
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(points.len().min(15).max(2))
        .draw()
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    let line_color = RGBColor(30, 122, 204);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(|e| ChartError::Plot(e.to_string()))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 3, line_color.filled())),
        )
        .map_err(|e| ChartError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Plot(e.to_string()))?;
    Ok(())
}
