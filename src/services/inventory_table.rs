use tracing::debug;

use crate::domain::inventory::InventoryRecord;
use crate::services::data_source::DataSourceError;

pub const MAX_INVENTORY_ROWS: usize = 100;
pub const MISSING_VALUE: &str = "N/A";

/// A fetch the table wants issued. The generation ties the response back
/// to the product that was selected when it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRequest {
    pub generation: u64,
    pub product_id: String,
}

/// Historical inventory for the selected product. Owns its own loading
/// and error state, independent of the forecast panels.
#[derive(Debug, Clone, Default)]
pub struct InventoryTable {
    product_id: Option<String>,
    records: Option<Vec<InventoryRecord>>,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Option<&[InventoryRecord]> {
        self.records.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switches to `product_id`, dropping the previous rows and error right
    /// away so they never show under the new heading.
    pub fn set_product(&mut self, product_id: Option<&str>) -> Option<InventoryRequest> {
        if self.product_id.as_deref() == product_id {
            return None;
        }
        self.product_id = product_id.map(str::to_string);
        self.records = None;
        self.error = None;
        self.generation += 1;
        self.loading = product_id.is_some();

        product_id.map(|product_id| InventoryRequest {
            generation: self.generation,
            product_id: product_id.to_string(),
        })
    }

    /// Applies a fetch result. Returns false when the result belongs to a
    /// product that is no longer selected.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<Vec<InventoryRecord>, DataSourceError>,
    ) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale inventory response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = Some(records);
                self.error = None;
            }
            Err(err) => {
                self.records = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn visible_rows(&self) -> Vec<&InventoryRecord> {
        self.records
            .as_deref()
            .map(|records| latest_rows(records, MAX_INVENTORY_ROWS))
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let Some(product_id) = self.product_id.as_deref() else {
            return "Select a product to view its inventory history.".to_string();
        };
        if self.loading {
            return format!("Loading inventory history for {product_id}...");
        }
        if let Some(error) = &self.error {
            return format!("Error loading inventory: {error}");
        }
        let Some(records) = self.records.as_deref() else {
            return format!("Loading inventory history for {product_id}...");
        };
        if records.is_empty() {
            return format!("No historical data available for {product_id}.");
        }

        let rows = self.visible_rows();
        let mut lines = Vec::with_capacity(rows.len() + 3);
        lines.push(format!(
            "Historical Inventory: {product_id} (latest {} of {} records)",
            rows.len(),
            records.len()
        ));
        lines.push(format!(
            "{:<10} | {:>15} | {:>10}",
            "Date", "Inventory Level", "Units Sold"
        ));
        lines.push(format!("{}-|-{}-|-{}", "-".repeat(10), "-".repeat(15), "-".repeat(10)));
        for row in rows {
            lines.push(format!(
                "{:<10} | {:>15} | {:>10}",
                row.date.format("%Y-%m-%d").to_string(),
                format_count(row.inventory_level),
                format_count(row.units_sold)
            ));
        }
        lines.join("\n")
    }
}

/// The newest `limit` records, most recent first. Records sharing a date
/// keep their series order (later position first).
pub fn latest_rows(records: &[InventoryRecord], limit: usize) -> Vec<&InventoryRecord> {
    let mut indexed: Vec<(usize, &InventoryRecord)> = records.iter().enumerate().collect();
    indexed.sort_by(|(left_pos, left), (right_pos, right)| {
        right.date.cmp(&left.date).then(right_pos.cmp(left_pos))
    });
    indexed
        .into_iter()
        .take(limit)
        .map(|(_, record)| record)
        .collect()
}

/// Missing numbers render as a placeholder so "no data" never reads as zero.
pub fn format_count(value: Option<i64>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}
