use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a product's inventory history. Dates are unique within a
/// product's series but not across products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub inventory_level: Option<i64>,
    #[serde(default)]
    pub units_sold: Option<i64>,
}
