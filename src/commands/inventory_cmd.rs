use std::io::Write;

use crate::commands::command_error::CommandError;
use crate::services::data_source::DashboardDataSource;
use crate::services::inventory_table::InventoryTable;

pub async fn inventory_command(
    source: &dyn DashboardDataSource,
    product_id: &str,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let mut table = InventoryTable::new();
    if let Some(request) = table.set_product(Some(product_id)) {
        let records = source
            .get_inventory(&request.product_id)
            .await
            .map_err(CommandError::request("Error loading inventory"))?;
        table.resolve(request.generation, Ok(records));
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeDataSource, inventory_record};

    #[tokio::test]
    async fn renders_latest_records_first() {
        let mut source = FakeDataSource::default();
        source.inventory.insert(
            "P0001".to_string(),
            vec![
                inventory_record(2024, 1, 1, Some(50), Some(4)),
                inventory_record(2024, 1, 2, Some(46), None),
            ],
        );
        let mut out = Vec::new();

        inventory_command(&source, "P0001", &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        let newer = output.find("2024-01-02").unwrap();
        let older = output.find("2024-01-01").unwrap();
        assert!(newer < older);
        assert!(output.contains("N/A"));
    }

    #[tokio::test]
    async fn empty_history_has_its_own_message() {
        let mut source = FakeDataSource::default();
        source.inventory.insert("P0009".to_string(), Vec::new());
        let mut out = Vec::new();

        inventory_command(&source, "P0009", &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap().trim(),
            "No historical data available for P0009."
        );
    }

    #[tokio::test]
    async fn unknown_product_reports_service_detail() {
        let source = FakeDataSource::default();
        let mut out = Vec::new();

        let err = inventory_command(&source, "NOPE", &mut out)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Error loading inventory: Product ID 'NOPE' not found in dataset."
        );
    }
}
