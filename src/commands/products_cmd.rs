use std::io::Write;

use crate::commands::command_error::CommandError;
use crate::services::data_source::DashboardDataSource;

pub async fn products_command(
    source: &dyn DashboardDataSource,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let products = source
        .get_products()
        .await
        .map_err(CommandError::request("Failed to load products"))?;
    for product in products {
        writeln!(out, "{product}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_source::DataSourceError;
    use crate::test_support::FakeDataSource;

    #[tokio::test]
    async fn lists_one_product_per_line() {
        let source = FakeDataSource::with_products(&["P0001", "P0002"]);
        let mut out = Vec::new();

        products_command(&source, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "P0001\nP0002\n");
    }

    #[tokio::test]
    async fn reports_product_failure_with_context() {
        let source = FakeDataSource {
            product_error: Some(DataSourceError::NoProducts),
            ..FakeDataSource::default()
        };
        let mut out = Vec::new();

        let err = products_command(&source, &mut out).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to load products: No products found.");
        assert!(out.is_empty());
    }
}
