use crate::constants::{PRICE_COLUMN, PRODUCT_COLUMN, VARIATION_COLUMN};
use crate::errors::{AppError, AppResult};
use crate::models::PriceTable;
use polars::prelude::*;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Converts a price table into a Polars DataFrame with the report's column names.
pub fn table_to_dataframe(table: &PriceTable) -> AppResult<DataFrame> {
    let len = table.len();
    let mut products = Vec::with_capacity(len);
    let mut prices = Vec::with_capacity(len);
    let mut variations = Vec::with_capacity(len);

    for row in &table.rows {
        products.push(row.product.as_str());
        prices.push(row.price_per_kg);
        variations.push(row.variation_percent);
    }

    DataFrame::new(vec![
        Series::new(PRODUCT_COLUMN, products),
        Series::new(PRICE_COLUMN, prices),
        Series::new(VARIATION_COLUMN, variations),
    ])
    .map_err(|e| AppError::Export(format!("Failed to create DataFrame: {e}")))
}

/// Serializes a price table as CSV: header row, one line per product, raw
/// integer prices (not the display-formatted currency).
pub fn table_to_csv(table: &PriceTable) -> AppResult<Vec<u8>> {
    let mut df = table_to_dataframe(table)?;
    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| AppError::Export(format!("Failed to write CSV: {e}")))?;
    Ok(buf)
}

/// Writes the CSV export of `table` to `path`, creating parent directories.
pub async fn write_csv(table: &PriceTable, path: &Path) -> AppResult<()> {
    let csv = table_to_csv(table)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    fs::write(path, &csv).await.map_err(|e| {
        AppError::Io(format!("Failed to write CSV {}: {}", path.display(), e))
    })?;

    info!(
        path = %path.display(),
        rows = table.len(),
        size_bytes = csv.len(),
        "CSV exported"
    );
    Ok(())
}
