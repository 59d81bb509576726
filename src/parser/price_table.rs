use crate::constants::FIRST_DATA_ROW;
use crate::errors::AppResult;
use crate::models::{PriceRow, PriceTable, RawTable, TableExtraction};
use tracing::{debug, info, warn};

use super::headers::build_column_labels;
use super::numeric::{coerce_number, coerce_percent};
use super::workbook::read_raw_table;

/// Extracts the price table for one market from the price annex workbook.
///
/// # Workflow
///
/// 1. Reads the first worksheet with no header inference
/// 2. Builds compound labels from the category and subcategory rows
/// 3. Skips the title and header rows; data starts at row 4
/// 4. Keeps `Producto` plus the first two columns labelled with `location`
/// 5. Coerces price and variation to numbers, dropping rows with no price
///
/// The result is a pure function of `bytes`, so repeated calls agree.
///
/// # Errors
///
/// Returns `Spreadsheet` if the bytes cannot be opened as a workbook. A
/// readable workbook without the market's columns yields
/// [`TableExtraction::NoColumnsFound`] instead.
pub fn extract_table(bytes: &[u8], location: &str) -> AppResult<TableExtraction> {
    let raw = read_raw_table(bytes)?;
    Ok(table_from_raw(&raw, location))
}

/// Schema validation step: the only place where columns are found by name.
///
/// Fewer than two matching columns means the layout no longer carries a price
/// and a variation for `location`. When a location appears in more than two
/// columns only the first pair is used and the rest are dropped.
pub fn table_from_raw(raw: &RawTable, location: &str) -> TableExtraction {
    let labels = build_column_labels(raw);

    let matching: Vec<usize> = labels
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, label)| label.starts_with(location))
        .map(|(idx, _)| idx)
        .collect();

    if matching.len() < 2 {
        warn!(
            location = location,
            matching_columns = matching.len(),
            "No price columns found for location"
        );
        return TableExtraction::NoColumnsFound;
    }
    if matching.len() > 2 {
        warn!(
            location = location,
            matching_columns = matching.len(),
            "Location appears in more than two columns, using the first pair"
        );
    }

    let (price_col, variation_col) = (matching[0], matching[1]);
    debug!(
        price_column = %labels[price_col],
        variation_column = %labels[variation_col],
        "Selected location columns"
    );

    let data_rows = raw.height().saturating_sub(FIRST_DATA_ROW);
    let mut rows = Vec::with_capacity(data_rows);

    for row in FIRST_DATA_ROW..raw.height() {
        let Some(price) = coerce_number(raw.cell(row, price_col)) else {
            continue;
        };

        rows.push(PriceRow {
            product: raw.cell(row, 0).as_text().unwrap_or_default(),
            price_per_kg: Some(price.trunc() as i64),
            variation_percent: coerce_percent(raw.cell(row, variation_col)),
        });
    }

    info!(
        location = location,
        rows_kept = rows.len(),
        rows_dropped = data_rows - rows.len(),
        "Price table extracted"
    );

    TableExtraction::Extracted(PriceTable {
        location: location.to_string(),
        rows,
    })
}
