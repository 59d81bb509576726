use crate::constants::{CATEGORY_ROW, PRODUCT_COLUMN, SUBCATEGORY_ROW};
use crate::models::RawTable;

/// Builds compound column labels from the two header rows.
///
/// The category row is forward-filled left to right within the row, so a
/// market name spanning several merged cells labels every column under it.
/// Each column after the first is labelled `"{category} - {subcategory}"`;
/// a missing side becomes the empty string. Column 0 is always `Producto`.
pub fn build_column_labels(table: &RawTable) -> Vec<String> {
    let width = table.width();
    let mut labels = Vec::with_capacity(width);
    let mut category: Option<String> = None;

    for col in 0..width {
        if let Some(value) = table.cell(CATEGORY_ROW, col).as_text() {
            category = Some(value);
        }

        if col == 0 {
            labels.push(PRODUCT_COLUMN.to_string());
            continue;
        }

        let subcategory = table
            .cell(SUBCATEGORY_ROW, col)
            .as_text()
            .unwrap_or_default();
        labels.push(format!(
            "{} - {}",
            category.as_deref().unwrap_or(""),
            subcategory
        ));
    }

    labels
}
