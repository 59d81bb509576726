//! Price annex parsing.
//!
//! Turns the raw bytes of the SIPSA "Anexo" workbook into a typed
//! [`PriceTable`](crate::models::PriceTable) for one market. Loosely typed
//! spreadsheet access stays inside this module.

mod headers;
mod numeric;
mod price_table;
mod workbook;

// Re-export public API
pub use headers::build_column_labels;
pub use numeric::{coerce_number, coerce_percent, parse_formatted_number, parse_formatted_percent};
pub use price_table::{extract_table, table_from_raw};
pub use workbook::read_raw_table;
