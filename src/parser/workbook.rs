use crate::errors::{AppError, AppResult};
use crate::models::{RawCell, RawTable};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use tracing::debug;

/// Reads the first worksheet of a workbook into a [`RawTable`].
///
/// No header inference is done: every row, including the title and header
/// rows, comes back as data. The grid is anchored at cell A1, so leading empty
/// rows and columns are kept as [`RawCell::Empty`] and fixed row offsets stay
/// meaningful.
///
/// # Errors
///
/// Returns `Spreadsheet` if the bytes are not a workbook calamine can open or
/// the workbook has no worksheets.
pub fn read_raw_table(bytes: &[u8]) -> AppResult<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Spreadsheet("Workbook has no worksheets".into()))??;

    let table = range_to_raw_table(&range);
    debug!(
        rows = table.height(),
        columns = table.width(),
        "Worksheet loaded"
    );

    Ok(table)
}

fn range_to_raw_table(range: &Range<Data>) -> RawTable {
    let Some((last_row, last_col)) = range.end() else {
        return RawTable::default();
    };

    let rows = (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).map_or(RawCell::Empty, to_raw_cell))
                .collect()
        })
        .collect();

    RawTable::new(rows)
}

fn to_raw_cell(data: &Data) -> RawCell {
    match data {
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) | Data::Empty => RawCell::Empty,
    }
}
