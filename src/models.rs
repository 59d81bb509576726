/// Download links discovered on the bulletin page.
///
/// Either field is `None` when no anchor matched; that is a valid outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletinLinks {
    /// Price annex spreadsheet ("Anexo")
    pub excel_url: Option<String>,
    /// City reports archive ("Informes por ciudades ...")
    pub archive_url: Option<String>,
}

impl BulletinLinks {
    pub fn is_complete(&self) -> bool {
        self.excel_url.is_some() && self.archive_url.is_some()
    }
}

/// A single spreadsheet cell with no semantic meaning attached yet.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    /// Returns the cell as display text, or `None` for empty and blank cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            RawCell::Number(n) => Some(n.to_string()),
            RawCell::Bool(b) => Some(b.to_string()),
        }
    }
}

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Cell grid as read from the first worksheet, anchored at A1.
///
/// Rows may have different lengths; out-of-range lookups are [`RawCell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<RawCell>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

/// One cleaned product row for the target location.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub product: String,
    pub price_per_kg: Option<i64>,
    pub variation_percent: Option<f64>,
}

/// Cleaned price table for a single location.
///
/// Every row produced by the extractor has `price_per_kg` set. Products are
/// not deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub location: String,
    pub rows: Vec<PriceRow>,
}

impl PriceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of reading the price annex.
#[derive(Debug, Clone, PartialEq)]
pub enum TableExtraction {
    Extracted(PriceTable),
    /// The workbook is readable but holds no columns for the target location
    NoColumnsFound,
}

/// Which end of the variation ranking a mover list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverDirection {
    Decrease,
    Increase,
}

impl MoverDirection {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Decrease => "Largest decreases",
            Self::Increase => "Largest increases",
        }
    }

    /// Formats a variation following the list's sign convention.
    ///
    /// Decreases print the value as stored; increases always carry an explicit
    /// sign, so a positive magnitude reads as `+`.
    pub fn format_variation(&self, variation: f64) -> String {
        match self {
            Self::Decrease => format!("{variation:.2}%"),
            Self::Increase => format!("{variation:+.2}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoverList {
    pub direction: MoverDirection,
    pub rows: Vec<PriceRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movers {
    pub decreases: MoverList,
    pub increases: MoverList,
}

/// Outcome of looking for the location's report inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentText {
    /// Concatenated page text; may be empty when no page yields text
    Found(String),
    NotFound,
}
