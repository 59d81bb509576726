// Data source URL
pub const SIPSA_URL: &str = "https://www.dane.gov.co/index.php/estadisticas-por-tema/agropecuario/sistema-de-informacion-de-precios-sipsa/componente-precios-mayoristas";

// Anchor texts on the bulletin page (compared lowercased and trimmed)
pub const EXCEL_LINK_TEXT: &str = "anexo";
pub const ARCHIVE_LINK_PREFIX: &str = "informes por ciudades";

// Target location
pub const TARGET_LOCATION: &str = "Bogotá, Corabastos";
pub const DOCUMENT_PREFIX: &str = "bogota";
pub const DOCUMENT_EXTENSION: &str = ".pdf";

// Spreadsheet layout
pub const CATEGORY_ROW: usize = 1;
pub const SUBCATEGORY_ROW: usize = 2;
pub const FIRST_DATA_ROW: usize = 4;

// Output column names
pub const PRODUCT_COLUMN: &str = "Producto";
pub const PRICE_COLUMN: &str = "Precio ($/kg)";
pub const VARIATION_COLUMN: &str = "Variación %";

// Presentation defaults
pub const MOVER_COUNT: usize = 3;
pub const EXCERPT_CHARS: usize = 2000;
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const CSV_FILE_NAME: &str = "precios_bogota.csv";
