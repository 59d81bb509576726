use crate::config::ResolvedConfig;
use crate::constants::{PRICE_COLUMN, PRODUCT_COLUMN, VARIATION_COLUMN};
use crate::errors::AppError;
use crate::models::{DocumentText, MoverList, PriceTable, TableExtraction};
use crate::pipeline::BulletinReport;
use crate::utils::{format_currency, truncate_chars};
use std::fmt::Write;

/// Renders a full bulletin report as terminal text.
///
/// Sections that could not be produced are replaced by a short "not
/// available" line rather than omitted, so the reader can tell a missing
/// link apart from a missing market.
///
/// # Example
///
/// ```no_run
/// use sipsa_cli::{config::ResolvedConfig, downloader, pipeline, ui};
///
/// # async fn example() -> Result<(), sipsa_cli::errors::AppError> {
/// let config = ResolvedConfig::default();
/// let client = downloader::build_client(config.request_timeout_secs)?;
/// let report = pipeline::run_pipeline(&client, &config).await?;
/// println!("{}", ui::render_report(&report, &config));
/// # Ok(())
/// # }
/// ```
pub fn render_report(report: &BulletinReport, config: &ResolvedConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Precios mayoristas - {} (SIPSA)\n",
        config.target_location
    );

    match &report.table {
        Some(TableExtraction::Extracted(table)) => {
            out.push_str(&render_price_table(table));
        }
        Some(TableExtraction::NoColumnsFound) => {
            let _ = writeln!(
                out,
                "Price table not available: no columns for {} in the annex.",
                config.target_location
            );
        }
        None => out.push_str("Price table not available: annex link not found.\n"),
    }

    if let Some(movers) = &report.movers {
        out.push('\n');
        out.push_str(&render_movers(&movers.decreases));
        out.push('\n');
        out.push_str(&render_movers(&movers.increases));
    }

    out.push('\n');
    match &report.document {
        Some(DocumentText::Found(text)) => {
            out.push_str(&render_document_excerpt(text, config.excerpt_chars));
        }
        Some(DocumentText::NotFound) => {
            let _ = writeln!(
                out,
                "Report not available: no '{}' document in the city reports archive.",
                config.document_prefix
            );
        }
        None => out.push_str("Report not available: city reports link not found.\n"),
    }

    out
}

/// Renders the price table with currency-formatted prices.
pub fn render_price_table(table: &PriceTable) -> String {
    let prices: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.price_per_kg.map(format_currency).unwrap_or_default())
        .collect();
    let variations: Vec<String> = table
        .rows
        .iter()
        .map(|r| r.variation_percent.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".into()))
        .collect();

    let product_width = column_width(PRODUCT_COLUMN, table.rows.iter().map(|r| r.product.as_str()));
    let price_width = column_width(PRICE_COLUMN, prices.iter().map(String::as_str));
    let variation_width = column_width(VARIATION_COLUMN, variations.iter().map(String::as_str));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{PRODUCT_COLUMN:<product_width$}  {PRICE_COLUMN:>price_width$}  {VARIATION_COLUMN:>variation_width$}"
    );
    let _ = writeln!(
        out,
        "{}  {}  {}",
        "-".repeat(product_width),
        "-".repeat(price_width),
        "-".repeat(variation_width)
    );
    for ((row, price), variation) in table.rows.iter().zip(&prices).zip(&variations) {
        let _ = writeln!(
            out,
            "{:<product_width$}  {price:>price_width$}  {variation:>variation_width$}",
            row.product
        );
    }
    let _ = writeln!(out, "{} products", table.len());

    out
}

/// Renders one mover list, applying its direction's sign convention.
pub fn render_movers(list: &MoverList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", list.direction.display_name());

    if list.rows.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    for row in &list.rows {
        let variation = row
            .variation_percent
            .map(|v| list.direction.format_variation(v))
            .unwrap_or_default();
        let price = row.price_per_kg.map(format_currency).unwrap_or_default();
        let _ = writeln!(out, "  {} {variation} ({price}/kg)", row.product);
    }

    out
}

/// Renders the first `max_chars` characters of the report text.
pub fn render_document_excerpt(text: &str, max_chars: usize) -> String {
    if text.trim().is_empty() {
        return "Report found, but it contains no extractable text.\n".to_string();
    }

    let excerpt = truncate_chars(text, max_chars);
    let mut out = String::from("Report excerpt:\n");
    out.push_str(excerpt);
    if excerpt.len() < text.len() {
        out.push_str("\n[...]");
    }
    out.push('\n');
    out
}

/// Single notice shown in place of the whole report when a run aborts.
pub fn render_error_notice(err: &AppError) -> String {
    format!("Could not load the bulletin data.\n{err}\n")
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BulletinLinks, MoverDirection, PriceRow};
    use crate::ranker::rank_movers;

    fn sample_table() -> PriceTable {
        PriceTable {
            location: "Bogotá, Corabastos".to_string(),
            rows: vec![
                PriceRow {
                    product: "Tomate chonto".to_string(),
                    price_per_kg: Some(2500),
                    variation_percent: Some(-5.26),
                },
                PriceRow {
                    product: "Papa".to_string(),
                    price_per_kg: Some(1234),
                    variation_percent: Some(12.5),
                },
            ],
        }
    }

    #[test]
    fn test_render_price_table_formats_currency() {
        let out = render_price_table(&sample_table());
        assert!(out.contains("Producto"));
        assert!(out.contains("$2.500"));
        assert!(out.contains("$1.234"));
        assert!(out.contains("-5.26"));
        assert!(out.contains("2 products"));
    }

    #[test]
    fn test_render_movers_sign_convention() {
        let movers = rank_movers(&sample_table(), 3);
        let dec = render_movers(&movers.decreases);
        let inc = render_movers(&movers.increases);
        assert!(dec.contains("Tomate chonto -5.26%"));
        assert!(inc.starts_with("Largest increases"));
        assert!(inc.contains("Papa +12.50%"));
    }

    #[test]
    fn test_render_movers_empty_list() {
        let list = MoverList {
            direction: MoverDirection::Decrease,
            rows: vec![],
        };
        assert!(render_movers(&list).contains("(none)"));
    }

    #[test]
    fn test_render_document_excerpt_truncates() {
        let out = render_document_excerpt("abcdefghij", 4);
        assert!(out.contains("abcd"));
        assert!(!out.contains("abcde"));
        assert!(out.contains("[...]"));

        let empty = render_document_excerpt("  ", 4);
        assert!(empty.contains("no extractable text"));
    }

    #[test]
    fn test_render_report_unavailable_sections() {
        let config = ResolvedConfig::default();
        let report = BulletinReport {
            links: BulletinLinks::default(),
            table: Some(TableExtraction::NoColumnsFound),
            document: Some(DocumentText::NotFound),
            movers: None,
        };

        let out = render_report(&report, &config);
        assert!(out.contains("no columns for Bogotá, Corabastos"));
        assert!(out.contains("no 'bogota' document"));
        assert!(!out.contains("Largest"));
    }

    #[test]
    fn test_render_report_missing_links() {
        let config = ResolvedConfig::default();
        let report = BulletinReport {
            links: BulletinLinks::default(),
            table: None,
            document: None,
            movers: None,
        };

        let out = render_report(&report, &config);
        assert!(out.contains("annex link not found"));
        assert!(out.contains("city reports link not found"));
    }

    #[test]
    fn test_render_error_notice() {
        let notice = render_error_notice(&AppError::Fetch("HTTP 503".into()));
        assert!(notice.starts_with("Could not load the bulletin data."));
        assert!(notice.contains("HTTP 503"));
    }
}
