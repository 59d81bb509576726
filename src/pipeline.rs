//! One bulletin run: resolve links, read the price annex, read the city
//! report, rank movers.

use crate::config::ResolvedConfig;
use crate::downloader::{fetch_bytes, fetch_links};
use crate::errors::AppResult;
use crate::extractor::extract_document_text;
use crate::models::{BulletinLinks, DocumentText, Movers, TableExtraction};
use crate::parser::extract_table;
use crate::ranker::rank_movers;
use tracing::{info, warn};

/// Everything a run produced, ready for rendering.
///
/// `table` and `document` are `None` when the bulletin page had no link for
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletinReport {
    pub links: BulletinLinks,
    pub table: Option<TableExtraction>,
    pub document: Option<DocumentText>,
    pub movers: Option<Movers>,
}

/// Runs the whole pipeline once, sequentially.
///
/// # Errors
///
/// Any `Fetch`, `Spreadsheet`, `Archive` or `Document` error aborts the run;
/// no partial report is returned. Missing links, missing location columns and
/// a missing report are part of the returned [`BulletinReport`].
pub async fn run_pipeline(
    client: &reqwest::Client,
    config: &ResolvedConfig,
) -> AppResult<BulletinReport> {
    let links = fetch_links(client, &config.source_url).await?;

    let table = match &links.excel_url {
        Some(url) => {
            info!(url = %url, "Fetching price annex");
            let bytes = fetch_bytes(client, url).await?;
            Some(extract_table(&bytes, &config.target_location)?)
        }
        None => {
            warn!("Price annex link not found on bulletin page");
            None
        }
    };

    let document = match &links.archive_url {
        Some(url) => {
            info!(url = %url, "Fetching city reports archive");
            let bytes = fetch_bytes(client, url).await?;
            Some(extract_document_text(
                &bytes,
                &config.document_prefix,
                &config.document_extension,
            )?)
        }
        None => {
            warn!("City reports link not found on bulletin page");
            None
        }
    };

    let movers = match &table {
        Some(TableExtraction::Extracted(price_table)) => {
            Some(rank_movers(price_table, config.mover_count))
        }
        _ => None,
    };

    Ok(BulletinReport {
        links,
        table,
        document,
        movers,
    })
}
