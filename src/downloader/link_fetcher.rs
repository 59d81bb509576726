use crate::constants::{ARCHIVE_LINK_PREFIX, EXCEL_LINK_TEXT};
use crate::errors::AppResult;
use crate::models::BulletinLinks;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

use super::file_downloader::fetch_text;

const ANCHOR_SELECTOR: &str = "a[href]";

/// Cached CSS selector for anchors carrying a destination.
/// Compiled once at initialization for performance.
static ANCHOR_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Fetches the bulletin index page and resolves its download links.
///
/// # Arguments
///
/// * `client` - HTTP client to use for the request
/// * `source_url` - URL of the bulletin index page
///
/// # Errors
///
/// Returns `Url` if `source_url` cannot be parsed and `Fetch` if the request
/// fails or returns a non-success status. Missing anchors are not errors.
///
pub async fn fetch_links(client: &reqwest::Client, source_url: &str) -> AppResult<BulletinLinks> {
    let base_url = Url::parse(source_url)?;

    info!(url = %base_url, "Fetching bulletin page");
    let html = fetch_text(client, base_url.as_str()).await?;

    let links = resolve_links(&html, &base_url);
    info!(
        excel_found = links.excel_url.is_some(),
        archive_found = links.archive_url.is_some(),
        "Bulletin links resolved"
    );

    Ok(links)
}

/// Scans HTML for the price annex and city report links.
///
/// Anchors are visited in document order and their visible text is compared
/// trimmed and lowercased:
/// - the first anchor reading exactly `anexo` is the spreadsheet link;
/// - the first anchor starting with `informes por ciudades` is the archive link.
///
/// Each link resolves independently and scanning stops once both are known.
/// Hrefs starting with `/` are made absolute on `base_url`'s origin; any other
/// href is returned unchanged.
pub fn resolve_links(html: &str, base_url: &Url) -> BulletinLinks {
    let document = Html::parse_document(html);

    let selector = ANCHOR_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(ANCHOR_SELECTOR).expect("ANCHOR_SELECTOR is a valid CSS selector")
    });

    let mut links = BulletinLinks::default();

    for element in document.select(selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text = element.text().collect::<String>().trim().to_lowercase();

        if links.excel_url.is_none() && text == EXCEL_LINK_TEXT {
            debug!(href = href, "Found price annex link");
            links.excel_url = Some(absolutize(href, base_url));
        } else if links.archive_url.is_none() && text.starts_with(ARCHIVE_LINK_PREFIX) {
            debug!(href = href, "Found city reports link");
            links.archive_url = Some(absolutize(href, base_url));
        }

        if links.is_complete() {
            break;
        }
    }

    links
}

fn absolutize(href: &str, base_url: &Url) -> String {
    // Plain origin prefix: `//host/x` stays on this origin.
    if href.starts_with('/') {
        format!("{}{href}", base_url.origin().ascii_serialization())
    } else {
        href.to_string()
    }
}
