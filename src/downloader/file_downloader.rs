use crate::errors::{AppError, AppResult};
use std::time::Duration;
use tracing::{debug, info};

/// Builds the HTTP client used for every fetch of a run.
pub fn build_client(timeout_secs: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::Fetch(format!("Failed to build HTTP client: {e}")))
}

/// Downloads a resource fully into memory.
///
/// Failures are reported once and never retried; the user re-runs the command
/// to try again.
///
/// # Errors
///
/// Returns `Fetch` for transport errors, timeouts and non-success statuses.
/// The status code is included in the message when the server answered.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> AppResult<Vec<u8>> {
    let response = send(client, url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Fetch(format!("Failed to read body of {url}: {e}")))?;

    info!(url = url, size_bytes = bytes.len(), "Download completed");
    Ok(bytes.to_vec())
}

/// Downloads a resource as text.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> AppResult<String> {
    let response = send(client, url).await?;
    response
        .text()
        .await
        .map_err(|e| AppError::Fetch(format!("Failed to read body of {url}: {e}")))
}

async fn send(client: &reqwest::Client, url: &str) -> AppResult<reqwest::Response> {
    debug!(url = url, "Sending request");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Fetch(format!("Failed to fetch {url}: {e}")))?;

    let status = response.status();
    response.error_for_status().map_err(|e| {
        let status_code = status.as_u16();
        AppError::Fetch(format!("HTTP {status_code}: Failed to fetch {url}: {e}"))
    })
}
