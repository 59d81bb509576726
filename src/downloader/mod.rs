//! Fetch operations for the SIPSA bulletin.
//!
//! This module finds the price annex and city report links on the bulletin page
//! and downloads resources into memory. The main entry points are [`fetch_links`]
//! and [`fetch_bytes`].

mod file_downloader;
mod link_fetcher;

// Re-export public API
pub use file_downloader::{build_client, fetch_bytes, fetch_text};
pub use link_fetcher::{fetch_links, resolve_links};
