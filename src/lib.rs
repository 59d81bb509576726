//! sipsa-cli library
//!
//! This crate provides the core functionality for the `sipsa-cli` binary.
//! Implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library turns the DANE SIPSA wholesale-price bulletin into a Bogotá
//! (Corabastos) price report:
//!
//! - [`downloader`] - Finds the "Anexo" and city report links and fetches them
//! - [`parser`] - Normalizes the price annex workbook into a typed price table
//! - [`ranker`] - Ranks the largest price decreases and increases
//! - [`extractor`] - Extracts the Bogotá PDF report text from the city archive
//! - [`pipeline`] - Runs one fetch from links to movers
//! - [`ui`] / [`exporter`] - Terminal rendering and CSV export
//! - [`cli`] - Command-line interface
//! - [`models`] - Data structures shared by every stage
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The core operations are pure functions over fetched content:
//!
//! ```no_run
//! use sipsa_cli::{extractor, parser, ranker, downloader, errors::AppResult};
//! use sipsa_cli::models::TableExtraction;
//! use url::Url;
//!
//! # fn example(html: &str, xlsx: &[u8], zip: &[u8]) -> AppResult<()> {
//! let base = Url::parse("https://www.dane.gov.co/")?;
//! let links = downloader::resolve_links(html, &base);
//!
//! if let TableExtraction::Extracted(table) = parser::extract_table(xlsx, "Bogotá, Corabastos")? {
//!     let movers = ranker::rank_movers(&table, 3);
//!     println!("{} products, {} decreases", table.len(), movers.decreases.rows.len());
//! }
//!
//! let text = extractor::extract_document_text(zip, "bogota", ".pdf")?;
//! # let _ = (links, text);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod errors;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod ranker;
pub mod ui;
pub mod utils;
