use crate::constants::*;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in.
///
/// Defaults point at the published DANE bulletin and the Bogotá (Corabastos)
/// market; tests and the `toml` subcommand override them to run against
/// fixture data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Bulletin index page holding the "Anexo" and city report links
    pub source_url: String,
    /// Column-label prefix of the target market in the price annex
    pub target_location: String,
    /// Lowercase file-name prefix of the market's PDF inside the archive
    pub document_prefix: String,
    /// File extension of the report inside the archive
    pub document_extension: String,

    // Presentation
    /// Number of rows in each mover list
    pub mover_count: usize,
    /// Number of characters of PDF text shown in the report
    pub excerpt_chars: usize,
    /// Where to write the CSV export; no export when unset
    pub csv_path: Option<PathBuf>,

    // Network
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source_url: SIPSA_URL.to_string(),
            target_location: TARGET_LOCATION.to_string(),
            document_prefix: DOCUMENT_PREFIX.to_string(),
            document_extension: DOCUMENT_EXTENSION.to_string(),
            mover_count: MOVER_COUNT,
            excerpt_chars: EXCERPT_CHARS,
            csv_path: None,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Every key is optional; missing keys take the defaults. Unknown keys are
    /// rejected so typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `InvalidInput` if the TOML is
    /// malformed or a value fails [`ResolvedConfig::validate`].
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        url::Url::parse(&self.source_url)?;

        if self.target_location.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Target location must not be empty".into(),
            ));
        }
        if self.document_prefix.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Document prefix must not be empty".into(),
            ));
        }
        if self.mover_count == 0 {
            return Err(AppError::InvalidInput(
                "Mover count must be greater than 0".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "Request timeout must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
