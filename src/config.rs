//! Archive configuration.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in the
//! archive root, next to `series.json`, and is optional: stock defaults cover a
//! standard archive layout and ship Japanese and English locales.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [archive]
//! catalog = "series.json"    # Series catalog, relative to the archive root
//! bundles_dir = "zips"       # zips/{seriesId}/{serial}.zip
//! documents_dir = "output"   # output/{seriesId}/{prefix}{serial}.pdf
//! issue_prefix = "TQ-"       # Document name prefix and fallback issue title
//!
//! [links]
//! pages_base = "https://tokistorage.github.io/newsletter-master"
//! site_base = "https://tokistorage.github.io/lp"
//! player = "https://tokistorage.github.io/qr/play.html"
//! site_name = "TokiStorage"
//! copyright_year = 2026
//!
//! [listing]
//! recent_limit = 10          # Entries in the "recent" sections
//!
//! [locales.en]               # Any stock locale string can be overridden
//! heading = "Series"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. User values are merged over the stock defaults
//! table by table, so overriding one locale string keeps all the others.
//! Unknown keys are rejected to catch typos early.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the catalog, bundles and rendered documents live.
    pub archive: ArchiveConfig,
    /// Public URLs used in generated links.
    pub links: LinksConfig,
    /// Listing sizes.
    pub listing: ListingConfig,
    /// Page strings per locale, keyed by language code.
    pub locales: BTreeMap<String, Locale>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let locales = [Locale::japanese(), Locale::english()]
            .into_iter()
            .map(|locale| (locale.lang.clone(), locale))
            .collect();
        Self {
            archive: ArchiveConfig::default(),
            links: LinksConfig::default(),
            listing: ListingConfig::default(),
            locales,
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.recent_limit == 0 {
            return Err(ConfigError::Validation(
                "listing.recent_limit must be at least 1".into(),
            ));
        }
        for (key, value) in [
            ("archive.catalog", &self.archive.catalog),
            ("archive.bundles_dir", &self.archive.bundles_dir),
            ("archive.documents_dir", &self.archive.documents_dir),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.locales.is_empty() {
            return Err(ConfigError::Validation(
                "at least one locale must be configured".into(),
            ));
        }
        let mut filenames = BTreeSet::new();
        for (code, locale) in &self.locales {
            let name = locale.filename.as_str();
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::Validation(format!(
                    "locales.{code}.filename must be a plain file name, got {name:?}"
                )));
            }
            if !filenames.insert(name) {
                return Err(ConfigError::Validation(format!(
                    "locales.{code}.filename {name:?} is used by another locale"
                )));
            }
        }
        Ok(())
    }
}

/// Archive layout, relative to the archive root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    pub catalog: String,
    pub bundles_dir: String,
    pub documents_dir: String,
    pub issue_prefix: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            catalog: "series.json".to_string(),
            bundles_dir: "zips".to_string(),
            documents_dir: "output".to_string(),
            issue_prefix: "TQ-".to_string(),
        }
    }
}

/// Public URLs and footer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Where the archive itself is published; bundle and document links hang off it.
    pub pages_base: String,
    /// The main site: logo link, favicons, footer link.
    pub site_base: String,
    /// Issue player page, called with `?zip=...&pdf=...`.
    pub player: String,
    pub site_name: String,
    pub copyright_year: u16,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            pages_base: "https://tokistorage.github.io/newsletter-master".to_string(),
            site_base: "https://tokistorage.github.io/lp".to_string(),
            player: "https://tokistorage.github.io/qr/play.html".to_string(),
            site_name: "TokiStorage".to_string(),
            copyright_year: 2026,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Entries shown in the "recent series" and "recent issues" sections.
    pub recent_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the archive root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Newsletter Index Configuration
# ==============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the archive root, next to series.json.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Archive layout (paths relative to the archive root)
# ---------------------------------------------------------------------------
[archive]
# Series catalog: {"series": [{"seriesId": "...", "seriesName": "..."}]}
catalog = "series.json"

# One directory per series, one {serial}.zip bundle per issue.
# Each bundle's manifest is read from {serial}.json beside it.
bundles_dir = "zips"

# Rendered documents: {documents_dir}/{seriesId}/{issue_prefix}{serial}.pdf
documents_dir = "output"

# Prefix for document names, also the title of issues without one.
issue_prefix = "TQ-"

# ---------------------------------------------------------------------------
# Public links
# ---------------------------------------------------------------------------
[links]
# Base URL the archive is published under.
pages_base = "https://tokistorage.github.io/newsletter-master"

# Main site: logo link, favicons, footer.
site_base = "https://tokistorage.github.io/lp"

# Issue player page.
player = "https://tokistorage.github.io/qr/play.html"

site_name = "TokiStorage"
copyright_year = 2026

# ---------------------------------------------------------------------------
# Listings
# ---------------------------------------------------------------------------
[listing]
# Entries in the "recent series" / "recent issues" sections.
recent_limit = 10

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
# Japanese (ja -> index.html) and English (en -> index-en.html) are built in.
# Override any string of a stock locale:
#
# [locales.en]
# heading = "Special Feature Series"
# months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun",
#           "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
#
# label_style is "suffix" (21世紀, 2024年) or "ordinal" (21st century, 2024).
# A new locale must define every string; see the output of the stock locales.
"##
}
