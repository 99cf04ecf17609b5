//! Series catalog (`series.json`).
//!
//! ```json
//! {
//!   "series": [
//!     { "seriesId": "alpha", "seriesName": "Morning Letters" }
//!   ]
//! }
//! ```
//!
//! The catalog only supplies display names. A series that has bundles but no
//! catalog entry is still published, under its raw id. A missing catalog file
//! means an empty catalog; a catalog that exists but cannot be read or parsed
//! is fatal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading catalog {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("invalid catalog {0}: {1}")]
    Json(PathBuf, serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    series: Vec<SeriesInfo>,
}

/// One catalog entry. Fields the index does not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInfo {
    pub series_id: String,
    #[serde(default)]
    pub series_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, SeriesInfo>,
}

impl Catalog {
    /// Display name for a series: its catalog name, or the id itself.
    pub fn display_name<'a>(&'a self, series_id: &'a str) -> &'a str {
        self.entries
            .get(series_id)
            .and_then(|info| info.series_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(series_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the catalog at `path`. A missing file yields an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Ok(Catalog::default());
    }
    let content = fs::read_to_string(path).map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
    let file: CatalogFile =
        serde_json::from_str(&content).map_err(|e| CatalogError::Json(path.to_path_buf(), e))?;

    // Later entries win on duplicate ids
    let entries = file
        .series
        .into_iter()
        .map(|info| (info.series_id.clone(), info))
        .collect();
    Ok(Catalog { entries })
}
