//! Issue metadata: bundle manifests, title resolution and timestamp display.
//!
//! Every bundle carries a `manifest.json` describing the issue. Bundles are
//! opaque to this crate; the manifest is read from a copy extracted next to the
//! bundle, with the same stem:
//!
//! ```text
//! zips/alpha/001.zip     # bundle
//! zips/alpha/001.json    # its manifest.json
//! ```
//!
//! Reading goes through the [`ManifestReader`] trait so a different source
//! (an archive reader, a test double) can be swapped in.
//!
//! ## Resolution
//!
//! - **Title**: manifest `title` → `metadata.title` → none (the page falls back
//!   to `{prefix}{serial}`)
//! - **Date**: `createdAt`, shifted into `metadata.tz` when present and shown
//!   as `YYYY-MM-DD HH:MM`
//!
//! A manifest that is missing is not an error; one that cannot be read or
//! parsed is reported to the caller, which records a warning and carries on
//! with empty metadata.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("invalid manifest {0}: {1}")]
    Json(PathBuf, serde_json::Error),
}

/// The subset of a bundle's `manifest.json` the index needs.
///
/// Every field is optional. A field that is `null` or of the wrong type reads
/// as absent instead of failing the whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleManifest {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<ManifestMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ManifestMetadata {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    /// UTC offset the issue was created in, e.g. `+09:00`.
    #[serde(deserialize_with = "lenient")]
    pub tz: Option<String>,
}

impl BundleManifest {
    fn metadata(&self) -> ManifestMetadata {
        self.metadata.clone().unwrap_or_default()
    }

    pub fn resolved_title(&self) -> Option<String> {
        let metadata = self.metadata();
        resolve(&[self.title.as_deref(), metadata.title.as_deref()])
    }

    pub fn display_date(&self) -> String {
        format_timestamp(
            self.created_at.as_deref().unwrap_or_default(),
            self.metadata().tz.as_deref().unwrap_or_default(),
        )
    }
}

/// Read any JSON value, keeping it only when it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Source of bundle manifests.
pub trait ManifestReader {
    /// Manifest for the bundle at `bundle`, `Ok(None)` when it has none.
    fn read_manifest(&self, bundle: &Path) -> Result<Option<BundleManifest>, ManifestError>;
}

/// Reads `{serial}.json` next to `{serial}.zip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarManifest;

impl ManifestReader for SidecarManifest {
    fn read_manifest(&self, bundle: &Path) -> Result<Option<BundleManifest>, ManifestError> {
        let sidecar = bundle.with_extension("json");
        if !sidecar.is_file() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&sidecar).map_err(|e| ManifestError::Io(sidecar.clone(), e))?;
        let manifest =
            serde_json::from_str(&content).map_err(|e| ManifestError::Json(sidecar, e))?;
        Ok(Some(manifest))
    }
}

/// First non-empty value, trimmed, in priority order.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Format an ISO-8601 timestamp as `YYYY-MM-DD HH:MM`, shifted into `tz` when given.
///
/// Timestamps with an offset (`Z`, `+09:00`) are converted; naive ones are
/// taken as already local to `tz`. Anything unparseable, including a bad `tz`,
/// falls back to the first ten characters (the date part).
pub fn format_timestamp(iso: &str, tz: &str) -> String {
    if iso.is_empty() {
        return String::new();
    }
    parse_timestamp(iso, tz).unwrap_or_else(|| iso.get(..10).unwrap_or(iso).to_string())
}

fn parse_timestamp(iso: &str, tz: &str) -> Option<String> {
    let offset = if tz.trim().is_empty() {
        None
    } else {
        Some(parse_offset(tz)?)
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        let shifted = match offset {
            Some(offset) => dt.with_timezone(&offset),
            None => dt,
        };
        return Some(shifted.format(DISPLAY_FORMAT).to_string());
    }

    let naive = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .ok()?;
    Some(naive.format(DISPLAY_FORMAT).to_string())
}

/// Parse `+09:00`, `-5`, `9`, `05:30` into a fixed offset.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let mut parts = tz.trim_start_matches(['+', '-']).split(':');
    let hours: i32 = parts.next()?.trim().parse().ok()?;
    let minutes: i32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
