//! Shared test utilities.
//!
//! Provides a fixture archive, lookup helpers over scanned [`Archive`] data,
//! and a minimal [`Dated`] item for exercising the grouping and selection code
//! without building full issues.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
//!
//! let alpha = find_series(&archive, "alpha");
//! assert_eq!(serials(alpha), vec!["003", "002", "001"]);
//!
//! let items = entries(&["2024-03-01", "2023-11-01"]);
//! assert_eq!(entry_ids(&select_recent(&items, 10)), vec!["e0", "e1"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::bucket::Dated;
use crate::scan::Archive;
use crate::types::{Issue, Series};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/archive/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/archive");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write an empty `zips/{series}/{serial}.zip`, plus its manifest sidecar when given.
pub fn write_bundle(root: &Path, series: &str, serial: &str, manifest: Option<&str>) {
    let dir = root.join("zips").join(series);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{serial}.zip")), b"").unwrap();
    if let Some(json) = manifest {
        fs::write(dir.join(format!("{serial}.json")), json).unwrap();
    }
}

// =========================================================================
// Archive lookups, panicking with a clear message on miss
// =========================================================================

/// Find a series by id. Panics if not found.
pub fn find_series<'a>(archive: &'a Archive, id: &str) -> &'a Series {
    archive
        .series
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| {
            let ids = series_ids(archive);
            panic!("series '{id}' not found. Available: {ids:?}")
        })
}

/// Find an issue by serial within a series. Panics if not found.
pub fn find_issue<'a>(series: &'a Series, serial: &str) -> &'a Issue {
    series
        .issues
        .iter()
        .find(|i| i.serial == serial)
        .unwrap_or_else(|| {
            let found = serials(series);
            panic!(
                "issue '{serial}' not found in series '{}'. Available: {found:?}",
                series.id
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All series ids in archive order.
pub fn series_ids(archive: &Archive) -> Vec<&str> {
    archive.series.iter().map(|s| s.id.as_str()).collect()
}

/// All issue serials in series order.
pub fn serials(series: &Series) -> Vec<&str> {
    series.issues.iter().map(|i| i.serial.as_str()).collect()
}

// =========================================================================
// Dated stand-ins
// =========================================================================

/// A bare dated item, identified by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: &'static str,
    pub date: Option<&'static str>,
}

impl Dated for Entry {
    fn date(&self) -> Option<&str> {
        self.date
    }
}

const IDS: [&str; 20] = [
    "e0", "e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9", "e10", "e11", "e12", "e13",
    "e14", "e15", "e16", "e17", "e18", "e19",
];

/// One entry per date, with ids `e0`, `e1`, ... in input order.
pub fn entries(dates: &[&'static str]) -> Vec<Entry> {
    assert!(dates.len() <= IDS.len(), "at most {} entries", IDS.len());
    dates
        .iter()
        .copied()
        .zip(IDS)
        .map(|(date, id)| Entry {
            id,
            date: Some(date),
        })
        .collect()
}

/// Ids of entries, in order.
pub fn entry_ids(items: &[&Entry]) -> Vec<&'static str> {
    items.iter().map(|e| e.id).collect()
}
