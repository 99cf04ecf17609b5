//! Archive scanning.
//!
//! Stage 1 of the build. Walks the bundles directory, reads each bundle's
//! manifest, checks for a rendered document, and produces an [`Archive`] the
//! generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! archive/
//! ├── config.toml                # Optional, see crate::config
//! ├── series.json                # Catalog: display names
//! ├── zips/
//! │   ├── alpha/                 # One directory per series
//! │   │   ├── 001.zip            # Bundle (opaque)
//! │   │   ├── 001.json           # Its manifest, extracted
//! │   │   └── 002.zip
//! │   └── beta/
//! │       └── 001.zip
//! └── output/
//!     └── alpha/
//!         └── TQ-001.pdf         # Rendered document (optional)
//! ```
//!
//! ## Tolerance
//!
//! Per-issue problems never abort the scan. A manifest that cannot be read or
//! parsed leaves the issue with an empty title and date and adds a
//! [`ScanWarning`]. Undated issues are still listed in the "recent" section
//! (last) but left out of the time-grouped listing. Only archive-level failures
//! are errors: an unreadable catalog, or a bundles directory that cannot be
//! listed.
//!
//! ## Ordering
//!
//! Series are sorted by id. Issues are sorted by serial, newest first; this is
//! also the order they keep inside a month of the time-grouped listing.

use crate::catalog::{self, Catalog};
use crate::config::SiteConfig;
use crate::metadata::{ManifestReader, SidecarManifest};
use crate::naming;
use crate::types::{Issue, Series};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    #[error("Cannot list bundles: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Everything the generate stage needs, in publication order.
#[derive(Debug, Default, Serialize)]
pub struct Archive {
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

/// A per-issue problem that was skipped over.
#[derive(Debug, Clone, Serialize)]
pub struct ScanWarning {
    /// Path relative to the archive root.
    pub path: PathBuf,
    pub message: String,
}

impl Archive {
    pub fn issue_count(&self) -> usize {
        self.series.iter().map(|s| s.issues.len()).sum()
    }

    /// Issues whose rendered document has not been built yet, by series.
    pub fn pending_documents(&self) -> Vec<(&Series, &Issue)> {
        self.series
            .iter()
            .flat_map(|series| {
                series
                    .issues
                    .iter()
                    .filter(|issue| issue.document_url.is_none())
                    .map(move |issue| (series, issue))
            })
            .collect()
    }
}

/// Scan the archive at `root`, reading manifests from sidecar files.
pub fn scan(root: &Path, config: &SiteConfig) -> Result<Archive, ScanError> {
    scan_with(root, config, &SidecarManifest)
}

/// Scan the archive at `root` with a custom manifest source.
pub fn scan_with(
    root: &Path,
    config: &SiteConfig,
    reader: &dyn ManifestReader,
) -> Result<Archive, ScanError> {
    let catalog = catalog::load_catalog(&root.join(&config.archive.catalog))?;

    let bundles_dir = root.join(&config.archive.bundles_dir);
    let mut archive = Archive::default();
    if !bundles_dir.is_dir() {
        return Ok(archive);
    }

    for entry in sorted_children(&bundles_dir) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let series_id = entry.file_name().to_string_lossy().to_string();
        let series = scan_series(
            root,
            entry.path(),
            &series_id,
            &catalog,
            config,
            reader,
            &mut archive.warnings,
        )?;
        if !series.issues.is_empty() {
            archive.series.push(series);
        }
    }

    Ok(archive)
}

fn sorted_children(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

fn scan_series(
    root: &Path,
    series_dir: &Path,
    series_id: &str,
    catalog: &Catalog,
    config: &SiteConfig,
    reader: &dyn ManifestReader,
    warnings: &mut Vec<ScanWarning>,
) -> Result<Series, ScanError> {
    let mut issues = Vec::new();
    for entry in sorted_children(series_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(serial) = naming::bundle_serial(entry.path()) else {
            continue;
        };
        issues.push(build_issue(
            root,
            entry.path(),
            series_id,
            serial,
            config,
            reader,
            warnings,
        ));
    }

    issues.sort_by(|a, b| naming::compare_serials(&b.serial, &a.serial));

    Ok(Series {
        id: series_id.to_string(),
        name: catalog.display_name(series_id).to_string(),
        issues,
    })
}

fn build_issue(
    root: &Path,
    bundle: &Path,
    series_id: &str,
    serial: String,
    config: &SiteConfig,
    reader: &dyn ManifestReader,
    warnings: &mut Vec<ScanWarning>,
) -> Issue {
    let manifest = match reader.read_manifest(bundle) {
        Ok(manifest) => manifest.unwrap_or_default(),
        Err(e) => {
            warnings.push(ScanWarning {
                path: relative_to(bundle, root),
                message: e.to_string(),
            });
            Default::default()
        }
    };

    let archive = &config.archive;
    let links = &config.links;
    let bundle_name = bundle
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let document_name = naming::document_name(&archive.issue_prefix, &serial);
    let has_document = root
        .join(&archive.documents_dir)
        .join(series_id)
        .join(&document_name)
        .is_file();

    let bundle_url = naming::join_url(
        &links.pages_base,
        &[&archive.bundles_dir, series_id, &bundle_name],
    );
    let document_url = has_document.then(|| {
        naming::join_url(
            &links.pages_base,
            &[&archive.documents_dir, series_id, &document_name],
        )
    });
    let play_url = match &document_url {
        Some(pdf) => format!("{}?zip={}&pdf={}", links.player, bundle_url, pdf),
        None => format!("{}?zip={}", links.player, bundle_url),
    };

    Issue {
        title: manifest.resolved_title().unwrap_or_default(),
        date: manifest.display_date(),
        serial,
        bundle_url,
        document_url,
        play_url,
    }
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{BundleManifest, ManifestError};
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_series_with_bundles() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(series_ids(&archive), vec!["alpha", "beta"]);
        assert_eq!(archive.issue_count(), 4);
    }

    #[test]
    fn series_without_bundles_is_dropped() {
        let tmp = setup_fixtures();
        assert!(tmp.path().join("zips/gamma").is_dir());
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(!series_ids(&archive).contains(&"gamma"));
    }

    #[test]
    fn names_from_catalog_with_id_fallback() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(find_series(&archive, "alpha").name, "Morning Letters");
        assert_eq!(find_series(&archive, "beta").name, "beta");
    }

    #[test]
    fn issues_sorted_by_serial_descending() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(
            serials(find_series(&archive, "alpha")),
            vec!["003", "002", "001"]
        );
    }

    #[test]
    fn serials_sort_numerically() {
        let tmp = TempDir::new().unwrap();
        for serial in ["9", "10", "100"] {
            write_bundle(tmp.path(), "s", serial, None);
        }
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(serials(&archive.series[0]), vec!["100", "10", "9"]);
    }

    #[test]
    fn manifest_title_and_local_date() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let alpha = find_series(&archive, "alpha");

        let first = find_issue(alpha, "001");
        assert_eq!(first.title, "First light");
        assert_eq!(first.date, "2023-11-01 10:00");

        let second = find_issue(alpha, "002");
        assert_eq!(second.title, "Second");
        assert_eq!(second.date, "2024-03-01 12:00");
    }

    #[test]
    fn broken_manifest_degrades_with_warning() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let broken = find_issue(find_series(&archive, "alpha"), "003");
        assert_eq!(broken.title, "");
        assert_eq!(broken.date, "");

        assert_eq!(archive.warnings.len(), 1);
        assert_eq!(archive.warnings[0].path, Path::new("zips/alpha/003.zip"));
    }

    #[test]
    fn bundle_without_manifest_has_no_warning() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "s", "001", None);
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(archive.warnings.is_empty());
        assert_eq!(archive.series[0].issues[0].date, "");
    }

    #[test]
    fn document_link_only_when_pdf_exists() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let alpha = find_series(&archive, "alpha");

        let with_pdf = find_issue(alpha, "001");
        assert_eq!(
            with_pdf.document_url.as_deref(),
            Some("https://tokistorage.github.io/newsletter-master/output/alpha/TQ-001.pdf")
        );
        assert_eq!(
            with_pdf.play_url,
            "https://tokistorage.github.io/qr/play.html\
             ?zip=https://tokistorage.github.io/newsletter-master/zips/alpha/001.zip\
             &pdf=https://tokistorage.github.io/newsletter-master/output/alpha/TQ-001.pdf"
        );

        let without_pdf = find_issue(alpha, "002");
        assert_eq!(without_pdf.document_url, None);
        assert_eq!(
            without_pdf.play_url,
            "https://tokistorage.github.io/qr/play.html\
             ?zip=https://tokistorage.github.io/newsletter-master/zips/alpha/002.zip"
        );
    }

    #[test]
    fn urls_follow_config() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "s", "001", None);
        let mut config = SiteConfig::default();
        config.links.pages_base = "https://example.org/news/".into();
        config.links.player = "https://example.org/play".into();
        let archive = scan(tmp.path(), &config).unwrap();
        let issue = &archive.series[0].issues[0];
        assert_eq!(issue.bundle_url, "https://example.org/news/zips/s/001.zip");
        assert_eq!(
            issue.play_url,
            "https://example.org/play?zip=https://example.org/news/zips/s/001.zip"
        );
    }

    #[test]
    fn pending_documents_lists_missing_pdfs() {
        let tmp = setup_fixtures();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        let pending: Vec<(&str, &str)> = archive
            .pending_documents()
            .into_iter()
            .map(|(s, i)| (s.id.as_str(), i.serial.as_str()))
            .collect();
        assert_eq!(
            pending,
            vec![("alpha", "003"), ("alpha", "002"), ("beta", "001")]
        );
    }

    #[test]
    fn missing_bundles_dir_is_empty_archive() {
        let tmp = TempDir::new().unwrap();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert!(archive.series.is_empty());
        assert_eq!(archive.issue_count(), 0);
    }

    #[test]
    fn invalid_catalog_is_fatal() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("series.json"), "[[[").unwrap();
        assert!(matches!(
            scan(tmp.path(), &SiteConfig::default()),
            Err(ScanError::Catalog(_))
        ));
    }

    #[test]
    fn non_bundle_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "s", "001", None);
        fs::write(tmp.path().join("zips/s/notes.txt"), "x").unwrap();
        fs::write(tmp.path().join("zips/stray.zip"), "").unwrap();
        let archive = scan(tmp.path(), &SiteConfig::default()).unwrap();
        assert_eq!(archive.series.len(), 1);
        assert_eq!(serials(&archive.series[0]), vec!["001"]);
    }

    struct FixedReader;

    impl ManifestReader for FixedReader {
        fn read_manifest(&self, bundle: &Path) -> Result<Option<BundleManifest>, ManifestError> {
            if bundle.ends_with("002.zip") {
                return Err(ManifestError::Io(
                    bundle.to_path_buf(),
                    std::io::Error::other("corrupt archive"),
                ));
            }
            Ok(Some(BundleManifest {
                title: Some("From reader".into()),
                created_at: Some("2030-06-01T00:00:00Z".into()),
                ..Default::default()
            }))
        }
    }

    #[test]
    fn custom_manifest_reader() {
        let tmp = TempDir::new().unwrap();
        write_bundle(tmp.path(), "s", "001", None);
        write_bundle(tmp.path(), "s", "002", None);
        let archive = scan_with(tmp.path(), &SiteConfig::default(), &FixedReader).unwrap();
        let series = &archive.series[0];
        assert_eq!(find_issue(series, "001").title, "From reader");
        assert_eq!(find_issue(series, "001").date, "2030-06-01 00:00");
        assert_eq!(find_issue(series, "002").title, "");
        assert_eq!(archive.warnings.len(), 1);
        assert!(archive.warnings[0].message.contains("corrupt archive"));
    }
}
