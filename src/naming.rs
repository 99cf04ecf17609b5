//! File naming conventions for bundles and rendered documents.
//!
//! A bundle is `zips/{seriesId}/{serial}.zip`. Its rendered document, when one
//! has been built, is `output/{seriesId}/{prefix}{serial}.pdf`, where the prefix
//! comes from `archive.issue_prefix` (`TQ-` by default). The same prefix names
//! issues that carry no title of their own: `TQ-001`.

use std::cmp::Ordering;
use std::path::Path;

pub const BUNDLE_EXTENSION: &str = "zip";
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Serial of a bundle file (`001.zip` → `001`), `None` for anything that is not a bundle.
pub fn bundle_serial(path: &Path) -> Option<String> {
    let is_bundle = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(BUNDLE_EXTENSION));
    if !is_bundle {
        return None;
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
}

/// `TQ-001.pdf`
pub fn document_name(prefix: &str, serial: &str) -> String {
    format!("{prefix}{serial}.{DOCUMENT_EXTENSION}")
}

/// `TQ-001`, shown when an issue has no title.
pub fn fallback_title(prefix: &str, serial: &str) -> String {
    format!("{prefix}{serial}")
}

/// Order serials numerically when both are numbers, otherwise as text.
pub fn compare_serials(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

/// Join a base URL and path segments with single slashes.
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment.trim_matches('/'));
    }
    url
}
