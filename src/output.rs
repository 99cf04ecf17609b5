//! CLI output formatting for all commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (series, issue, page) is its semantic identity: positional
//! index and name. Filesystem paths are secondary context on indented
//! `Source:` lines, so the output reads as an archive inventory while still
//! letting users trace data back to specific files.
//!
//! # Entity Display Contract
//!
//! 1. **Header line**: positional index + name (+ optional issue count)
//! 2. **Context lines**: indented `Source:`, `Date:`, `Document:`
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Series
//! 001 Morning Letters (3 issues)
//!     Source: zips/alpha/
//!     001 (TQ-003)
//!         Source: 003.zip
//!     002 Second
//!         Source: 002.zip
//!         Date: 2024-03-01 12:00
//!     003 First light
//!         Source: 001.zip
//!         Date: 2023-11-01 10:00
//!         Document: TQ-001.pdf
//!
//! Warning: zips/alpha/003.zip: invalid manifest ...
//! Found 2 series, 4 issues, 1 warning
//! ```
//!
//! ## Pending
//!
//! ```text
//! 001 Morning Letters
//!     003 → output/alpha/TQ-003.pdf
//! 3 documents pending
//! ```
//!
//! ## Generate
//!
//! ```text
//! Index (ja) → index.html
//! Index (en) → index-en.html
//! 001 Morning Letters (3 issues)
//!     ja → series/alpha/index.html
//!     en → series/alpha/index-en.html
//! Generated 2 index pages, 4 series pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::SiteConfig;
use crate::generate::{GenerateReport, SERIES_DIR};
use crate::naming;
use crate::scan::Archive;
use crate::types::Issue;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 issue`, `2 issues`
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Format an entity header: positional index + name, with optional issue count.
///
/// ```text
/// 001 Morning Letters (3 issues)
/// 001 Morning Letters
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({})", format_index(index), name, plural(n, "issue")),
        None => format!("{} {}", format_index(index), name),
    }
}

/// Format an issue line: titled issues show their title, untitled ones the
/// fallback name in parens.
///
/// ```text
/// 001 First light     // titled
/// 001 (TQ-003)        // untitled
/// ```
fn issue_line(index: usize, issue: &Issue, prefix: &str) -> String {
    if issue.title.is_empty() {
        format!(
            "{} ({})",
            format_index(index),
            naming::fallback_title(prefix, &issue.serial)
        )
    } else {
        format!("{} {}", format_index(index), issue.title)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan output
// ============================================================================

/// Format scan output: every series and issue, then warnings and a summary.
pub fn format_scan_output(archive: &Archive, config: &SiteConfig) -> Vec<String> {
    let prefix = &config.archive.issue_prefix;
    let mut lines = vec!["Series".to_string()];

    for (s_idx, series) in archive.series.iter().enumerate() {
        lines.push(entity_header(
            s_idx + 1,
            &series.name,
            Some(series.issues.len()),
        ));
        lines.push(format!(
            "{}Source: {}/{}/",
            indent(1),
            config.archive.bundles_dir,
            series.id
        ));

        for (i_idx, issue) in series.issues.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), issue_line(i_idx + 1, issue, prefix)));
            lines.push(format!(
                "{}Source: {}.{}",
                indent(2),
                issue.serial,
                naming::BUNDLE_EXTENSION
            ));
            if !issue.date.is_empty() {
                lines.push(format!("{}Date: {}", indent(2), issue.date));
            }
            if issue.document_url.is_some() {
                lines.push(format!(
                    "{}Document: {}",
                    indent(2),
                    naming::document_name(prefix, &issue.serial)
                ));
            }
        }
    }

    if !archive.warnings.is_empty() {
        lines.push(String::new());
        lines.extend(format_warnings(archive));
    }
    lines.push(format_summary(archive));
    lines
}

/// `Warning: {path}: {message}` for every scan warning.
pub fn format_warnings(archive: &Archive) -> Vec<String> {
    archive
        .warnings
        .iter()
        .map(|w| format!("Warning: {}: {}", w.path.display(), w.message))
        .collect()
}

/// One-line archive summary.
pub fn format_summary(archive: &Archive) -> String {
    let mut summary = format!(
        "Found {} series, {}",
        archive.series.len(),
        plural(archive.issue_count(), "issue")
    );
    if !archive.warnings.is_empty() {
        summary.push_str(&format!(", {}", plural(archive.warnings.len(), "warning")));
    }
    summary
}

pub fn print_scan_output(archive: &Archive, config: &SiteConfig) {
    print_lines(format_scan_output(archive, config));
}

// ============================================================================
// Pending output
// ============================================================================

/// Format the issues whose rendered document is missing, grouped by series.
pub fn format_pending_output(archive: &Archive, config: &SiteConfig) -> Vec<String> {
    let pending = archive.pending_documents();
    if pending.is_empty() {
        return vec!["All documents built".to_string()];
    }

    let mut lines = Vec::new();
    let mut current: Option<&str> = None;
    let mut position = 0;
    for (series, issue) in &pending {
        if current != Some(series.id.as_str()) {
            position += 1;
            current = Some(series.id.as_str());
            lines.push(entity_header(position, &series.name, None));
        }
        let target = Path::new(&config.archive.documents_dir)
            .join(&series.id)
            .join(naming::document_name(&config.archive.issue_prefix, &issue.serial));
        lines.push(format!(
            "{}{} \u{2192} {}",
            indent(1),
            issue.serial,
            target.display()
        ));
    }
    let noun = if pending.len() == 1 {
        "document"
    } else {
        "documents"
    };
    lines.push(format!("{} {} pending", pending.len(), noun));
    lines
}

pub fn print_pending_output(archive: &Archive, config: &SiteConfig) {
    print_lines(format_pending_output(archive, config));
}

// ============================================================================
// Generate output
// ============================================================================

/// Format generate output: index pages first, then series pages by series.
///
/// Information-first: each series leads with its position and name, followed
/// by one `lang → path` line per locale.
pub fn format_generate_output(report: &GenerateReport, archive: &Archive) -> Vec<String> {
    let mut lines = Vec::new();

    for page in report.pages.iter().filter(|p| !p.path.starts_with(SERIES_DIR)) {
        lines.push(format!(
            "Index ({}) \u{2192} {}",
            page.lang,
            page.path.display()
        ));
    }

    for (idx, series) in archive.series.iter().enumerate() {
        let series_dir = Path::new(SERIES_DIR).join(&series.id);
        let pages: Vec<_> = report
            .pages
            .iter()
            .filter(|p| p.path.parent() == Some(series_dir.as_path()))
            .collect();
        if pages.is_empty() {
            continue;
        }
        lines.push(entity_header(idx + 1, &series.name, Some(series.issues.len())));
        for page in pages {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                page.lang,
                page.path.display()
            ));
        }
    }

    let series_pages = report.series_pages();
    let index_pages = report.pages.len() - series_pages;
    lines.push(format!(
        "Generated {} index {}, {} series {}",
        index_pages,
        if index_pages == 1 { "page" } else { "pages" },
        series_pages,
        if series_pages == 1 { "page" } else { "pages" },
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, archive: &Archive) {
    print_lines(format_generate_output(report, archive));
}

// ============================================================================
// Tests
// ============================================================================
