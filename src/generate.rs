//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scanned [`Archive`] and writes the static
//! index pages, once per configured locale.
//!
//! ## Generated Pages
//!
//! - **Series index** (`/{filename}`): a "recent series" list (newest first,
//!   capped at `listing.recent_limit`) and an "all series" accordion grouped by
//!   each series' latest issue date
//! - **Series pages** (`/series/{id}/{filename}`): a "recent issues" list and
//!   an "all issues" accordion grouped by issue date
//!
//! `{filename}` comes from the locale: `index.html` and `index-en.html` with
//! the stock locales. Pages link to their counterpart in the other language by
//! the same relative name, so a series page switches to the same series.
//!
//! ## Output Structure
//!
//! ```text
//! site/
//! ├── index.html                 # Series index, ja
//! ├── index-en.html              # Series index, en
//! └── series/
//!     ├── alpha/
//!     │   ├── index.html         # Series page, ja
//!     │   └── index-en.html      # Series page, en
//!     └── beta/
//!         └── ...
//! ```
//!
//! ## Accordions
//!
//! Full listings are always rendered collapsed; the recent lists above them
//! cover the newest entries. Undated entries appear in the recent lists (last)
//! but not in the accordions.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: page and accordion styles
//! - `static/accordion.js`: accordion toggling and the mobile nav menu

use crate::bucket::BucketTree;
use crate::config::{LinksConfig, SiteConfig};
use crate::label::issue_count_label;
use crate::locale::Locale;
use crate::naming;
use crate::recent::select_recent;
use crate::render::{accordion, render_groups};
use crate::scan::Archive;
use crate::types::{Issue, Series, SeriesSummary};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error writing {0}: {1}")]
    Io(PathBuf, std::io::Error),
}

/// What a generate run wrote.
#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPage {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub lang: String,
    /// Series or issues listed on the page.
    pub entries: usize,
}

impl GenerateReport {
    pub fn series_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.path.starts_with("series"))
            .count()
    }
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/accordion.js");

pub const SERIES_DIR: &str = "series";

pub fn generate(
    archive: &Archive,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    let summaries: Vec<SeriesSummary> = archive.series.iter().map(Series::summary).collect();

    for locale in config.locales.values() {
        let page = render_index(&summaries, config, locale);
        let path = PathBuf::from(&locale.filename);
        write_page(output_dir, &path, page)?;
        report.pages.push(GeneratedPage {
            path,
            lang: locale.lang.clone(),
            entries: summaries.len(),
        });
    }

    for series in &archive.series {
        for locale in config.locales.values() {
            let page = render_series_page(series, config, locale);
            let path = Path::new(SERIES_DIR)
                .join(&series.id)
                .join(&locale.filename);
            write_page(output_dir, &path, page)?;
            report.pages.push(GeneratedPage {
                path,
                lang: locale.lang.clone(),
                entries: series.issues.len(),
            });
        }
    }

    Ok(report)
}

fn write_page(output_dir: &Path, relative: &Path, page: Markup) -> Result<(), GenerateError> {
    let path = output_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| GenerateError::Io(parent.to_path_buf(), e))?;
    }
    fs::write(&path, page.into_string()).map_err(|e| GenerateError::Io(path.clone(), e))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, locale: &Locale, links: &LinksConfig, content: Markup) -> Markup {
    let asset = |name: &str| naming::join_url(&links.site_base, &["asset", name]);
    html! {
        (DOCTYPE)
        html lang=(locale.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="icon" type="image/png" sizes="32x32" href=(asset("favicon-32.png"));
                link rel="apple-touch-icon" sizes="180x180" href=(asset("apple-touch-icon.png"));
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                (site_footer(locale, links))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the fixed top navigation bar.
///
/// `series_list` is the relative link back to the series index, shown on
/// series pages only.
fn site_nav(locale: &Locale, links: &LinksConfig, series_list: Option<&str>) -> Markup {
    html! {
        nav.site-nav {
            a.nav-logo href={ (links.site_base.trim_end_matches('/')) "/" } { (locale.nav_logo) }
            div.nav-links {
                a href=(locale.nav_newsletter_url) { (locale.nav_newsletter) }
                @if let Some(href) = series_list {
                    a href=(href) { (locale.nav_series) }
                }
                a.lang-switch href=(locale.lang_switch_url) aria-label=(locale.lang_switch_label) {
                    (locale.lang_switch_label)
                }
            }
            button.nav-toggle type="button" aria-label=(locale.nav_toggle_label) {
                span {} span {} span {}
            }
        }
    }
}

fn site_footer(locale: &Locale, links: &LinksConfig) -> Markup {
    html! {
        footer.page-footer {
            p.mission { (locale.mission) }
            p.copyright {
                "© " (links.copyright_year) " "
                a href={ (links.site_base.trim_end_matches('/')) "/" } { (links.site_name) }
                ". All rights reserved."
            }
        }
    }
}

fn section_heading(text: &str, divider: bool) -> Markup {
    html! {
        h2.section-heading.section-divider[divider] { (text) }
    }
}

/// Renders one series card for the index page
fn series_card(summary: &SeriesSummary, locale: &Locale) -> Markup {
    html! {
        div.series-card {
            a href={ (SERIES_DIR) "/" (summary.id) "/" (locale.filename) } {
                h3 { (summary.name) }
                p.series-count {
                    (issue_count_label(summary.issue_count, locale))
                    @if !summary.latest_date.is_empty() {
                        " "
                        span.series-latest { "(" (locale.latest) ": " (summary.latest_date) ")" }
                    }
                }
            }
        }
    }
}

/// Renders one issue row with its links
fn issue_row(issue: &Issue, locale: &Locale, issue_prefix: &str) -> Markup {
    let title = if issue.title.is_empty() {
        naming::fallback_title(issue_prefix, &issue.serial)
    } else {
        issue.title.clone()
    };
    html! {
        div.issue {
            div.issue-info {
                span.issue-title { (title) }
                span.issue-date { (issue.date) }
            }
            div.issue-links {
                a.link.play href=(issue.play_url) { (locale.play) }
                a.link.zip href=(issue.bundle_url) { "ZIP" }
                @if let Some(pdf) = &issue.document_url {
                    a.link.pdf href=(pdf) { "PDF" }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the series index page
fn render_index(summaries: &[SeriesSummary], config: &SiteConfig, locale: &Locale) -> Markup {
    let body = if summaries.is_empty() {
        html! { p.empty { (locale.empty) } }
    } else {
        let recent = select_recent(summaries, config.listing.recent_limit);
        let tree = BucketTree::build(summaries);
        let groups = render_groups(&tree, series_card, locale, true);
        html! {
            (section_heading(&locale.recent_series, false))
            @for summary in recent {
                (series_card(summary, locale))
            }
            (section_heading(&locale.all_series, true))
            (accordion(&groups, locale))
        }
    };

    let content = html! {
        (site_nav(locale, &config.links, None))
        main.page {
            header.page-title {
                h1 { (locale.heading) }
                p.lead {
                    @for (idx, line) in locale.subtitle.iter().enumerate() {
                        @if idx > 0 { br; }
                        (line)
                    }
                }
            }
            (body)
        }
    };

    base_document(&locale.title, locale, &config.links, content)
}

/// Renders one series' page with its issue listings
fn render_series_page(series: &Series, config: &SiteConfig, locale: &Locale) -> Markup {
    let prefix = config.archive.issue_prefix.as_str();
    let row = |issue: &Issue, locale: &Locale| issue_row(issue, locale, prefix);

    let recent = select_recent(&series.issues, config.listing.recent_limit);
    let tree = BucketTree::build(&series.issues);
    let groups = render_groups(&tree, row, locale, true);
    let series_list = format!("../../{}", locale.filename);

    let content = html! {
        (site_nav(locale, &config.links, Some(&series_list)))
        main.page {
            header.page-title {
                h1 { (series.name) }
            }
            div.series-card {
                h3 { (series.name) }
                p.series-count { (issue_count_label(series.issues.len(), locale)) }
                (section_heading(&locale.recent_issues, false))
                @for issue in recent {
                    (row(issue, locale))
                }
                (section_heading(&locale.all_issues, true))
                (accordion(&groups, locale))
            }
        }
    };

    let title = format!("{} | {}", series.name, locale.title);
    base_document(&title, locale, &config.links, content)
}

// ============================================================================
// Tests
// ============================================================================
