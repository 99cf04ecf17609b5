//! # Newsletter Index
//!
//! A static index generator for archived newsletter series. The archive
//! directory is the data source: each directory of bundles is a series, each
//! bundle an issue. The output is a set of plain HTML pages, one family per
//! language, listing the newest entries first and the full history grouped
//! into a collapsible timeline.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      archive/  →  Archive     (bundles + manifests + catalog → dated issues)
//! 2. Generate  Archive   →  site/       (per locale: series index + one page per series)
//! ```
//!
//! Between the stages sits a pure core that never touches the filesystem and
//! never fails:
//!
//! ```text
//! dated items ──► bucket ──► BucketTree ──► render ──► accordion markup
//!            └──► recent ──► newest N
//!                          label ──► "21st century", "2021–2040", "Mar", "3 items"
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`bucket`] | Groups dated items into century → 20-year cycle → year → month, newest first |
//! | [`recent`] | Selects the newest N items, undated last, stable for ties |
//! | [`label`] | Locale-aware labels for periods and counts |
//! | [`render`] | Turns a bucket tree into accordion groups and nested markup |
//! | [`generate`] | Stage 2: assembles and writes the HTML pages using Maud |
//! | [`scan`] | Stage 1: walks the bundles directory and builds the [`scan::Archive`] |
//! | [`catalog`] | Loads `series.json` display names |
//! | [`metadata`] | Bundle manifests: title resolution and timestamp display |
//! | [`naming`] | Bundle and document file naming, URL joining |
//! | [`config`] | `config.toml` loading, stock defaults, merging and validation |
//! | [`locale`] | Per-language strings and labelling rules |
//! | [`types`] | Issue, series and series summary records |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Renewal Cycles
//!
//! Between century and year sits a fixed 20-year cycle aligned to the start of
//! the century: 2001–2020, 2021–2040, and so on. An archive meant to span
//! generations gets a middle level that keeps each century browsable without
//! listing up to a hundred years at once.
//!
//! ## Collapsed Full Listings
//!
//! Every page opens with a short "recent" list, so the full timeline below it
//! starts fully collapsed. The grouping code still computes the
//! newest-first open state ([`render::render_groups`] with
//! `force_collapsed = false`) for embedders that show the timeline alone.
//!
//! ## Locales As Values
//!
//! All user-facing strings and labelling rules live in a [`locale::Locale`]
//! passed down explicitly. Adding a language is a `[locales.xx]` table in
//! `config.toml`, not a code change.
//!
//! ## Deterministic Output
//!
//! Series are sorted by id and issues by serial, newest first, before anything
//! is grouped. Identical archives produce byte-identical pages.

pub mod bucket;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod label;
pub mod locale;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod recent;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
