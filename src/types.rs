//! Shared types passed from the scan stage to page generation.

use crate::bucket::{Dated, bucket_path};
use serde::Serialize;

/// One archived issue of a series, built from a bundle on disk.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Bundle file stem (`001` for `001.zip`).
    pub serial: String,
    /// Title from the bundle manifest; empty when the manifest has none.
    pub title: String,
    /// Creation time as `YYYY-MM-DD HH:MM`; empty when unknown.
    pub date: String,
    pub bundle_url: String,
    /// Link to the rendered PDF, only when it exists on disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub play_url: String,
}

impl Dated for Issue {
    fn date(&self) -> Option<&str> {
        Some(self.date.as_str()).filter(|d| !d.is_empty())
    }
}

/// A series and its issues, newest serial first.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub id: String,
    /// Catalog display name, or the id when the catalog has none.
    pub name: String,
    pub issues: Vec<Issue>,
}

impl Series {
    /// Index-page view of this series, dated by its newest issue.
    ///
    /// Only dates that can be bucketed count; a stray value such as `soon`
    /// never outranks a real date.
    pub fn summary(&self) -> SeriesSummary {
        let latest_date = self
            .issues
            .iter()
            .map(|issue| issue.date.as_str())
            .filter(|date| bucket_path(date).is_some())
            .max()
            .unwrap_or_default()
            .to_string();
        SeriesSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            issue_count: self.issues.len(),
            latest_date,
        }
    }
}

/// What the top-level index knows about a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub id: String,
    pub name: String,
    pub issue_count: usize,
    /// Date of the newest dated issue; empty when no issue has a date.
    pub latest_date: String,
}

impl Dated for SeriesSummary {
    fn date(&self) -> Option<&str> {
        Some(self.latest_date.as_str()).filter(|d| !d.is_empty())
    }
}
