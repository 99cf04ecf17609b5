//! Locale tables for the generated pages.
//!
//! A [`Locale`] is an immutable bundle of every user-visible string one
//! language needs: page copy, navigation labels, count words, and the period
//! label rules used by [`crate::label`]. Locales are loaded once as part of
//! [`crate::config::SiteConfig`] and passed by reference to the renderers.
//!
//! Two locales ship as stock defaults, Japanese (`index.html`) and English
//! (`index-en.html`). Either can be partially overridden in `config.toml`, and
//! further locales can be added as complete `[locales.<code>]` tables.

use serde::{Deserialize, Serialize};

/// How century labels are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Number followed directly by `century_suffix`: `21世紀`.
    Suffix,
    /// Number, English ordinal, then `century_suffix`: `21st century`.
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Locale {
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    /// Output file name for this locale's pages (`index.html`, `index-en.html`).
    pub filename: String,

    pub label_style: LabelStyle,
    pub century_suffix: String,
    /// Appended to year labels; empty renders the bare number.
    pub year_suffix: String,
    /// Month names, January first.
    pub months: [String; 12],

    /// Issue count words: `"{n}{issues_one}"` for one, `"{n}{issues_other}"` otherwise.
    pub issues_one: String,
    pub issues_other: String,
    /// Accordion heading count words, same rule as the issue counts.
    pub items_one: String,
    pub items_other: String,

    pub title: String,
    pub heading: String,
    /// Lead paragraph lines under the index heading.
    pub subtitle: Vec<String>,
    pub empty: String,
    pub play: String,
    pub latest: String,
    pub mission: String,

    pub nav_logo: String,
    pub nav_newsletter: String,
    pub nav_newsletter_url: String,
    pub nav_series: String,
    pub nav_toggle_label: String,
    pub lang_switch_label: String,
    pub lang_switch_url: String,

    pub recent_series: String,
    pub recent_issues: String,
    pub all_series: String,
    pub all_issues: String,
}

fn strings<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(String::from)
}

impl Locale {
    pub fn japanese() -> Self {
        Self {
            lang: "ja".into(),
            filename: "index.html".into(),
            label_style: LabelStyle::Suffix,
            century_suffix: "世紀".into(),
            year_suffix: "年".into(),
            months: strings([
                "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月",
                "12月",
            ]),
            issues_one: "件".into(),
            issues_other: "件".into(),
            items_one: "件".into(),
            items_other: "件".into(),
            title: "別冊特集シリーズ | トキストレージ".into(),
            heading: "別冊特集シリーズ".into(),
            subtitle: vec![
                "TokiQR特集権を購入されたお客様ごとに開設される別冊特集ニュースレター。".into(),
                "各シリーズは独立した逐次刊行物として国立国会図書館に納本されます。".into(),
            ],
            empty: "現在開設されている別冊特集シリーズはありません。".into(),
            play: "▶ 再生".into(),
            latest: "最新".into(),
            mission: "あなたが物語となり、世代の対話が重なり、未来の道となる。".into(),
            nav_logo: "トキストレージ".into(),
            nav_newsletter: "ニュースレター本誌".into(),
            nav_newsletter_url: "https://tokistorage.github.io/lp/newsletters.html".into(),
            nav_series: "シリーズ一覧".into(),
            nav_toggle_label: "メニュー".into(),
            lang_switch_label: "EN".into(),
            lang_switch_url: "index-en.html".into(),
            recent_series: "最新のシリーズ".into(),
            recent_issues: "最新の号".into(),
            all_series: "すべてのシリーズ".into(),
            all_issues: "すべての号".into(),
        }
    }

    pub fn english() -> Self {
        Self {
            lang: "en".into(),
            filename: "index-en.html".into(),
            label_style: LabelStyle::Ordinal,
            century_suffix: " century".into(),
            year_suffix: String::new(),
            months: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            issues_one: " issue".into(),
            issues_other: " issues".into(),
            items_one: " item".into(),
            items_other: " items".into(),
            title: "Special Feature Series | TokiStorage".into(),
            heading: "Special Feature Series".into(),
            subtitle: vec![
                "Dedicated newsletter series created for each TokiQR Series Rights holder.".into(),
                "Each series is deposited as an independent serial publication with Japan's National Diet Library.".into(),
            ],
            empty: "No special feature series have been opened yet.".into(),
            play: "▶ Play".into(),
            latest: "Latest".into(),
            mission: "You become a story, generations connect in dialogue, the path forward."
                .into(),
            nav_logo: "TokiStorage".into(),
            nav_newsletter: "Newsletter".into(),
            nav_newsletter_url: "https://tokistorage.github.io/lp/newsletters-en.html".into(),
            nav_series: "Series List".into(),
            nav_toggle_label: "Menu".into(),
            lang_switch_label: "JA".into(),
            lang_switch_url: "index.html".into(),
            recent_series: "Recent Series".into(),
            recent_issues: "Recent Issues".into(),
            all_series: "All Series".into(),
            all_issues: "All Issues".into(),
        }
    }
}
