//! Display labels for periods and counts.
//!
//! Pure functions of `(key, locale)`. Cycles render the same in every locale
//! (`2021–2040`, en dash); the other levels follow the locale's suffixes and
//! month table.

use crate::bucket::PeriodKey;
use crate::locale::{LabelStyle, Locale};

/// Label for one bucket key.
pub fn period_label(key: &PeriodKey, locale: &Locale) -> String {
    match *key {
        PeriodKey::Century(century) => century_label(century, locale),
        PeriodKey::Cycle { start, end } => format!("{start}\u{2013}{end}"),
        PeriodKey::Year(year) => format!("{year}{}", locale.year_suffix),
        PeriodKey::Month(month) => month_label(month, locale),
    }
}

/// `21世紀` or `21st century`, depending on the locale's label style.
pub fn century_label(century: i32, locale: &Locale) -> String {
    match locale.label_style {
        LabelStyle::Suffix => format!("{century}{}", locale.century_suffix),
        LabelStyle::Ordinal => format!(
            "{century}{}{}",
            ordinal_suffix(century),
            locale.century_suffix
        ),
    }
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th ... 11th, 12th, 13th ... 21st.
pub fn ordinal_suffix(n: i32) -> &'static str {
    let n = n.unsigned_abs();
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Month name from the locale table (1 = January).
///
/// Months outside 1–12 never reach the renderer; they fall back to the number.
pub fn month_label(month: u32, locale: &Locale) -> String {
    month
        .checked_sub(1)
        .and_then(|idx| locale.months.get(idx as usize))
        .cloned()
        .unwrap_or_else(|| month.to_string())
}

/// `"{count}{one}"` for a single item, `"{count}{other}"` for anything else.
pub fn count_label(count: usize, one: &str, other: &str) -> String {
    let word = if count == 1 { one } else { other };
    format!("{count}{word}")
}

/// Issue count shown on series cards and series pages.
pub fn issue_count_label(count: usize, locale: &Locale) -> String {
    count_label(count, &locale.issues_one, &locale.issues_other)
}

/// Item count shown in accordion headings.
pub fn item_count_label(count: usize, locale: &Locale) -> String {
    count_label(count, &locale.items_one, &locale.items_other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (10, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (20, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (101, "st"),
            (111, "th"),
            (112, "th"),
            (0, "th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal_suffix(n), expected, "{n}");
        }
    }

    #[test]
    fn english_century_uses_ordinal() {
        let en = Locale::english();
        assert_eq!(period_label(&PeriodKey::Century(21), &en), "21st century");
        assert_eq!(period_label(&PeriodKey::Century(20), &en), "20th century");
        assert_eq!(period_label(&PeriodKey::Century(12), &en), "12th century");
        assert_eq!(period_label(&PeriodKey::Century(22), &en), "22nd century");
    }

    #[test]
    fn japanese_century_uses_suffix() {
        let ja = Locale::japanese();
        assert_eq!(period_label(&PeriodKey::Century(21), &ja), "21世紀");
    }

    #[test]
    fn cycle_label_is_locale_independent() {
        let key = PeriodKey::Cycle {
            start: 2021,
            end: 2040,
        };
        assert_eq!(period_label(&key, &Locale::english()), "2021–2040");
        assert_eq!(period_label(&key, &Locale::japanese()), "2021–2040");
    }

    #[test]
    fn year_labels() {
        assert_eq!(period_label(&PeriodKey::Year(2024), &Locale::english()), "2024");
        assert_eq!(period_label(&PeriodKey::Year(2024), &Locale::japanese()), "2024年");
    }

    #[test]
    fn month_labels_come_from_table() {
        let en = Locale::english();
        assert_eq!(period_label(&PeriodKey::Month(1), &en), "Jan");
        assert_eq!(period_label(&PeriodKey::Month(12), &en), "Dec");
        assert_eq!(period_label(&PeriodKey::Month(11), &Locale::japanese()), "11月");
    }

    #[test]
    fn month_label_out_of_range_falls_back_to_number() {
        let en = Locale::english();
        assert_eq!(month_label(0, &en), "0");
        assert_eq!(month_label(13, &en), "13");
    }

    #[test]
    fn count_labels_pluralize() {
        let en = Locale::english();
        assert_eq!(issue_count_label(1, &en), "1 issue");
        assert_eq!(issue_count_label(0, &en), "0 issues");
        assert_eq!(issue_count_label(7, &en), "7 issues");
        assert_eq!(item_count_label(1, &en), "1 item");
        assert_eq!(item_count_label(2, &en), "2 items");
    }

    #[test]
    fn japanese_counts_use_counter_word() {
        let ja = Locale::japanese();
        assert_eq!(issue_count_label(1, &ja), "1件");
        assert_eq!(item_count_label(12, &ja), "12件");
    }
}
