//! "Most recent N" selection.
//!
//! Independent of the bucket tree: items are ranked by their raw date string,
//! descending. Lexicographic comparison is enough because dates are fixed-width
//! and zero-padded (`YYYY-MM-DD HH:MM`). Undated items rank as the empty string,
//! so they land after every dated item instead of being dropped.

use crate::bucket::Dated;

/// Up to `limit` items, newest first. Items with equal dates keep their input order.
pub fn select_recent<T: Dated>(items: &[T], limit: usize) -> Vec<&T> {
    let mut ranked: Vec<&T> = items.iter().collect();
    // `sort_by` is stable, which is what keeps ties in input order
    ranked.sort_by(|a, b| sort_key(*b).cmp(sort_key(*a)));
    ranked.truncate(limit);
    ranked
}

fn sort_key<T: Dated>(item: &T) -> &str {
    item.date().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{Entry, entries, entry_ids};

    #[test]
    fn newest_first() {
        let items = entries(&["2023-11-01", "2044-01-01", "2024-03-01"]);
        assert_eq!(entry_ids(&select_recent(&items, 10)), vec!["e1", "e2", "e0"]);
    }

    #[test]
    fn truncates_to_limit() {
        let items = entries(&[
            "2024-01-01",
            "2024-01-02",
            "2024-01-03",
            "2024-01-04",
            "2024-01-05",
            "2024-01-06",
            "2024-01-07",
            "2024-01-08",
            "2024-01-09",
            "2024-01-10",
            "2024-01-11",
            "2024-01-12",
            "2024-01-13",
            "2024-01-14",
            "2024-01-15",
        ]);

        let recent = select_recent(&items, 10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].date, Some("2024-01-15"));
        assert_eq!(recent[9].date, Some("2024-01-06"));
    }

    #[test]
    fn fewer_items_than_limit() {
        let items = entries(&["2024-01-01", "2024-02-01"]);
        assert_eq!(select_recent(&items, 10).len(), 2);
    }

    #[test]
    fn empty_input() {
        let items: Vec<Entry> = Vec::new();
        assert!(select_recent(&items, 10).is_empty());
    }

    #[test]
    fn zero_limit_selects_nothing() {
        let items = entries(&["2024-01-01"]);
        assert!(select_recent(&items, 0).is_empty());
    }

    #[test]
    fn empty_date_sorts_last() {
        let items = entries(&["", "2025-01-01"]);
        assert_eq!(entry_ids(&select_recent(&items, 10)), vec!["e1", "e0"]);

        let items = entries(&["2025-01-01", ""]);
        assert_eq!(entry_ids(&select_recent(&items, 10)), vec!["e0", "e1"]);
    }

    #[test]
    fn missing_date_sorts_last() {
        let mut items = vec![Entry {
            id: "undated",
            date: None,
        }];
        items.extend(entries(&["1999-01-01"]));
        assert_eq!(entry_ids(&select_recent(&items, 10)), vec!["e0", "undated"]);
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let items = vec![
            Entry {
                id: "a",
                date: Some("2024-05-01 09:00"),
            },
            Entry {
                id: "newest",
                date: Some("2024-06-01 09:00"),
            },
            Entry {
                id: "b",
                date: Some("2024-05-01 09:00"),
            },
            Entry {
                id: "c",
                date: Some("2024-05-01 09:00"),
            },
            Entry {
                id: "x",
                date: None,
            },
            Entry {
                id: "y",
                date: Some(""),
            },
        ];
        assert_eq!(
            entry_ids(&select_recent(&items, 10)),
            vec!["newest", "a", "b", "c", "x", "y"]
        );
    }
}
