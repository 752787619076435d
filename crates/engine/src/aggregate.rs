//! Filtering, ordering and totals over an entry collection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{Entry, EntryKind, MoneyCents, format::parse_timestamp};

/// Number of rows shown in the recent activity view.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Sums over a collection. `balance` is always `income - output`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: MoneyCents,
    pub output: MoneyCents,
    pub balance: MoneyCents,
}

/// Entries of one kind, in their original order.
pub fn filter_by_type(entries: &[Entry], kind: EntryKind) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.kind == kind)
        .cloned()
        .collect()
}

pub fn totals(entries: &[Entry]) -> Totals {
    let sum_of = |kind: EntryKind| {
        entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.amount)
            .sum::<MoneyCents>()
    };
    let income = sum_of(EntryKind::Income);
    let output = sum_of(EntryKind::Output);
    Totals {
        income,
        output,
        balance: income - output,
    }
}

/// The `limit` most recent entries, newest first.
///
/// Entries whose date doesn't parse go after every dated entry, in their
/// original relative order.
pub fn recent(entries: &[Entry], limit: usize) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| by_date(a, b, true));
    sorted.truncate(limit);
    sorted
}

/// Oldest first, undated entries last. The sort is stable.
pub fn sort_chronological(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| by_date(a, b, false));
    sorted
}

fn by_date(a: &Entry, b: &Entry, newest_first: bool) -> Ordering {
    match (parse_timestamp(&a.date), parse_timestamp(&b.date)) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, kind: EntryKind, date: &str, cents: i64) -> Entry {
        Entry {
            id: id.to_string(),
            kind,
            date: date.to_string(),
            amount: MoneyCents::new(cents),
            desc: String::new(),
        }
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn filter_keeps_relative_order() {
        let entries = [
            entry("a", EntryKind::Income, "2024-01-03", 100),
            entry("b", EntryKind::Output, "2024-01-02", 100),
            entry("c", EntryKind::Income, "2024-01-01", 100),
        ];
        assert_eq!(ids(&filter_by_type(&entries, EntryKind::Income)), ["a", "c"]);
        assert_eq!(ids(&filter_by_type(&entries, EntryKind::Output)), ["b"]);
    }

    #[test]
    fn totals_of_empty_are_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn balance_is_income_minus_output() {
        let entries = [
            entry("a", EntryKind::Income, "2024-01-01", 10050),
            entry("b", EntryKind::Output, "2024-01-02", 4000),
            entry("c", EntryKind::Output, "2024-01-03", 0),
            entry("d", EntryKind::Output, "2024-01-04", 9000),
        ];
        let t = totals(&entries);
        assert_eq!(t.income, MoneyCents::new(10050));
        assert_eq!(t.output, MoneyCents::new(13000));
        assert_eq!(t.balance, t.income - t.output);
        assert!(t.balance.is_negative());
    }

    #[test]
    fn totals_saturate_on_huge_amounts() {
        let entries = [
            entry("a", EntryKind::Income, "2024-01-01", i64::MAX - 1),
            entry("b", EntryKind::Income, "2024-01-02", i64::MAX - 1),
            entry("c", EntryKind::Output, "2024-01-03", i64::MAX - 1),
            entry("d", EntryKind::Output, "2024-01-04", i64::MAX - 1),
        ];
        let t = totals(&entries);
        assert_eq!(t.income, MoneyCents::new(i64::MAX));
        assert_eq!(t.output, MoneyCents::new(i64::MAX));
        assert_eq!(t.balance, MoneyCents::ZERO);
    }

    #[test]
    fn recent_is_newest_first_and_truncated() {
        let entries = [
            entry("a", EntryKind::Income, "2024-01-01", 1),
            entry("b", EntryKind::Output, "2024-03-01", 1),
            entry("c", EntryKind::Income, "2024-02-01", 1),
        ];
        assert_eq!(ids(&recent(&entries, 50)), ["b", "c", "a"]);
        assert_eq!(ids(&recent(&entries, 2)), ["b", "c"]);
        assert!(recent(&entries, 0).is_empty());
    }

    #[test]
    fn undated_entries_sort_last_both_ways() {
        let entries = [
            entry("x", EntryKind::Income, "someday", 1),
            entry("a", EntryKind::Income, "2024-01-01", 1),
            entry("y", EntryKind::Income, "", 1),
            entry("b", EntryKind::Income, "2024-02-01", 1),
        ];
        assert_eq!(ids(&recent(&entries, 10)), ["b", "a", "x", "y"]);
        assert_eq!(ids(&sort_chronological(&entries)), ["a", "b", "x", "y"]);
    }

    #[test]
    fn same_day_keeps_insertion_order() {
        let entries = [
            entry("a", EntryKind::Income, "2024-01-01", 1),
            entry("b", EntryKind::Output, "2024-01-01", 1),
        ];
        assert_eq!(ids(&sort_chronological(&entries)), ["a", "b"]);
        assert_eq!(ids(&recent(&entries, 10)), ["a", "b"]);
    }
}
