//! Derived statistics over the entry collection.
//!
//! All functions are pure. Each counter has an `_on` variant taking the
//! reference date explicitly; the plain variant uses the local date.
//! Date comparisons are done on the `YYYY-MM-DD` keys directly, which sort
//! lexicographically in calendar order.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::domain::{format_date, Clock, DailyEntry, SystemClock};

/// Consecutive days with an entry, ending today or yesterday.
pub fn calculate_streak(entries: &[DailyEntry]) -> usize {
    calculate_streak_on(entries, SystemClock.today())
}

pub fn calculate_streak_on(entries: &[DailyEntry], today: NaiveDate) -> usize {
    let dates: HashSet<&str> = entries.iter().map(|e| e.date.as_str()).collect();
    let has_entry = |d: NaiveDate| dates.contains(format_date(d).as_str());

    let mut cursor = if has_entry(today) {
        Some(today)
    } else {
        match today.pred_opt() {
            Some(yesterday) if has_entry(yesterday) => Some(yesterday),
            _ => return 0,
        }
    };

    let mut streak = 0;
    while let Some(day) = cursor {
        if !has_entry(day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }

    streak
}

pub fn count_total_entries(entries: &[DailyEntry]) -> usize {
    entries.len()
}

pub fn count_total_items(entries: &[DailyEntry]) -> usize {
    entries.iter().map(|e| e.items.len()).sum()
}

/// Entries since the most recent Sunday (inclusive).
pub fn count_this_week_entries(entries: &[DailyEntry]) -> usize {
    count_this_week_entries_on(entries, SystemClock.today())
}

pub fn count_this_week_entries_on(entries: &[DailyEntry], today: NaiveDate) -> usize {
    count_since(entries, &format_date(week_start(today)))
}

/// Entries since the first day of the current month (inclusive).
pub fn count_this_month_entries(entries: &[DailyEntry]) -> usize {
    count_this_month_entries_on(entries, SystemClock.today())
}

pub fn count_this_month_entries_on(entries: &[DailyEntry], today: NaiveDate) -> usize {
    let first = today.with_day(1).unwrap_or(today);
    count_since(entries, &format_date(first))
}

/// Entries whose date lies within the inclusive `[from, to]` bounds.
pub fn filter_by_date_range<'a>(
    entries: &'a [DailyEntry],
    from: Option<&str>,
    to: Option<&str>,
) -> Vec<&'a DailyEntry> {
    entries
        .iter()
        .filter(|e| from.is_none_or(|f| e.date.as_str() >= f))
        .filter(|e| to.is_none_or(|t| e.date.as_str() <= t))
        .collect()
}

fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_sunday());
    today.checked_sub_days(Days::new(offset)).unwrap_or(today)
}

fn count_since(entries: &[DailyEntry], start: &str) -> usize {
    entries.iter().filter(|e| e.date.as_str() >= start).count()
}

/// Summary of every statistic, computed in one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub streak: usize,
    pub total_entries: usize,
    pub total_items: usize,
    pub this_week: usize,
    pub this_month: usize,
}

impl Stats {
    pub fn compute(entries: &[DailyEntry], today: NaiveDate) -> Self {
        Self {
            streak: calculate_streak_on(entries, today),
            total_entries: count_total_entries(entries),
            total_items: count_total_items(entries),
            this_week: count_this_week_entries_on(entries, today),
            this_month: count_this_month_entries_on(entries, today),
        }
    }
}
