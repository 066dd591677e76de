use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

pub const DAYS_PER_WEEK: usize = 7;

/// Author identity and time of a single commit, as read from history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSignature {
    pub author_email: String,
    pub authored_at: DateTime<FixedOffset>,
}

impl CommitSignature {
    pub fn new(author_email: impl Into<String>, authored_at: DateTime<FixedOffset>) -> Self {
        Self {
            author_email: author_email.into(),
            authored_at,
        }
    }
}

/// Commit counts keyed by day index (0 = today, growing into the past).
///
/// Dense over `0..=window_days`, so every day in the window reads as a
/// number even when nothing was recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCounts {
    counts: Vec<u32>,
}

impl DayCounts {
    pub fn new(window_days: usize) -> Self {
        Self {
            counts: vec![0; window_days + 1],
        }
    }

    pub fn get(&self, day: usize) -> u32 {
        self.counts.get(day).copied().unwrap_or(0)
    }

    /// Adds one commit to `day`. Days outside the window are ignored.
    pub fn add(&mut self, day: usize) {
        if let Some(slot) = self.counts.get_mut(day) {
            *slot += 1;
        }
    }

    /// Folds another partial map into this one.
    pub fn merge(&mut self, other: &DayCounts) {
        for (day, count) in other.iter() {
            if let Some(slot) = self.counts.get_mut(day) {
                *slot += count;
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Every `(day, count)` pair in the window, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().copied().enumerate()
    }
}

/// Week-by-weekday grid. Week 0 is the current week; weekday slots run
/// Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekGrid {
    weeks: BTreeMap<usize, [u32; DAYS_PER_WEEK]>,
}

impl WeekGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, week: usize, weekday: usize, count: u32) {
        let row = self.weeks.entry(week).or_insert([0; DAYS_PER_WEEK]);
        row[weekday] += count;
    }

    /// Oldest week present, or 0 for an empty grid.
    pub fn last_week(&self) -> usize {
        self.weeks.keys().next_back().copied().unwrap_or(0)
    }

    pub fn row(&self, week: usize) -> [u32; DAYS_PER_WEEK] {
        self.weeks.get(&week).copied().unwrap_or([0; DAYS_PER_WEEK])
    }

    pub fn cell(&self, week: usize, weekday: usize) -> u32 {
        self.row(week).get(weekday).copied().unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[u32; DAYS_PER_WEEK])> {
        self.weeks.iter().map(|(week, row)| (*week, row))
    }

    pub fn total(&self) -> u64 {
        self.weeks
            .values()
            .flat_map(|row| row.iter())
            .map(|&c| c as u64)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRow {
    pub week: usize,
    pub starts_on: NaiveDate,
    pub days: [u32; DAYS_PER_WEEK],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRepo {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub email: String,
    pub window_start: NaiveDate,
    pub today: NaiveDate,
    pub window_days: usize,
    pub total: u64,
    pub repositories: Vec<String>,
    pub skipped: Vec<SkippedRepo>,
    pub weeks: Vec<WeekRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn day_counts_read_zero_for_untouched_days() {
        let mut counts = DayCounts::new(30);
        counts.add(3);
        counts.add(3);

        assert_eq!(counts.get(3), 2);
        assert_eq!(counts.get(0), 0);
        assert_eq!(counts.get(30), 0);
        assert_eq!(counts.iter().count(), 31);
    }

    #[test]
    fn day_counts_ignore_days_outside_window() {
        let mut counts = DayCounts::new(10);
        counts.add(11);
        counts.add(500);

        assert_eq!(counts.total(), 0);
        assert_eq!(counts.get(11), 0);
    }

    #[test]
    fn merge_adds_partial_maps() {
        let mut a = DayCounts::new(20);
        let mut b = DayCounts::new(20);
        for _ in 0..3 {
            a.add(10);
        }
        b.add(10);
        b.add(10);
        b.add(0);

        a.merge(&b);
        assert_eq!(a.get(10), 5);
        assert_eq!(a.get(0), 1);
        assert_eq!(a.total(), 6);
    }

    #[test]
    fn missing_week_rows_are_all_zero() {
        let mut grid = WeekGrid::new();
        grid.add(2, 4, 9);

        assert_eq!(grid.row(1), [0; DAYS_PER_WEEK]);
        assert_eq!(grid.row(2), [0, 0, 0, 0, 9, 0, 0]);
        assert_eq!(grid.last_week(), 2);
        assert_eq!(grid.total(), 9);
    }
}
