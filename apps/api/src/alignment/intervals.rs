//! Years of experience — union of employment intervals.
//!
//! Overlapping or touching positions are merged into a single span so concurrent
//! jobs are never double-counted. Open-ended positions run until `now`.
//!
//! Algorithm:
//! 1. Resolve each record to a `(start, end)` pair via `resolve_interval`
//!    (records without a start, or whose end is not after the start, are dropped)
//! 2. Sort by start (ties are a don't-care: the union is the same)
//! 3. Sweep left to right, extending the current span while the next start is
//!    strictly before its end
//! 4. Sum span durations in seconds, convert with a 365.25-day year, round to 2dp
//!    with exact halves going to the even hundredth (0.125 → 0.12, 0.135 → 0.14)
//!
//! The 365.25-day year averages out leap years; it is not calendar-exact.

use chrono::{DateTime, Utc};

use crate::models::resume::Experience;

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// A single employment period with a concrete end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A maximal contiguous block covered by one or more `TimeInterval`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MergedInterval {
    fn duration_seconds(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 1000.0
    }
}

/// Resolves an experience record into a concrete interval, or drops it.
///
/// Drop predicate: the record has no start date, or its end (with an ongoing
/// position closed at `now`) is not strictly after its start. Dropping is silent;
/// a malformed record never fails the whole computation.
pub fn resolve_interval(experience: &Experience, now: DateTime<Utc>) -> Option<TimeInterval> {
    let start = experience.start_date?;
    let end = experience.end_date.unwrap_or(now);
    (start < end).then_some(TimeInterval { start, end })
}

/// Merges intervals into non-overlapping spans ordered by start.
pub fn merge_intervals(mut intervals: Vec<TimeInterval>) -> Vec<MergedInterval> {
    intervals.sort_by_key(|i| i.start);

    let mut iter = intervals.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    let mut current = MergedInterval {
        start: first.start,
        end: first.end,
    };

    for next in iter {
        if next.start < current.end {
            current.end = current.end.max(next.end);
        } else {
            merged.push(current);
            current = MergedInterval {
                start: next.start,
                end: next.end,
            };
        }
    }
    merged.push(current);

    merged
}

/// Total deduplicated years of experience, evaluated at `now`.
///
/// `now` closes every ongoing position so all of them share one reference
/// instant. Result is rounded to two decimals and is never negative.
pub fn total_years(experiences: &[Experience], now: DateTime<Utc>) -> f64 {
    let intervals: Vec<TimeInterval> = experiences
        .iter()
        .filter_map(|exp| resolve_interval(exp, now))
        .collect();

    if intervals.is_empty() {
        return 0.0;
    }

    let total_seconds: f64 = merge_intervals(intervals)
        .iter()
        .map(MergedInterval::duration_seconds)
        .sum();

    round_2dp(total_seconds / SECONDS_PER_YEAR)
}

/// `total_years` evaluated at the current instant, captured once.
pub fn total_years_now(experiences: &[Experience]) -> f64 {
    total_years(experiences, Utc::now())
}

/// Half-to-even at the second decimal.
fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
