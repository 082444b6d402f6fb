//! Per-day, per-activity time summary.
//!
//! The cumulative time of an activity is computed as the sum of its end
//! timestamps minus the sum of its start timestamps (in epoch seconds).
//! That equals the sum of the session lengths only when every start in
//! the day has exactly one matching end in the same day; otherwise the
//! figure is approximate and can be zero or negative. It is reported as
//! computed.

use crate::models::session_event::SessionEvent;
use crate::models::summary_row::SummaryRow;
use crate::utils::date::{end_of_day, start_of_day};
use crate::utils::time::parse_duration;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Activity,
    Duration,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Current ordering of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySort {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for SummarySort {
    /// Most recent sessions first.
    fn default() -> Self {
        Self {
            column: SortColumn::Start,
            order: SortOrder::Descending,
        }
    }
}

impl SummarySort {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }

    /// Selecting a column sorts it descending; selecting the same column
    /// again flips the direction.
    pub fn select(self, column: SortColumn) -> Self {
        if column == self.column {
            Self::new(column, self.order.toggled())
        } else {
            Self::new(column, SortOrder::Descending)
        }
    }
}

fn epoch(ts: &NaiveDateTime) -> i64 {
    ts.and_utc().timestamp()
}

/// Aggregate the events touching `date` into one row per activity.
///
/// Rows come out ordered by activity name; use [`sort_rows`] for any other
/// order. A day without events yields an empty vector.
pub fn summarize(date: NaiveDate, events: &[SessionEvent]) -> Vec<SummaryRow> {
    let from = start_of_day(date);
    let to = end_of_day(date);
    let in_day = |t: &Option<NaiveDateTime>| t.is_some_and(|t| t >= from && t <= to);

    let mut groups: BTreeMap<&str, Vec<&SessionEvent>> = BTreeMap::new();
    for ev in events
        .iter()
        .filter(|ev| in_day(&ev.start_time) || in_day(&ev.end_time))
    {
        groups.entry(ev.activity_name.as_str()).or_default().push(ev);
    }

    groups
        .into_iter()
        .map(|(activity, group)| aggregate(activity, &group))
        .collect()
}

fn aggregate(activity: &str, group: &[&SessionEvent]) -> SummaryRow {
    let starts: Vec<NaiveDateTime> = group.iter().filter_map(|ev| ev.start_time).collect();
    let ends: Vec<NaiveDateTime> = group.iter().filter_map(|ev| ev.end_time).collect();

    let start = starts.iter().min().copied();

    // SQL-style sums: an empty side leaves the result undefined
    let cumulative = if starts.is_empty() || ends.is_empty() {
        None
    } else {
        let sum_starts: i64 = starts.iter().map(epoch).sum();
        let sum_ends: i64 = ends.iter().map(epoch).sum();
        Duration::try_seconds(sum_ends - sum_starts)
    };

    let end = match (start, cumulative) {
        (Some(s), Some(d)) => s.checked_add_signed(d),
        _ => None,
    };

    SummaryRow {
        activity_name: activity.to_string(),
        cumulative,
        start,
        end,
    }
}

/// Sort rows in place. Ties are broken by activity name so that the
/// descending order is the exact reverse of the ascending one.
pub fn sort_rows(rows: &mut [SummaryRow], sort: SummarySort) {
    rows.sort_by(|a, b| {
        let ord = compare(a, b, sort.column).then_with(|| a.activity_name.cmp(&b.activity_name));
        match sort.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

fn compare(a: &SummaryRow, b: &SummaryRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Activity => a.activity_name.cmp(&b.activity_name),
        // compared through the displayed HH:MM:SS text
        SortColumn::Duration => parse_duration(&a.duration_str()).cmp(&parse_duration(&b.duration_str())),
        SortColumn::Start => a.start.cmp(&b.start),
        SortColumn::End => a.end.cmp(&b.end),
    }
}

/// Aggregate and sort in one step.
pub fn build_summary(date: NaiveDate, events: &[SessionEvent], sort: SummarySort) -> Vec<SummaryRow> {
    let mut rows = summarize(date, events);
    sort_rows(&mut rows, sort);
    rows
}
