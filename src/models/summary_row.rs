use crate::utils::time::format_duration;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// One line of the day summary.
///
/// `cumulative` is `None` when the group has no start or no end timestamps
/// at all, so the end-sum minus start-sum formula has nothing to subtract.
/// `end` is always `start + cumulative`, so a group holding only end
/// events shows no end time even though one was logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub activity_name: String,
    pub cumulative: Option<Duration>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl SummaryRow {
    /// Cumulative time as shown in the report (`HH:MM:SS`, may be negative).
    pub fn duration_str(&self) -> String {
        match self.cumulative {
            Some(d) => format_duration(d.num_seconds()),
            None => "--:--:--".to_string(),
        }
    }
}

/// Serializable rendering of a row for `summary --json`.
#[derive(Debug, Serialize)]
pub struct SummaryRecord {
    pub activity: String,
    pub cumulative_time: String,
    pub cumulative_seconds: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<&SummaryRow> for SummaryRecord {
    fn from(row: &SummaryRow) -> Self {
        use super::session_event::format_timestamp;

        Self {
            activity: row.activity_name.clone(),
            cumulative_time: row.duration_str(),
            cumulative_seconds: row.cumulative.map(|d| d.num_seconds()),
            start_time: row.start.as_ref().map(format_timestamp),
            end_time: row.end.as_ref().map(format_timestamp),
        }
    }
}
