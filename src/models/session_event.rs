use super::status::SessionStatus;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Storage format of every timestamp in `timer_logs`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Label used in the transitions file when no activity was given.
pub const NO_ACTIVITY: &str = "No activity";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionEvent {
    pub id: i64,                             // ⇔ timer_logs.id (0 = not stored yet)
    pub activity_name: String,               // ⇔ timer_logs.activity_name (may be '')
    pub start_time: Option<NaiveDateTime>,   // ⇔ timer_logs.start_time (only on 'started')
    pub end_time: Option<NaiveDateTime>,     // ⇔ timer_logs.end_time (terminal rows)
    pub status: SessionStatus,               // ⇔ timer_logs.status
}

impl SessionEvent {
    pub fn started(activity: &str, at: NaiveDateTime) -> Self {
        Self {
            id: 0,
            activity_name: activity.to_string(),
            start_time: Some(at),
            end_time: None,
            status: SessionStatus::Started,
        }
    }

    /// Build a closing event (`cancelled`, `finished` or `missing`).
    pub fn closed(activity: &str, at: NaiveDateTime, status: SessionStatus) -> Self {
        Self {
            id: 0,
            activity_name: activity.to_string(),
            start_time: None,
            end_time: Some(at),
            status,
        }
    }

    /// The non-null timestamp among start/end, used for ordering and
    /// stored as `date_time`.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        self.start_time.or(self.end_time)
    }

    pub fn display_activity(&self) -> &str {
        if self.activity_name.is_empty() {
            NO_ACTIVITY
        } else {
            &self.activity_name
        }
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).ok()
}
