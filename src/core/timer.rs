use crate::errors::{AppError, AppResult};
use crate::utils::time::{parse_clock, parse_minutes};
use chrono::{Duration, NaiveDateTime};

/// A validated countdown request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRequest {
    pub ends_at: NaiveDateTime,
    pub total_secs: i64,
    pub notify_before_secs: i64,
}

impl TimerRequest {
    /// Build a request from raw user input.
    ///
    /// A non-empty end time (`HH:MM`) takes precedence over a duration in
    /// minutes. An end time at or before `now` means that time tomorrow.
    /// `notify` is in minutes; blank means no reminder.
    pub fn parse(
        duration: Option<&str>,
        end: Option<&str>,
        notify: Option<&str>,
        now: NaiveDateTime,
    ) -> AppResult<Self> {
        let notify_before_secs = match notify.map(str::trim).filter(|s| !s.is_empty()) {
            Some(n) => parse_minutes(n)?
                .checked_mul(60)
                .ok_or_else(|| AppError::InvalidNumber(n.to_string()))?,
            None => 0,
        };

        let end = end.map(str::trim).filter(|s| !s.is_empty());
        let duration = duration.map(str::trim).filter(|s| !s.is_empty());

        let (ends_at, total_secs) = match (end, duration) {
            (Some(e), _) => {
                let clock = parse_clock(e)?;
                let mut ends_at = now.date().and_time(clock);
                if ends_at <= now {
                    ends_at += Duration::days(1);
                }
                (ends_at, (ends_at - now).num_seconds())
            }
            (None, Some(d)) => {
                let secs = parse_minutes(d)?
                    .checked_mul(60)
                    .ok_or_else(|| AppError::InvalidNumber(d.to_string()))?;
                let delta =
                    Duration::try_seconds(secs).ok_or_else(|| AppError::InvalidNumber(d.to_string()))?;
                let ends_at = now
                    .checked_add_signed(delta)
                    .ok_or_else(|| AppError::InvalidNumber(d.to_string()))?;
                (ends_at, secs)
            }
            (None, None) => return Err(AppError::MissingTimer),
        };

        Ok(Self {
            ends_at,
            total_secs,
            notify_before_secs,
        })
    }
}
