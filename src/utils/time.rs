//! Time utilities: parsing HH:MM, minute counts, HH:MM:SS durations.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse a user supplied `HH:MM` clock time.
pub fn parse_clock(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse a non-negative whole number of minutes typed by the user.
pub fn parse_minutes(s: &str) -> AppResult<i64> {
    s.trim()
        .parse::<i64>()
        .ok()
        .filter(|m| *m >= 0)
        .ok_or_else(|| AppError::InvalidNumber(s.to_string()))
}

/// Format a number of seconds as `HH:MM:SS`, with a leading `-` for
/// negative values. Hours are not wrapped at 24.
pub fn format_duration(total_secs: i64) -> String {
    let sign = if total_secs < 0 { "-" } else { "" };
    let s = total_secs.unsigned_abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

/// Inverse of [`format_duration`]. Anything that does not look like
/// `[-]H:MM:SS` (minutes and seconds below 60) counts as zero seconds.
pub fn parse_duration(s: &str) -> i64 {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return 0;
    }
    if parts
        .iter()
        .any(|p| !p.chars().all(|c| c.is_ascii_digit()))
    {
        return 0;
    }

    let total = hms_to_seconds(parts[0], parts[1], parts[2]).unwrap_or(0);
    if negative { -total } else { total }
}

fn hms_to_seconds(h: &str, m: &str, s: &str) -> Option<i64> {
    let h = h.parse::<i64>().ok()?;
    let m = m.parse::<i64>().ok().filter(|m| *m < 60)?;
    let s = s.parse::<i64>().ok().filter(|s| *s < 60)?;
    h.checked_mul(3600)?.checked_add(m * 60 + s)
}
