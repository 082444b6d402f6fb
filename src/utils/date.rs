use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

// dd.mm.yyyy | dd.mm.yy | dd.mm
static SUMMARY_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2})\.(\d{2})(?:\.(\d{4}|\d{2}))?$").expect("valid summary date regex")
});

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a summary date relative to today's date.
///
/// Accepted forms are `dd.mm.yyyy`, `dd.mm.yy` (expanded to `20yy`) and
/// `dd.mm` (current year). Returns `None` for anything else, including
/// dates that do not exist in the calendar such as `29.02` in a
/// non-leap year.
pub fn parse_summary_date_with(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = SUMMARY_DATE_RE.captures(s.trim())?;

    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year: i32 = match caps.get(3).map(|m| m.as_str()) {
        Some(y) if y.len() == 2 => format!("20{y}").parse().ok()?,
        Some(y) => y.parse().ok()?,
        None => today.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_summary_date(s: &str) -> Option<NaiveDate> {
    parse_summary_date_with(s, today())
}

/// Format a date the way the summary prompt shows it (`dd.mm.yyyy`).
pub fn format_summary_date(d: &NaiveDate) -> String {
    d.format("%d.%m.%Y").to_string()
}

/// First instant of `d` (local midnight).
pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// Last representable instant of `d` (23:59:59.999…).
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    d.and_time(last)
}
