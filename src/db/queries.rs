use crate::errors::{AppError, AppResult};
use crate::models::session_event::{SessionEvent, format_timestamp, parse_timestamp};
use crate::models::status::SessionStatus;
use crate::utils::date::{end_of_day, start_of_day};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Result, Row, params};

const SELECT_EVENTS: &str =
    "SELECT id, activity_name, start_time, end_time, status FROM timer_logs";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn timestamp_column(row: &Row, idx: usize) -> Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(idx, AppError::InvalidDate(s.clone()))),
    }
}

/// Map a `timer_logs` row. Unparseable timestamps or statuses are reported
/// as conversion failures; the caller treats them as integrity errors.
pub fn map_row(row: &Row) -> Result<SessionEvent> {
    let status_str: String = row.get(4)?;
    let status = SessionStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(4, AppError::InvalidStatus(status_str.clone())))?;

    Ok(SessionEvent {
        id: row.get(0)?,
        activity_name: row.get(1)?,
        start_time: timestamp_column(row, 2)?,
        end_time: timestamp_column(row, 3)?,
        status,
    })
}

fn collect(conn: &Connection, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<SessionEvent>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Append one transition. `date_time` is whichever timestamp is present.
pub fn add_timer_log(conn: &Connection, ev: &SessionEvent) -> AppResult<i64> {
    let date_time = ev
        .sort_key()
        .ok_or_else(|| AppError::InvalidDate("event has neither start nor end time".into()))?;

    conn.execute(
        "INSERT INTO timer_logs (activity_name, start_time, end_time, status, date_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.activity_name,
            ev.start_time.as_ref().map(format_timestamp),
            ev.end_time.as_ref().map(format_timestamp),
            ev.status.to_db_str(),
            format_timestamp(&date_time),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The whole log in chronological order (ties keep insertion order).
pub fn load_all_events(conn: &Connection) -> AppResult<Vec<SessionEvent>> {
    collect(
        conn,
        &format!("{SELECT_EVENTS} ORDER BY date_time ASC, id ASC"),
        &[],
    )
}

/// Events whose start or end time falls inside `date` (local day bounds,
/// inclusive).
pub fn load_events_for_day(conn: &Connection, date: &NaiveDate) -> AppResult<Vec<SessionEvent>> {
    let from = format_timestamp(&start_of_day(*date));
    let to = format_timestamp(&end_of_day(*date));

    collect(
        conn,
        &format!(
            "{SELECT_EVENTS}
             WHERE (start_time BETWEEN ?1 AND ?2)
                OR (end_time   BETWEEN ?1 AND ?2)
             ORDER BY date_time ASC, id ASC"
        ),
        &[&from, &to],
    )
}

/// Delete synthesized `missing` rows only. Returns the number removed.
pub fn erase_missing(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM timer_logs WHERE status = ?1",
        [SessionStatus::Missing.to_db_str()],
    )?;
    Ok(n)
}

/// Rows that cannot be mapped to a [`SessionEvent`], as (id, reason).
pub fn unreadable_rows(conn: &Connection) -> AppResult<Vec<(i64, String)>> {
    let mut stmt = conn.prepare(&format!("{SELECT_EVENTS} ORDER BY id ASC"))?;
    let mut rows = stmt.query([])?;

    let mut bad = Vec::new();
    while let Some(row) = rows.next()? {
        if let Err(e) = map_row(row) {
            let id: i64 = row.get(0)?;
            bad.push((id, e.to_string()));
        }
    }
    Ok(bad)
}
