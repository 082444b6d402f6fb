//! Append-only CSV file with one line per session transition, kept next
//! to the database for external auditing.

use crate::errors::AppResult;
use crate::models::session_event::{SessionEvent, format_timestamp};
use std::fs::OpenOptions;
use std::path::Path;

/// Append `timestamp, status, activity` for `ev`.
pub fn append_transition(path: &Path, ev: &SessionEvent) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let when = ev.sort_key().map(|t| format_timestamp(&t)).unwrap_or_default();
    wtr.write_record([
        when.as_str(),
        ev.status.to_db_str(),
        ev.display_activity(),
    ])?;
    wtr.flush()?;
    Ok(())
}

/// Read back every transition as (timestamp, status, activity).
pub fn read_transitions(path: &Path) -> AppResult<Vec<(String, String, String)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or("").to_string();
        out.push((field(0), field(1), field(2)));
    }
    Ok(out)
}
