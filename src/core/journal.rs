use crate::db::log::ttlog;
use crate::db::queries::add_timer_log;
use crate::db::transitions::append_transition;
use crate::errors::AppResult;
use crate::models::session_event::SessionEvent;
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::path::Path;

/// Persist one session transition: the `timer_logs` row first, then the
/// audit entry and the line in the transitions file. Only the row is
/// mandatory; the other two report a warning when they fail.
pub fn record(conn: &Connection, transitions: &Path, ev: &SessionEvent) -> AppResult<i64> {
    let id = add_timer_log(conn, ev)?;

    if let Err(e) = ttlog(
        conn,
        ev.status.to_db_str(),
        ev.display_activity(),
        &format!("Session {} (timer_logs #{})", ev.status, id),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    if let Err(e) = append_transition(transitions, ev) {
        warning(format!(
            "Failed to append to {}: {}",
            transitions.display(),
            e
        ));
    }

    Ok(id)
}
