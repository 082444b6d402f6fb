use super::reconcile::reconcile;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{add_timer_log, load_all_events};
use crate::errors::{AppError, AppResult};
use crate::models::session_event::format_timestamp;

/// Check the session log once before anything else touches it.
///
/// Every dangling session gets its `missing` record, all inserted in a
/// single transaction. Any failure (unreadable rows, malformed timestamps,
/// write errors) is turned into [`AppError::Integrity`] carrying the
/// database location; nothing is written in that case.
pub fn ensure_log_integrity(pool: &mut DbPool) -> AppResult<usize> {
    let path = pool.path.clone();
    repair(pool).map_err(|e| AppError::integrity(&path, e))
}

fn repair(pool: &mut DbPool) -> AppResult<usize> {
    let events = load_all_events(&pool.conn)?;
    let repairs = reconcile(&events);

    if repairs.is_empty() {
        return Ok(0);
    }

    let tx = pool.conn.transaction()?;
    for ev in &repairs {
        add_timer_log(&tx, ev)?;

        let at = ev.end_time.as_ref().map(format_timestamp).unwrap_or_default();
        ttlog(
            &tx,
            "reconcile",
            ev.display_activity(),
            &format!("Closed dangling session started at {}", at),
        )?;
    }
    tx.commit()?;

    Ok(repairs.len())
}
