use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::status::SessionStatus;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogStats {
    pub total: i64,
    pub started: i64,
    pub cancelled: i64,
    pub finished: i64,
    pub missing: i64,
    pub activities: i64,
    pub first: Option<String>,
    pub last: Option<String>,
}

pub fn collect_stats(conn: &Connection) -> AppResult<LogStats> {
    let mut stats = LogStats {
        total: conn.query_row("SELECT COUNT(*) FROM timer_logs", [], |row| row.get(0))?,
        activities: conn.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?,
        ..Default::default()
    };

    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM timer_logs GROUP BY status")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
    for r in rows {
        let (status, n) = r?;
        match SessionStatus::from_db_str(&status) {
            Some(SessionStatus::Started) => stats.started = n,
            Some(SessionStatus::Cancelled) => stats.cancelled = n,
            Some(SessionStatus::Finished) => stats.finished = n,
            Some(SessionStatus::Missing) => stats.missing = n,
            None => {}
        }
    }

    stats.first = conn
        .query_row(
            "SELECT date_time FROM timer_logs ORDER BY date_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    stats.last = conn
        .query_row(
            "SELECT date_time FROM timer_logs ORDER BY date_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(stats)
}

pub fn print_db_info(pool: &mut DbPool) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(&pool.path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let stats = collect_stats(&pool.conn)?;

    //
    // 2) EVENTS PER STATUS
    //
    println!(
        "{}• Total events:{} {}{}{}",
        CYAN, RESET, GREEN, stats.total, RESET
    );
    println!(
        "    started: {} | cancelled: {} | finished: {} | missing: {}",
        stats.started, stats.cancelled, stats.finished, stats.missing
    );
    println!("{}• Activities:{} {}", CYAN, RESET, stats.activities);

    //
    // 3) DATE RANGE
    //
    let grey = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", stats.first.clone().unwrap_or_else(grey));
    println!("    to:   {}", stats.last.clone().unwrap_or_else(grey));

    println!();
    Ok(())
}
