use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Every other migration records
/// itself there, so this one always runs first and is never versioned.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Known activity names, used for suggestions.
fn create_activities_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id   INTEGER PRIMARY KEY,
            name TEXT UNIQUE NOT NULL
        );
        "#,
    )
}

/// Append-only session transitions. `date_time` mirrors whichever of
/// start_time / end_time is set.
fn create_timer_logs_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timer_logs (
            id            INTEGER PRIMARY KEY,
            activity_name TEXT NOT NULL,
            start_time    TEXT NULL,
            end_time      TEXT,
            status        TEXT NOT NULL,
            date_time     TEXT NOT NULL
        );
        "#,
    )
}

fn add_timer_logs_index(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_timer_logs_date_time ON timer_logs(date_time, id);",
    )
}

type Step = fn(&Connection) -> Result<()>;

/// Ordered list of (version, description, step).
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20240601_0001_create_activities",
        "Created activities table",
        create_activities_table,
    ),
    (
        "20240601_0002_create_timer_logs",
        "Created timer_logs table",
        create_timer_logs_table,
    ),
    (
        "20240715_0003_index_timer_logs_date_time",
        "Indexed timer_logs by date_time",
        add_timer_logs_index,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Called by db::initialize::init_db(). Databases created by older builds
/// that already have the tables (but no migration rows) are adopted: the
/// `CREATE ... IF NOT EXISTS` steps are no-ops and only get recorded.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn)?;
        mark_applied(conn, version, message)?;
        success(format!("Migration applied: {}", version));
    }

    Ok(())
}

/// True when the database carries both session tables.
pub fn schema_ready(conn: &Connection) -> Result<bool> {
    Ok(table_exists(conn, "activities")? && table_exists(conn, "timer_logs")?)
}
