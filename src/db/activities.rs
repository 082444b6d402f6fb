//! Activity registry: the unique set of names offered as suggestions.

use crate::errors::AppResult;
use rusqlite::Connection;

/// Register an activity name. Blank names are ignored and an existing
/// name is left untouched. Returns true when a new row was inserted.
pub fn add_activity(conn: &Connection, name: &str) -> AppResult<bool> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(false);
    }

    let inserted = conn.execute("INSERT OR IGNORE INTO activities (name) VALUES (?1)", [name])?;
    Ok(inserted > 0)
}

/// Names containing `query` (SQL `LIKE`, case-insensitive for ASCII).
/// An empty query yields no suggestions.
pub fn search_activities(conn: &Connection, query: &str) -> AppResult<Vec<String>> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt =
        conn.prepare_cached("SELECT name FROM activities WHERE name LIKE ?1 ORDER BY name ASC")?;
    let rows = stmt.query_map([format!("%{}%", query)], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn all_activities(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached("SELECT name FROM activities ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
