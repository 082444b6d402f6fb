#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use pomolog::db::pool::DbPool;
use pomolog::models::session_event::SessionEvent;
use pomolog::models::status::SessionStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pomo() -> Command {
    cargo_bin_cmd!("pomolog")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file (and its transitions file).
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pomolog.sqlite", name));
    fs::remove_file(&path).ok();
    fs::remove_file(path.with_extension("csv")).ok();
    path.to_string_lossy().to_string()
}

/// Transitions file that sits next to a test DB.
pub fn transitions_for(db_path: &str) -> PathBuf {
    PathBuf::from(db_path).with_extension("csv")
}

/// Open a fresh, migrated store through the library API.
pub fn open_test_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    pomolog::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn started(activity: &str, at: &str) -> SessionEvent {
    SessionEvent::started(activity, ts(at))
}

pub fn finished(activity: &str, at: &str) -> SessionEvent {
    SessionEvent::closed(activity, ts(at), SessionStatus::Finished)
}

pub fn cancelled(activity: &str, at: &str) -> SessionEvent {
    SessionEvent::closed(activity, ts(at), SessionStatus::Cancelled)
}

pub fn missing(activity: &str, at: &str) -> SessionEvent {
    SessionEvent::closed(activity, ts(at), SessionStatus::Missing)
}

/// Write events straight into `timer_logs`.
pub fn insert_all(pool: &DbPool, events: &[SessionEvent]) {
    for ev in events {
        pomolog::db::queries::add_timer_log(&pool.conn, ev).expect("insert event");
    }
}

/// Initialize a DB through the CLI (`--test` keeps the real config intact).
pub fn init_cli_db(db_path: &str) {
    pomo()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
