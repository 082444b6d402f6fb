mod common;
use common::{init_cli_db, insert_all, pomo, setup_test_db, started, transitions_for};
use pomolog::db::pool::DbPool;
use pomolog::db::queries::load_all_events;
use pomolog::models::status::SessionStatus;
use predicates::str::contains;
use serde_json::Value;

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    pomo()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("Migration applied"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_zero_minute_session_shows_up_everywhere() {
    let db_path = setup_test_db("cli_session");
    init_cli_db(&db_path);

    pomo()
        .args(["--db", &db_path, "start", "Write", "--duration", "0"])
        .assert()
        .success()
        .stdout(contains("Time's up!"));

    pomo()
        .args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("Write"))
        .stdout(contains("00:00:00"));

    pomo()
        .args(["--db", &db_path, "activities", "rit"])
        .assert()
        .success()
        .stdout(contains("Write"));

    pomo()
        .args(["--db", &db_path, "log", "--transitions"])
        .assert()
        .success()
        .stdout(contains("started"))
        .stdout(contains("finished"));

    assert!(transitions_for(&db_path).exists());
}

#[test]
fn test_summary_json_output() {
    let db_path = setup_test_db("cli_json");
    init_cli_db(&db_path);

    pomo()
        .args(["--db", &db_path, "start", "Read", "--duration", "0"])
        .assert()
        .success();

    let output = pomo()
        .args(["--db", &db_path, "summary", "--json"])
        .output()
        .expect("run summary");
    assert!(output.status.success());

    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let rows = parsed.as_array().expect("array of rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["activity"], "Read");
    assert_eq!(rows[0]["cumulative_time"], "00:00:00");
    assert_eq!(rows[0]["cumulative_seconds"], 0);
}

#[test]
fn test_empty_day_summary() {
    let db_path = setup_test_db("cli_empty_day");
    init_cli_db(&db_path);

    pomo()
        .args(["--db", &db_path, "summary", "01.01.2020"])
        .assert()
        .success()
        .stdout(contains("No sessions recorded on 01.01.2020"));
}

#[test]
fn test_invalid_input_is_rejected() {
    let db_path = setup_test_db("cli_invalid");
    init_cli_db(&db_path);

    pomo()
        .args(["--db", &db_path, "start", "Write", "--duration", "abc"])
        .assert()
        .failure()
        .stderr(contains("Invalid number of minutes"));

    pomo()
        .args(["--db", &db_path, "start", "Write", "--end", "7pm"])
        .assert()
        .failure()
        .stderr(contains("expected HH:MM"));

    pomo()
        .args(["--db", &db_path, "summary", "29.02.2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    // nothing reached the log
    let pool = DbPool::new(&db_path).unwrap();
    assert!(load_all_events(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_dangling_session_is_closed_at_startup() {
    let db_path = setup_test_db("cli_startup_reconcile");
    init_cli_db(&db_path);

    {
        let pool = DbPool::new(&db_path).unwrap();
        insert_all(&pool, &[started("Write", "2025-03-10 09:00:00")]);
    }

    pomo()
        .args(["--db", &db_path, "summary", "10.03.2025"])
        .assert()
        .success()
        .stdout(contains("Closed 1 session(s)"))
        .stdout(contains("Write"));

    // the second run finds nothing to repair
    pomo()
        .args(["--db", &db_path, "db", "--reconcile"])
        .assert()
        .success()
        .stdout(contains("nothing to repair"));

    let pool = DbPool::new(&db_path).unwrap();
    let statuses: Vec<SessionStatus> = load_all_events(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.status)
        .collect();
    assert_eq!(statuses, vec![SessionStatus::Started, SessionStatus::Missing]);
}

#[test]
fn test_corrupt_log_stops_commands_but_not_repair_tools() {
    let db_path = setup_test_db("cli_corrupt");
    init_cli_db(&db_path);

    {
        let pool = DbPool::new(&db_path).unwrap();
        pool.conn
            .execute(
                "INSERT INTO timer_logs (activity_name, start_time, end_time, status, date_time)
                 VALUES ('Write', 'garbage', NULL, 'started', '2025-03-10 09:00:00')",
                [],
            )
            .unwrap();
    }

    pomo()
        .args(["--db", &db_path, "summary", "10.03.2025"])
        .assert()
        .failure()
        .stderr(contains("Session log integrity error"))
        .stderr(contains(db_path.as_str()));

    pomo()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("1 unreadable session row(s)"));
}

#[test]
fn test_erase_missing_and_info() {
    let db_path = setup_test_db("cli_erase_missing");
    init_cli_db(&db_path);

    {
        let pool = DbPool::new(&db_path).unwrap();
        insert_all(&pool, &[started("Write", "2025-03-10 09:00:00")]);
    }

    // startup check adds the missing record
    pomo()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("missing: 1"));

    pomo()
        .args(["--db", &db_path, "db", "--erase-missing"])
        .assert()
        .success()
        .stdout(contains("All missing records have been deleted (1)."));

    pomo()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("erase_missing"))
        .stdout(contains("reconcile"));
}

#[test]
fn test_activities_without_match() {
    let db_path = setup_test_db("cli_activities_empty");
    init_cli_db(&db_path);

    pomo()
        .args(["--db", &db_path, "activities", "nothing"])
        .assert()
        .success()
        .stdout(contains("No matching activities."));
}
