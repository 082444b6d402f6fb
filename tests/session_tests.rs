mod common;
use common::{open_test_pool, transitions_for, ts};
use pomolog::core::scheduler::{CountdownEnd, ImmediateScheduler, TICK, run_countdown};
use pomolog::core::session::{Countdown, SessionState, Tick};
use pomolog::core::start::StartLogic;
use pomolog::core::timer::TimerRequest;
use pomolog::db::activities::all_activities;
use pomolog::db::queries::load_all_events;
use pomolog::db::transitions::read_transitions;
use pomolog::errors::AppError;
use pomolog::models::status::SessionStatus;
use std::cell::Cell;
use std::ops::ControlFlow;

fn request(total_secs: i64, notify_before_secs: i64) -> TimerRequest {
    TimerRequest {
        ends_at: ts("2025-03-10 09:00:00") + chrono::Duration::seconds(total_secs),
        total_secs,
        notify_before_secs,
    }
}

#[test]
fn test_state_transitions() {
    let now = ts("2025-03-10 09:00:00");
    let req = request(1500, 0);

    let (running, ev) = SessionState::Idle.start(" Write ", &req, now).unwrap();
    assert!(running.is_running());
    assert_eq!(ev.status, SessionStatus::Started);
    assert_eq!(ev.activity_name, "Write");
    assert_eq!(ev.start_time, Some(now));

    let later = ts("2025-03-10 09:25:00");
    let (done, ev) = running.clone().finish(later).unwrap();
    assert_eq!(
        done,
        SessionState::Finished {
            activity: "Write".into(),
            at: later
        }
    );
    assert_eq!(ev.status, SessionStatus::Finished);
    assert_eq!(ev.end_time, Some(later));
    assert_eq!(ev.start_time, None);

    let (stopped, ev) = running.cancel(later).unwrap();
    assert!(matches!(stopped, SessionState::Cancelled { .. }));
    assert_eq!(ev.status, SessionStatus::Cancelled);
}

#[test]
fn test_invalid_transitions() {
    let now = ts("2025-03-10 09:00:00");
    let req = request(60, 0);

    assert!(matches!(
        SessionState::Idle.cancel(now),
        Err(AppError::NoOpenSession)
    ));
    assert!(matches!(
        SessionState::Idle.finish(now),
        Err(AppError::NoOpenSession)
    ));

    let (running, _) = SessionState::Idle.start("A", &req, now).unwrap();
    assert!(matches!(
        running.start("B", &req, now),
        Err(AppError::InvalidTransition(_))
    ));
}

#[test]
fn test_countdown_ticks_down_and_reminds_once() {
    let mut cd = Countdown::new(3, 2);

    let mut reminders = Vec::new();
    while let Tick::Running(info) = cd.tick() {
        reminders.push((info.remaining_secs, info.remind));
    }

    assert_eq!(reminders, vec![(3, false), (2, true), (1, false)]);
    assert_eq!(cd.remaining_secs(), 0);
    assert_eq!(cd.tick(), Tick::Expired);
}

#[test]
fn test_countdown_without_reminder() {
    let mut cd = Countdown::new(2, 0);
    while let Tick::Running(info) = cd.tick() {
        assert!(!info.remind);
    }
}

#[test]
fn test_tick_info_progress() {
    let mut cd = Countdown::new(4, 0);
    let Tick::Running(first) = cd.tick() else {
        panic!("expected a running tick");
    };
    assert_eq!(first.progress_pct(), 0);
    assert_eq!(first.time_left(), "00:00:04");
    assert_eq!(first.total(), "00:00:04");

    cd.tick();
    let Tick::Running(third) = cd.tick() else {
        panic!("expected a running tick");
    };
    assert_eq!(third.progress_pct(), 50);
}

#[test]
fn test_run_countdown_to_expiry() {
    let mut cd = Countdown::new(3, 0);
    let mut sched = ImmediateScheduler::default();
    let mut seen = Vec::new();

    let end = run_countdown(&mut cd, &mut sched, |info| {
        seen.push(info.remaining_secs);
        ControlFlow::Continue(())
    });

    assert_eq!(end, CountdownEnd::Expired);
    assert_eq!(seen, vec![3, 2, 1]);
    assert_eq!(sched.delays, vec![TICK; 3]);
}

#[test]
fn test_run_countdown_stopped_by_callback() {
    let mut cd = Countdown::new(10, 0);
    let mut sched = ImmediateScheduler::default();

    let end = run_countdown(&mut cd, &mut sched, |info| {
        if info.remaining_secs == 8 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    assert_eq!(end, CountdownEnd::Stopped);
    assert_eq!(sched.delays.len(), 2);
}

#[test]
fn test_zero_length_countdown_expires_at_once() {
    let mut cd = Countdown::new(0, 0);
    let mut sched = ImmediateScheduler::default();

    let end = run_countdown(&mut cd, &mut sched, |_| ControlFlow::Continue(()));

    assert_eq!(end, CountdownEnd::Expired);
    assert!(sched.delays.is_empty());
}

#[test]
fn test_full_session_logs_start_and_finish() {
    let mut pool = open_test_pool("session_finish");
    let transitions = transitions_for(&pool.path);

    // every call to the clock advances one minute
    let minute = Cell::new(0);
    let clock = || {
        let t = ts("2025-03-10 09:00:00") + chrono::Duration::minutes(minute.get());
        minute.set(minute.get() + 1);
        t
    };

    let state = StartLogic::run(
        &mut pool,
        &transitions,
        "Write",
        &request(5, 0),
        &mut ImmediateScheduler::default(),
        |_| ControlFlow::Continue(()),
        clock,
    )
    .unwrap();

    assert!(matches!(state, SessionState::Finished { .. }));

    let events = load_all_events(&pool.conn).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].status, SessionStatus::Started);
    assert_eq!(events[0].start_time, Some(ts("2025-03-10 09:00:00")));
    assert_eq!(events[1].status, SessionStatus::Finished);
    assert_eq!(events[1].end_time, Some(ts("2025-03-10 09:01:00")));

    assert_eq!(all_activities(&pool.conn).unwrap(), vec!["Write".to_string()]);

    let lines = read_transitions(&transitions).unwrap();
    assert_eq!(
        lines,
        vec![
            (
                "2025-03-10 09:00:00".to_string(),
                "started".to_string(),
                "Write".to_string()
            ),
            (
                "2025-03-10 09:01:00".to_string(),
                "finished".to_string(),
                "Write".to_string()
            ),
        ]
    );
}

#[test]
fn test_stopped_session_is_cancelled() {
    let mut pool = open_test_pool("session_cancel");
    let transitions = transitions_for(&pool.path);

    let state = StartLogic::run(
        &mut pool,
        &transitions,
        "",
        &request(60, 0),
        &mut ImmediateScheduler::default(),
        |_| ControlFlow::Break(()),
        || ts("2025-03-10 09:00:00"),
    )
    .unwrap();

    assert!(matches!(state, SessionState::Cancelled { .. }));

    let statuses: Vec<SessionStatus> = load_all_events(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.status)
        .collect();
    assert_eq!(statuses, vec![SessionStatus::Started, SessionStatus::Cancelled]);

    // blank activity: nothing registered, placeholder label in the file
    assert!(all_activities(&pool.conn).unwrap().is_empty());
    let lines = read_transitions(&transitions).unwrap();
    assert_eq!(lines[0].2, "No activity");
}
