use super::journal::record;
use super::scheduler::{CountdownEnd, Scheduler, run_countdown};
use super::session::{Countdown, SessionState, TickInfo};
use super::timer::TimerRequest;
use crate::db::activities::add_activity;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::NaiveDateTime;
use std::ops::ControlFlow;
use std::path::Path;

/// High-level business logic for a timer session.
pub struct StartLogic;

impl StartLogic {
    /// Register the activity and log the `started` transition.
    pub fn begin(
        pool: &mut DbPool,
        transitions: &Path,
        activity: &str,
        request: &TimerRequest,
        now: NaiveDateTime,
    ) -> AppResult<SessionState> {
        add_activity(&pool.conn, activity)?;

        let (state, event) = SessionState::Idle.start(activity, request, now)?;
        record(&pool.conn, transitions, &event)?;
        Ok(state)
    }

    /// Explicit stop: log `cancelled`.
    pub fn stop(
        pool: &mut DbPool,
        transitions: &Path,
        state: SessionState,
        now: NaiveDateTime,
    ) -> AppResult<SessionState> {
        let (state, event) = state.cancel(now)?;
        record(&pool.conn, transitions, &event)?;
        Ok(state)
    }

    /// Countdown expired: log `finished`.
    pub fn finish(
        pool: &mut DbPool,
        transitions: &Path,
        state: SessionState,
        now: NaiveDateTime,
    ) -> AppResult<SessionState> {
        let (state, event) = state.finish(now)?;
        record(&pool.conn, transitions, &event)?;
        Ok(state)
    }

    /// Full session: begin, count down one tick at a time through
    /// `scheduler`, then finish or stop.
    ///
    /// `on_tick` renders progress and returns `Break` when the user asked
    /// to stop. `clock` supplies the timestamps written to the log.
    pub fn run<S, F, C>(
        pool: &mut DbPool,
        transitions: &Path,
        activity: &str,
        request: &TimerRequest,
        scheduler: &mut S,
        on_tick: F,
        clock: C,
    ) -> AppResult<SessionState>
    where
        S: Scheduler + ?Sized,
        F: FnMut(&TickInfo) -> ControlFlow<()>,
        C: Fn() -> NaiveDateTime,
    {
        let state = Self::begin(pool, transitions, activity, request, clock())?;

        let mut countdown = Countdown::from_request(request);
        match run_countdown(&mut countdown, scheduler, on_tick) {
            CountdownEnd::Expired => Self::finish(pool, transitions, state, clock()),
            CountdownEnd::Stopped => Self::stop(pool, transitions, state, clock()),
        }
    }
}
