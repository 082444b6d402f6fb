//! Session state machine and countdown bookkeeping.
//!
//! Transitions are pure: each one consumes the current state and returns
//! the next state together with the event that must be logged.

use super::timer::TimerRequest;
use crate::errors::{AppError, AppResult};
use crate::models::session_event::SessionEvent;
use crate::models::status::SessionStatus;
use crate::utils::time::format_duration;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Started {
        activity: String,
        started_at: NaiveDateTime,
        ends_at: NaiveDateTime,
        notify_before_secs: i64,
    },
    Cancelled {
        activity: String,
        at: NaiveDateTime,
    },
    Finished {
        activity: String,
        at: NaiveDateTime,
    },
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Started { .. })
    }

    pub fn start(
        self,
        activity: &str,
        request: &TimerRequest,
        now: NaiveDateTime,
    ) -> AppResult<(SessionState, SessionEvent)> {
        if self.is_running() {
            return Err(AppError::InvalidTransition(
                "a session is already running".into(),
            ));
        }

        let activity = activity.trim().to_string();
        let event = SessionEvent::started(&activity, now);
        let state = SessionState::Started {
            activity,
            started_at: now,
            ends_at: request.ends_at,
            notify_before_secs: request.notify_before_secs,
        };
        Ok((state, event))
    }

    /// Explicit user stop.
    pub fn cancel(self, now: NaiveDateTime) -> AppResult<(SessionState, SessionEvent)> {
        self.close(now, SessionStatus::Cancelled)
    }

    /// Countdown reached zero.
    pub fn finish(self, now: NaiveDateTime) -> AppResult<(SessionState, SessionEvent)> {
        self.close(now, SessionStatus::Finished)
    }

    fn close(
        self,
        now: NaiveDateTime,
        status: SessionStatus,
    ) -> AppResult<(SessionState, SessionEvent)> {
        let SessionState::Started { activity, .. } = self else {
            return Err(AppError::NoOpenSession);
        };

        let event = SessionEvent::closed(&activity, now, status);
        let state = match status {
            SessionStatus::Finished => SessionState::Finished { activity, at: now },
            _ => SessionState::Cancelled { activity, at: now },
        };
        Ok((state, event))
    }
}

/// What one countdown step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Running(TickInfo),
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    pub remaining_secs: i64,
    pub total_secs: i64,
    /// True on the single tick where the remaining time equals the
    /// reminder threshold.
    pub remind: bool,
}

impl TickInfo {
    pub fn time_left(&self) -> String {
        format_duration(self.remaining_secs)
    }

    pub fn total(&self) -> String {
        format_duration(self.total_secs)
    }

    /// Elapsed share of the session, 0..=100.
    pub fn progress_pct(&self) -> u8 {
        if self.total_secs <= 0 {
            return 100;
        }
        let elapsed = (self.total_secs - self.remaining_secs).clamp(0, self.total_secs);
        ((elapsed * 100) / self.total_secs) as u8
    }
}

/// Remaining time of a running session, advanced once per second.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_secs: i64,
    total_secs: i64,
    notify_before_secs: i64,
}

impl Countdown {
    pub fn new(total_secs: i64, notify_before_secs: i64) -> Self {
        Self {
            remaining_secs: total_secs,
            total_secs,
            notify_before_secs,
        }
    }

    pub fn from_request(request: &TimerRequest) -> Self {
        Self::new(request.total_secs, request.notify_before_secs)
    }

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    /// Report the current second and move one second forward.
    pub fn tick(&mut self) -> Tick {
        if self.remaining_secs <= 0 {
            return Tick::Expired;
        }

        let info = TickInfo {
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            remind: self.remaining_secs == self.notify_before_secs,
        };
        self.remaining_secs -= 1;
        Tick::Running(info)
    }
}
