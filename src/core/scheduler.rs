//! Cooperative scheduling of countdown ticks.

use super::session::{Countdown, Tick, TickInfo};
use std::ops::ControlFlow;
use std::time::Duration;

/// One countdown step.
pub const TICK: Duration = Duration::from_secs(1);

/// Runs a callback once after a delay. Implementations run on the calling
/// thread: `schedule_after` returns once the callback has run.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, callback: &mut dyn FnMut());
}

/// Wall-clock scheduler that sleeps the current thread.
#[derive(Debug, Default)]
pub struct SleepScheduler;

impl Scheduler for SleepScheduler {
    fn schedule_after(&mut self, delay: Duration, callback: &mut dyn FnMut()) {
        std::thread::sleep(delay);
        callback();
    }
}

/// Scheduler that fires immediately and records the requested delays.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    pub delays: Vec<Duration>,
}

impl Scheduler for ImmediateScheduler {
    fn schedule_after(&mut self, delay: Duration, callback: &mut dyn FnMut()) {
        self.delays.push(delay);
        callback();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEnd {
    /// Remaining time reached zero.
    Expired,
    /// `on_tick` asked to stop, or the scheduler dropped the next tick.
    Stopped,
}

/// Drive `countdown` to completion, one tick per [`TICK`].
pub fn run_countdown<S, F>(countdown: &mut Countdown, scheduler: &mut S, mut on_tick: F) -> CountdownEnd
where
    S: Scheduler + ?Sized,
    F: FnMut(&TickInfo) -> ControlFlow<()>,
{
    let mut current = countdown.tick();

    loop {
        let info = match current {
            Tick::Expired => return CountdownEnd::Expired,
            Tick::Running(info) => info,
        };

        if on_tick(&info).is_break() {
            return CountdownEnd::Stopped;
        }

        let mut next = None;
        scheduler.schedule_after(TICK, &mut || next = Some(countdown.tick()));

        match next {
            Some(t) => current = t,
            None => return CountdownEnd::Stopped,
        }
    }
}
