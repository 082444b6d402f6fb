use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scheduler::SleepScheduler;
use crate::core::session::{SessionState, TickInfo};
use crate::core::start::StartLogic;
use crate::core::timer::TimerRequest;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, reminder, success, warning};
use chrono::{Local, NaiveDateTime};
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver};
use std::thread;

const BAR_WIDTH: usize = 20;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Watch stdin on a helper thread: any line (plain Enter included) is a
/// stop request. End of input never stops the countdown.
fn stop_requests() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        if let Ok(n) = io::stdin().lock().read_line(&mut line)
            && n > 0
        {
            let _ = tx.send(());
        }
    });
    rx
}

fn render_tick(info: &TickInfo) {
    let pct = info.progress_pct() as usize;
    let filled = pct * BAR_WIDTH / 100;
    print!(
        "\r⏳ Time left: {} / {}  [{}{}] {:>3}%",
        info.time_left(),
        info.total(),
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        pct
    );
    let _ = io::stdout().flush();
}

pub fn handle(cmd: &Commands, cfg: &Config, pool: &mut DbPool) -> AppResult<()> {
    if let Commands::Start {
        activity,
        duration,
        end,
        notify,
    } = cmd
    {
        //
        // 1. Validate input before touching the log
        //
        let default_duration = cfg.default_duration.map(|m| m.to_string());
        let default_notify = cfg.default_notify_before.to_string();

        let request = TimerRequest::parse(
            duration.as_deref().or(default_duration.as_deref()),
            end.as_deref(),
            notify.as_deref().or(Some(default_notify.as_str())),
            now(),
        )?;

        let activity = activity.as_deref().unwrap_or("").trim().to_string();
        let label = if activity.is_empty() {
            "No activity"
        } else {
            activity.as_str()
        };

        info(format!(
            "Started '{}' until {} (press Enter to stop)",
            label,
            request.ends_at.format("%H:%M:%S")
        ));

        //
        // 2. Count down
        //
        let stops = stop_requests();
        let notify_minutes = request.notify_before_secs / 60;
        let transitions = cfg.transitions_path();
        let mut scheduler = SleepScheduler;

        let state = StartLogic::run(
            pool,
            &transitions,
            &activity,
            &request,
            &mut scheduler,
            |tick| {
                render_tick(tick);
                if tick.remind {
                    println!();
                    reminder(format!("{} minutes left!", notify_minutes));
                }
                if stops.try_recv().is_ok() {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
            now,
        )?;
        println!();

        //
        // 3. Report
        //
        match state {
            SessionState::Finished { .. } => {
                success("Time's up! Your session has ended.");
            }
            SessionState::Cancelled { at, .. } => {
                warning(format!("Session cancelled at {}", at.format("%H:%M:%S")));
            }
            _ => {}
        }
    }

    Ok(())
}
