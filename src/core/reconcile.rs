//! Repair of sessions that were started but never closed.
//!
//! The log is walked once in chronological order with a one-event
//! lookahead. A `started` event is dangling when the next event neither
//! closes anything (no end time) nor belongs to the same activity, or when
//! there is no next event at all. Each dangling session gets one synthetic
//! `missing` event whose end time is the session's own start time: the
//! real end is unknown, so the placeholder records a zero-length session.

use crate::models::session_event::SessionEvent;
use crate::models::status::SessionStatus;
use chrono::NaiveDateTime;
use std::collections::HashSet;

/// Compute the `missing` events that close every dangling session in
/// `events`. The input does not need to be sorted; existing events are
/// never modified and the caller appends the result to the log.
pub fn reconcile(events: &[SessionEvent]) -> Vec<SessionEvent> {
    let mut sorted: Vec<&SessionEvent> = events.iter().collect();
    // stable: equal timestamps keep insertion order
    sorted.sort_by_key(|ev| ev.sort_key());

    // Repairs already present in the log. With several events sharing one
    // timestamp a previous repair may not sit right after its session.
    let repaired: HashSet<(&str, NaiveDateTime)> = sorted
        .iter()
        .filter(|ev| ev.status == SessionStatus::Missing)
        .filter_map(|ev| ev.end_time.map(|t| (ev.activity_name.as_str(), t)))
        .collect();

    let mut out = Vec::new();

    for (i, cur) in sorted.iter().enumerate() {
        let next = sorted.get(i + 1);

        if !is_dangling(cur, next.copied()) {
            continue;
        }

        // a started row without a usable start time is left as-is
        let Some(started_at) = cur.start_time else {
            continue;
        };

        if repaired.contains(&(cur.activity_name.as_str(), started_at)) {
            continue;
        }

        out.push(SessionEvent::closed(
            &cur.activity_name,
            started_at,
            SessionStatus::Missing,
        ));
    }

    out
}

fn is_dangling(cur: &SessionEvent, next: Option<&SessionEvent>) -> bool {
    if cur.status != SessionStatus::Started {
        return false;
    }

    match next {
        None => true,
        Some(nxt) => nxt.end_time.is_none() && nxt.activity_name != cur.activity_name,
    }
}
