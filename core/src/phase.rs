use crate::session::{Phase, Session};

/// Applies one phase transition. Returns whether the session changed.
///
/// Timer bookkeeping follows the edge table: entering `Playing` from the
/// lobby starts the clock once, `Playing ⇄ Paused` accumulates pause time,
/// and any edge into `Completed` stamps `completed_at` so elapsed time stops
/// ticking. Edges outside the table move `current_phase` without touching
/// the timers. `Completed` is terminal.
pub fn set_phase(session: &mut Session, next: Phase, now_ms: i64) -> bool {
    if session.current_phase == next {
        return false;
    }
    if session.current_phase == Phase::Completed {
        return false;
    }
    match (session.current_phase, next) {
        (Phase::Lobby, Phase::Playing) => {
            if session.started_at.is_none() {
                session.started_at = Some(now_ms);
            }
        }
        (Phase::Playing, Phase::Paused) => {
            session.paused_at = Some(now_ms);
        }
        (Phase::Paused, Phase::Playing) => {
            if let Some(paused_at) = session.paused_at.take() {
                session.total_pause_time += (now_ms - paused_at).max(0);
            }
        }
        (_, Phase::Completed) => {
            session.completed_at = Some(now_ms);
        }
        _ => {}
    }
    session.current_phase = next;
    true
}

/// Play time in milliseconds, excluding pauses. Frozen at the pause instant
/// while paused and at the earlier of pause/completion once completed.
pub fn elapsed_ms(session: &Session, now_ms: i64) -> i64 {
    let Some(started_at) = session.started_at else {
        return 0;
    };
    let end = match (session.completed_at, session.paused_at) {
        (Some(completed_at), Some(paused_at)) => completed_at.min(paused_at),
        (Some(completed_at), None) => completed_at,
        (None, Some(paused_at)) => paused_at,
        (None, None) => now_ms,
    };
    (end - started_at - session.total_pause_time).max(0)
}

/// Milliseconds of budget left, or `None` when the session has no deadline.
pub fn remaining_ms(session: &Session, now_ms: i64) -> Option<i64> {
    let limit = session.time_limit?;
    Some(limit - elapsed_ms(session, now_ms))
}

pub fn is_timed_out(session: &Session, now_ms: i64) -> bool {
    session.started_at.is_some() && matches!(remaining_ms(session, now_ms), Some(rest) if rest <= 0)
}
