use crate::phase::set_phase;
use crate::session::{Phase, Session};

/// Outcome of completing a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomOutcome {
    Advanced { from: String, to: String },
    Victory,
}

/// Increments the puzzle's attempt counter and the session-wide total.
/// The puzzle entry is created lazily with zero defaults on first contact.
pub fn record_attempt(session: &mut Session, puzzle_id: &str) {
    let progress = session
        .puzzle_states
        .entry(puzzle_id.to_string())
        .or_default();
    progress.attempts = progress.attempts.saturating_add(1);
    session.total_attempts = session.total_attempts.saturating_add(1);
}

/// Marks a puzzle solved. Returns whether it was newly solved; `solved`
/// only ever moves false → true.
pub fn solve(session: &mut Session, puzzle_id: &str) -> bool {
    let progress = session
        .puzzle_states
        .entry(puzzle_id.to_string())
        .or_default();
    if progress.solved {
        return false;
    }
    progress.solved = true;
    true
}

/// Whether every puzzle of the given set is solved. An empty set never
/// counts as complete.
pub fn room_complete(session: &Session, puzzle_ids: &[&str]) -> bool {
    if puzzle_ids.is_empty() {
        return false;
    }
    puzzle_ids
        .iter()
        .all(|id| session.puzzle(id).is_some_and(|progress| progress.solved))
}

/// Appends the room to `rooms_completed` (once) and advances along the fixed
/// room order: either the next room becomes current, or — when the completed
/// room was the last — the session is forced into `Completed` with a victory.
///
/// Rooms not in the supplied order, and rooms already completed, are no-ops.
pub fn complete_room(
    session: &mut Session,
    room_id: &str,
    room_order: &[String],
    now_ms: i64,
) -> Option<RoomOutcome> {
    if session.is_room_completed(room_id) {
        return None;
    }
    let position = room_order.iter().position(|room| room == room_id)?;
    session.rooms_completed.push(room_id.to_string());
    match room_order.get(position + 1) {
        Some(next_room) => {
            let from = room_id.to_string();
            session.current_room = next_room.clone();
            Some(RoomOutcome::Advanced {
                from,
                to: next_room.clone(),
            })
        }
        None => {
            set_phase(session, Phase::Completed, now_ms);
            Some(RoomOutcome::Victory)
        }
    }
}
