use crate::catalog::HintTier;
use crate::session::{HintUsageRecord, Session};

pub const HINT_PENALTY_MINUTES_PER_TIER: u32 = 2;

/// Highest tier whose attempt threshold the current count has reached, or 0
/// when none has unlocked yet. Schedules are fixed per puzzle and ascending.
pub fn unlocked_tier(schedule: &[HintTier], attempts: u32) -> u8 {
    schedule
        .iter()
        .filter(|entry| attempts >= entry.trigger_attempts)
        .map(|entry| entry.tier)
        .max()
        .unwrap_or(0)
}

/// Records one hint usage. Idempotent per `(puzzle_id, tier)`: re-requesting
/// an already-used tier changes nothing and returns false.
pub fn use_hint(session: &mut Session, puzzle_id: &str, tier: u8, now_ms: i64) -> bool {
    let already_used = session
        .hints
        .iter()
        .any(|record| record.puzzle_id == puzzle_id && record.tier == tier);
    if already_used {
        return false;
    }
    session.hints.push(HintUsageRecord {
        puzzle_id: puzzle_id.to_string(),
        tier,
        timestamp: now_ms,
    });
    session.hints_used = session.hints.len() as u32;
    true
}

/// Advisory handicap shown to the players. Never subtracted from the actual
/// elapsed-time computation.
pub fn hint_penalty_minutes(hints_used: u32) -> u32 {
    hints_used.saturating_mul(HINT_PENALTY_MINUTES_PER_TIER)
}
