use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roles::sync_player_roles;
use crate::session::{HintUsageRecord, Phase, Player, PuzzleProgress, Role, Session};

/// A partial session update from the other client. Present fields replace
/// the receiver's field wholesale (a patch must carry the full sub-object it
/// intends to change), except the monotonic fields below which merge by
/// idempotent union so no update can lose progress:
///
/// - per-puzzle `solved` ORs, `attempts` takes the max
/// - `rooms_completed` keeps the receiver's order and appends unseen rooms
/// - hint records union by `(puzzle_id, tier)`, `hints_used` is recomputed
/// - `total_attempts` and `total_pause_time` take the max
///
/// Everything else is last-write-wins; the two clients converge because the
/// union part is commutative and the rest is overwritten identically by the
/// final writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionPatch {
    pub current_phase: Option<Phase>,
    pub current_room: Option<String>,
    pub rooms_completed: Option<Vec<String>>,
    pub puzzle_states: Option<BTreeMap<String, PuzzleProgress>>,
    pub players: Option<[Option<Player>; 2]>,
    pub slot_roles: Option<[Role; 2]>,
    pub roles_assigned: Option<bool>,
    pub started_at: Option<Option<i64>>,
    pub paused_at: Option<Option<i64>>,
    pub completed_at: Option<Option<i64>>,
    pub total_pause_time: Option<i64>,
    pub time_limit: Option<Option<i64>>,
    pub hints: Option<Vec<HintUsageRecord>>,
    pub total_attempts: Option<u32>,
}

pub fn apply_patch(session: &mut Session, patch: &SessionPatch) {
    if let Some(next) = patch.current_phase {
        // Completed is terminal; a stale remote phase cannot reopen it.
        if session.current_phase != Phase::Completed {
            session.current_phase = next;
        }
    }
    if let Some(room) = &patch.current_room {
        session.current_room = room.clone();
    }
    if let Some(rooms) = &patch.rooms_completed {
        session.rooms_completed = merge_rooms_completed(&session.rooms_completed, rooms);
    }
    if let Some(states) = &patch.puzzle_states {
        session.puzzle_states = merge_puzzle_states(&session.puzzle_states, states.clone());
    }
    if let Some(players) = &patch.players {
        session.players = players.clone();
    }
    if let Some(roles) = patch.slot_roles {
        session.slot_roles = roles;
    }
    if let Some(assigned) = patch.roles_assigned {
        session.roles_assigned |= assigned;
    }
    if let Some(started_at) = patch.started_at {
        session.started_at = started_at;
    }
    if let Some(paused_at) = patch.paused_at {
        session.paused_at = paused_at;
    }
    if let Some(completed_at) = patch.completed_at {
        session.completed_at = completed_at;
    }
    if let Some(pause_time) = patch.total_pause_time {
        session.total_pause_time = session.total_pause_time.max(pause_time);
    }
    if let Some(time_limit) = patch.time_limit {
        session.time_limit = time_limit;
    }
    if let Some(hints) = &patch.hints {
        session.hints = merge_hints(&session.hints, hints);
        session.hints_used = session.hints.len() as u32;
    }
    if let Some(total) = patch.total_attempts {
        session.total_attempts = session.total_attempts.max(total);
    }
    sync_player_roles(session);
}

/// Full replacement, used on reconnect/resync. The incoming session wins
/// except for the monotonic unions described on [`SessionPatch`], which
/// protect progress the receiver made while offline.
pub fn apply_full(session: &mut Session, incoming: &Session) {
    let mut next = incoming.clone();
    next.puzzle_states = merge_puzzle_states(&session.puzzle_states, next.puzzle_states);
    next.rooms_completed = merge_rooms_completed(&session.rooms_completed, &next.rooms_completed);
    next.hints = merge_hints(&session.hints, &next.hints);
    next.hints_used = next.hints.len() as u32;
    next.total_pause_time = next.total_pause_time.max(session.total_pause_time);
    next.total_attempts = next.total_attempts.max(session.total_attempts);
    next.roles_assigned |= session.roles_assigned;
    if session.current_phase == Phase::Completed {
        next.current_phase = Phase::Completed;
        if next.completed_at.is_none() {
            next.completed_at = session.completed_at;
        }
    }
    sync_player_roles(&mut next);
    *session = next;
}

fn merge_puzzle_states(
    current: &BTreeMap<String, PuzzleProgress>,
    mut incoming: BTreeMap<String, PuzzleProgress>,
) -> BTreeMap<String, PuzzleProgress> {
    for (puzzle_id, local) in current {
        match incoming.get_mut(puzzle_id) {
            Some(remote) => {
                remote.solved |= local.solved;
                remote.attempts = remote.attempts.max(local.attempts);
                if remote.data.is_empty() && !local.data.is_empty() {
                    remote.data = local.data.clone();
                }
            }
            None => {
                incoming.insert(puzzle_id.clone(), local.clone());
            }
        }
    }
    incoming
}

fn merge_rooms_completed(current: &[String], incoming: &[String]) -> Vec<String> {
    let mut merged = current.to_vec();
    for room in incoming {
        if !merged.contains(room) {
            merged.push(room.clone());
        }
    }
    merged
}

fn merge_hints(current: &[HintUsageRecord], incoming: &[HintUsageRecord]) -> Vec<HintUsageRecord> {
    let mut merged = current.to_vec();
    for record in incoming {
        let seen = merged
            .iter()
            .any(|existing| existing.puzzle_id == record.puzzle_id && existing.tier == record.tier);
        if !seen {
            merged.push(record.clone());
        }
    }
    merged
}
