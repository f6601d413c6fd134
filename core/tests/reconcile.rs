use std::collections::BTreeMap;

use twogether_core::patch::{apply_full, apply_patch};
use twogether_core::progression::{record_attempt, solve};
use twogether_core::protocol::{decode, encode};
use twogether_core::{
    HintUsageRecord, Phase, Player, PuzzleProgress, Role, Session, SessionPatch, SyncMsg,
};

fn session() -> Session {
    Session::new("session-1", "ABCDEF", 0)
}

fn progress(solved: bool, attempts: u32) -> PuzzleProgress {
    PuzzleProgress {
        solved,
        attempts,
        data: Vec::new(),
    }
}

#[test]
fn a_patch_cannot_unsolve_a_puzzle() {
    let mut local = session();
    solve(&mut local, "music_box");
    record_attempt(&mut local, "music_box");

    let mut states = BTreeMap::new();
    states.insert("music_box".to_string(), progress(false, 0));
    apply_patch(
        &mut local,
        &SessionPatch {
            puzzle_states: Some(states),
            ..SessionPatch::default()
        },
    );
    let merged = local.puzzle("music_box").unwrap();
    assert!(merged.solved);
    assert_eq!(merged.attempts, 1);
}

#[test]
fn patch_retains_puzzles_the_sender_did_not_know() {
    let mut local = session();
    solve(&mut local, "pendulum");

    let mut states = BTreeMap::new();
    states.insert("cryptex".to_string(), progress(true, 2));
    apply_patch(
        &mut local,
        &SessionPatch {
            puzzle_states: Some(states),
            ..SessionPatch::default()
        },
    );
    assert!(local.puzzle("pendulum").unwrap().solved);
    assert!(local.puzzle("cryptex").unwrap().solved);
}

#[test]
fn completed_rooms_union_without_reordering() {
    let mut local = session();
    local.rooms_completed = vec!["attic".to_string(), "clock_tower".to_string()];
    apply_patch(
        &mut local,
        &SessionPatch {
            rooms_completed: Some(vec![
                "clock_tower".to_string(),
                "garden_conservatory".to_string(),
            ]),
            ..SessionPatch::default()
        },
    );
    assert_eq!(
        local.rooms_completed,
        vec![
            "attic".to_string(),
            "clock_tower".to_string(),
            "garden_conservatory".to_string(),
        ]
    );
}

#[test]
fn hint_records_union_by_puzzle_and_tier() {
    let mut local = session();
    local.hints.push(HintUsageRecord {
        puzzle_id: "music_box".to_string(),
        tier: 1,
        timestamp: 1_000,
    });
    local.hints_used = 1;

    apply_patch(
        &mut local,
        &SessionPatch {
            hints: Some(vec![
                HintUsageRecord {
                    puzzle_id: "music_box".to_string(),
                    tier: 1,
                    timestamp: 9_000,
                },
                HintUsageRecord {
                    puzzle_id: "cryptex".to_string(),
                    tier: 1,
                    timestamp: 9_500,
                },
            ]),
            ..SessionPatch::default()
        },
    );
    assert_eq!(local.hints.len(), 2);
    assert_eq!(local.hints_used, 2);
}

#[test]
fn counters_never_move_backwards() {
    let mut local = session();
    local.total_attempts = 7;
    local.total_pause_time = 4_000;
    apply_patch(
        &mut local,
        &SessionPatch {
            total_attempts: Some(3),
            total_pause_time: Some(6_000),
            ..SessionPatch::default()
        },
    );
    assert_eq!(local.total_attempts, 7);
    assert_eq!(local.total_pause_time, 6_000);
}

#[test]
fn a_stale_phase_cannot_reopen_a_completed_session() {
    let mut local = session();
    local.current_phase = Phase::Completed;
    local.completed_at = Some(2_000);
    apply_patch(
        &mut local,
        &SessionPatch {
            current_phase: Some(Phase::Playing),
            ..SessionPatch::default()
        },
    );
    assert_eq!(local.current_phase, Phase::Completed);
}

#[test]
fn full_replacement_keeps_local_progress() {
    let mut local = session();
    solve(&mut local, "music_box");
    local.rooms_completed = vec!["attic".to_string()];

    let mut incoming = session();
    incoming.current_room = "clock_tower".to_string();
    solve(&mut incoming, "pendulum");

    apply_full(&mut local, &incoming);
    assert_eq!(local.current_room, "clock_tower");
    assert!(local.puzzle("music_box").unwrap().solved);
    assert!(local.puzzle("pendulum").unwrap().solved);
    assert_eq!(local.rooms_completed, vec!["attic".to_string()]);
}

#[test]
fn full_replacement_syncs_player_roles_to_slots() {
    let mut local = session();
    let mut incoming = session();
    incoming.slot_roles = [Role::Guide, Role::Explorer];
    incoming.players[0] = Some(Player {
        id: "ada".to_string(),
        name: "Ada".to_string(),
        role: Role::Explorer,
    });
    apply_full(&mut local, &incoming);
    assert_eq!(local.players[0].as_ref().unwrap().role, Role::Guide);
}

#[test]
fn sync_messages_round_trip_through_the_codec() {
    let mut states = BTreeMap::new();
    states.insert("glass_vials".to_string(), progress(true, 3));
    let msg = SyncMsg::Patch {
        patch: SessionPatch {
            current_room: Some("garden_conservatory".to_string()),
            puzzle_states: Some(states),
            ..SessionPatch::default()
        },
    };
    let bytes = encode(&msg).unwrap();
    let decoded: SyncMsg = decode(&bytes).unwrap();
    let SyncMsg::Patch { patch } = decoded else {
        panic!("expected patch");
    };
    assert_eq!(patch.current_room.as_deref(), Some("garden_conservatory"));
    assert!(patch.puzzle_states.unwrap()["glass_vials"].solved);
}
