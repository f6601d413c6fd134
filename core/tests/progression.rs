use twogether_core::catalog::{puzzles_in_room, ROOM_ORDER};
use twogether_core::progression::{
    complete_room, record_attempt, room_complete, solve, RoomOutcome,
};
use twogether_core::{Phase, Session};

fn session() -> Session {
    Session::new("session-1", "ABCDEF", 0)
}

fn room_order() -> Vec<String> {
    ROOM_ORDER.iter().map(|room| room.to_string()).collect()
}

fn solve_room(session: &mut Session, room_id: &str) {
    for puzzle_id in puzzles_in_room(room_id) {
        solve(session, puzzle_id);
    }
}

#[test]
fn record_attempt_lazily_creates_state() {
    let mut session = session();
    assert!(session.puzzle("music_box").is_none());
    record_attempt(&mut session, "music_box");
    let progress = session.puzzle("music_box").unwrap();
    assert_eq!(progress.attempts, 1);
    assert!(!progress.solved);
    assert_eq!(session.total_attempts, 1);
}

#[test]
fn attempts_accumulate_per_puzzle_and_session_wide() {
    let mut session = session();
    record_attempt(&mut session, "music_box");
    record_attempt(&mut session, "music_box");
    record_attempt(&mut session, "cryptex");
    assert_eq!(session.puzzle("music_box").unwrap().attempts, 2);
    assert_eq!(session.puzzle("cryptex").unwrap().attempts, 1);
    assert_eq!(session.total_attempts, 3);
}

#[test]
fn solve_is_monotonic() {
    let mut session = session();
    assert!(solve(&mut session, "music_box"));
    assert!(!solve(&mut session, "music_box"));
    assert!(session.puzzle("music_box").unwrap().solved);
}

#[test]
fn empty_puzzle_set_never_completes() {
    let session = session();
    assert!(!room_complete(&session, &[]));
}

#[test]
fn room_completion_requires_every_puzzle() {
    let mut session = session();
    solve(&mut session, "music_box");
    solve(&mut session, "mirror_reflection");
    assert!(!room_complete(&session, puzzles_in_room("attic")));
    solve(&mut session, "mysterious_painting");
    solve(&mut session, "treasure_chest");
    assert!(room_complete(&session, puzzles_in_room("attic")));
}

#[test]
fn completing_attic_advances_to_clock_tower_once() {
    let mut session = session();
    let order = room_order();
    solve_room(&mut session, "attic");

    let outcome = complete_room(&mut session, "attic", &order, 1_000);
    assert_eq!(
        outcome,
        Some(RoomOutcome::Advanced {
            from: "attic".to_string(),
            to: "clock_tower".to_string(),
        })
    );
    assert_eq!(session.rooms_completed, vec!["attic".to_string()]);
    assert_eq!(session.current_room, "clock_tower");

    assert_eq!(complete_room(&mut session, "attic", &order, 2_000), None);
    assert_eq!(session.rooms_completed, vec!["attic".to_string()]);
}

#[test]
fn completing_the_last_room_is_victory() {
    let mut session = session();
    let order = room_order();
    for room_id in ROOM_ORDER {
        solve_room(&mut session, room_id);
        complete_room(&mut session, room_id, &order, 5_000);
    }
    assert_eq!(session.rooms_completed.len(), ROOM_ORDER.len());
    assert_eq!(session.current_phase, Phase::Completed);
    assert_eq!(session.completed_at, Some(5_000));
}

#[test]
fn unknown_room_is_not_appended() {
    let mut session = session();
    let order = room_order();
    assert_eq!(complete_room(&mut session, "cellar", &order, 0), None);
    assert!(session.rooms_completed.is_empty());
}
