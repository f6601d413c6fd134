use twogether_core::phase::{elapsed_ms, is_timed_out, remaining_ms, set_phase};
use twogether_core::{Phase, Session};

fn session() -> Session {
    Session::new("session-1", "ABCDEF", 0)
}

#[test]
fn entering_playing_starts_the_clock_once() {
    let mut session = session();
    assert!(set_phase(&mut session, Phase::Playing, 1_000));
    assert_eq!(session.started_at, Some(1_000));

    set_phase(&mut session, Phase::Paused, 2_000);
    set_phase(&mut session, Phase::Playing, 3_000);
    assert_eq!(session.started_at, Some(1_000));
}

#[test]
fn same_phase_is_a_no_op() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 1_000);
    assert!(!set_phase(&mut session, Phase::Playing, 5_000));
    assert_eq!(session.started_at, Some(1_000));
}

#[test]
fn pause_accounting_matches_wall_clock() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 0);
    set_phase(&mut session, Phase::Paused, 10_000);
    assert_eq!(session.paused_at, Some(10_000));
    assert_eq!(elapsed_ms(&session, 12_000), 10_000);

    set_phase(&mut session, Phase::Playing, 15_000);
    assert_eq!(session.paused_at, None);
    assert_eq!(session.total_pause_time, 5_000);
    assert_eq!(elapsed_ms(&session, 20_000), 15_000);
}

#[test]
fn completion_freezes_elapsed_time() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 0);
    set_phase(&mut session, Phase::Completed, 30_000);
    assert_eq!(session.completed_at, Some(30_000));
    assert_eq!(elapsed_ms(&session, 90_000), 30_000);
}

#[test]
fn completing_while_paused_freezes_at_the_pause_instant() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 0);
    set_phase(&mut session, Phase::Paused, 10_000);
    set_phase(&mut session, Phase::Completed, 14_000);
    assert_eq!(elapsed_ms(&session, 60_000), 10_000);
}

#[test]
fn completed_is_terminal() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 0);
    set_phase(&mut session, Phase::Completed, 1_000);
    assert!(!set_phase(&mut session, Phase::Playing, 2_000));
    assert_eq!(session.current_phase, Phase::Completed);
}

#[test]
fn off_table_edges_move_the_phase_without_timer_bookkeeping() {
    let mut session = session();
    assert!(set_phase(&mut session, Phase::Paused, 1_000));
    assert_eq!(session.current_phase, Phase::Paused);
    assert_eq!(session.started_at, None);
    assert_eq!(session.paused_at, None);
}

#[test]
fn elapsed_is_zero_before_the_clock_starts() {
    let session = session();
    assert_eq!(elapsed_ms(&session, 99_000), 0);
}

#[test]
fn remaining_budget_counts_down_play_time_only() {
    let mut session = session();
    session.time_limit = Some(60_000);
    set_phase(&mut session, Phase::Playing, 0);
    set_phase(&mut session, Phase::Paused, 10_000);
    set_phase(&mut session, Phase::Playing, 30_000);
    assert_eq!(remaining_ms(&session, 40_000), Some(40_000));
    assert!(!is_timed_out(&session, 40_000));
}

#[test]
fn exceeding_the_limit_times_out() {
    let mut session = session();
    session.time_limit = Some(60_000);
    set_phase(&mut session, Phase::Playing, 0);
    assert!(is_timed_out(&session, 61_000));
}

#[test]
fn sessions_without_a_limit_never_time_out() {
    let mut session = session();
    set_phase(&mut session, Phase::Playing, 0);
    assert!(!is_timed_out(&session, i64::MAX));
}
