use std::rc::Rc;

use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use twogether_client::{
    Clock, GameEvent, GameTransport, ManualClock, MemoryStorage, SessionHooks, SessionRuntime,
    SessionStore, SystemClock,
};
use twogether_core::catalog::{hint_schedule, puzzles_in_room, room_by_id, ROOM_ORDER};
use twogether_core::hints::{hint_penalty_minutes, unlocked_tier};
use twogether_core::phase::elapsed_ms;
use twogether_core::{ClientAction, Phase, PlayerSlot, Session};

#[derive(Args)]
pub(crate) struct SimulateArgs {
    /// Play-time budget in seconds; omit for an untimed run.
    #[arg(long)]
    time_limit_secs: Option<u64>,
    /// Attempts made on each puzzle before it is solved.
    #[arg(long, default_value_t = 3)]
    attempts_per_puzzle: u32,
    /// Base think time between actions, in milliseconds.
    #[arg(long, default_value_t = 1_500)]
    think_ms: i64,
    /// Mid-run break taken in the clock tower, in seconds.
    #[arg(long, default_value_t = 5)]
    pause_secs: u64,
    /// Request every hint tier the attempt count has unlocked.
    #[arg(long)]
    hints: bool,
    #[arg(long, env = "TWOGETHER_SEED")]
    seed: Option<u64>,
}

struct EchoTransport;

impl GameTransport for EchoTransport {
    fn emit(&self, action: &ClientAction) {
        println!("broadcast: {action:?}");
    }
}

pub(crate) fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let room_code = crate::generate_room_code();
    let session_id = format!("session-{:012x}", rng.random::<u64>() & 0xffff_ffff_ffff);
    let start_ms = SystemClock.now_ms();

    let mut session = Session::new(session_id, room_code.clone(), start_ms);
    session.time_limit = args.time_limit_secs.map(|secs| (secs * 1_000) as i64);

    let clock = Rc::new(ManualClock::starting_at(start_ms));
    let runtime = SessionRuntime::new(
        SessionStore::new(session),
        Rc::new(MemoryStorage::new()),
        clock.clone(),
        Rc::new(EchoTransport),
    );
    runtime.install_hooks(SessionHooks {
        on_change: Rc::new(|_| {}),
        on_event: Rc::new(|event| match event {
            GameEvent::RoomTransition { from, to } => println!("room transition: {from} -> {to}"),
            GameEvent::Victory => println!("victory!"),
            GameEvent::Defeat { reason } => println!("defeat: {reason:?}"),
        }),
    });

    println!("room_code: {room_code}");
    runtime.attach_player(PlayerSlot::A, "player-a", "Ada");
    runtime.attach_player(PlayerSlot::B, "player-b", "Brin");
    runtime.set_phase(Phase::Playing);

    'rooms: for room_id in ROOM_ORDER {
        let Some(room) = room_by_id(room_id) else {
            continue;
        };
        println!("entering {}", room.label);
        if *room_id == "clock_tower" && args.pause_secs > 0 {
            runtime.set_phase(Phase::Paused);
            clock.advance((args.pause_secs * 1_000) as i64);
            runtime.set_phase(Phase::Playing);
        }
        for puzzle_id in puzzles_in_room(room_id) {
            for _ in 0..args.attempts_per_puzzle {
                step(&runtime, &clock, &mut rng, args.think_ms);
                if runtime.snapshot().current_phase == Phase::Completed {
                    break 'rooms;
                }
                runtime.record_attempt(puzzle_id);
            }
            if args.hints {
                let attempts = runtime
                    .snapshot()
                    .puzzle(puzzle_id)
                    .map(|progress| progress.attempts)
                    .unwrap_or(0);
                let tier = unlocked_tier(hint_schedule(puzzle_id), attempts);
                if tier > 0 {
                    runtime.use_hint(puzzle_id, tier);
                }
            }
            step(&runtime, &clock, &mut rng, args.think_ms);
            if runtime.snapshot().current_phase == Phase::Completed {
                break 'rooms;
            }
            runtime.solve(puzzle_id);
        }
    }

    let session = runtime.snapshot();
    let elapsed = elapsed_ms(&session, clock.now_ms());
    println!("phase: {:?}", session.current_phase);
    println!("rooms completed: {}", session.rooms_completed.join(", "));
    println!("attempts: {}", session.total_attempts);
    println!(
        "elapsed: {:.1}s (paused {:.1}s)",
        elapsed as f64 / 1_000.0,
        session.total_pause_time as f64 / 1_000.0
    );
    println!(
        "hints used: {} (penalty {} min)",
        session.hints_used,
        hint_penalty_minutes(session.hints_used)
    );
    runtime.shutdown();
    Ok(())
}

fn step(runtime: &SessionRuntime, clock: &ManualClock, rng: &mut StdRng, think_ms: i64) {
    let base = think_ms.max(1);
    clock.advance(base + rng.random_range(0..=base / 3));
    runtime.tick();
}
