use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use twogether_core::catalog::{puzzles_in_room, ROOM_ORDER};
use twogether_core::patch::{apply_full, apply_patch};
use twogether_core::progression::{self, RoomOutcome};
use twogether_core::{hints, phase, roles};
use twogether_core::{ClientAction, Phase, Player, PlayerSlot, Session, SyncMsg};

use crate::clock::Clock;
use crate::events::{DefeatReason, GameEvent, SessionHooks};
use crate::persist::SessionPersistence;
use crate::storage::SnapshotStorage;
use crate::store::SessionStore;
use crate::transport::GameTransport;

enum PersistMode {
    Debounced,
    Immediate,
    Skip,
}

/// Drives one session on one client: the command surface for the
/// presentation layer, the reconciliation entry point for the transport, and
/// the 1 Hz tick for timeout detection and debounced persistence.
///
/// Single-threaded by design; the host serializes UI events, transport
/// arrivals, and ticks onto one queue and no call here blocks. After
/// [`SessionRuntime::shutdown`], every command and tick is a no-op so a torn
/// down session can never write stale state.
pub struct SessionRuntime {
    store: Rc<SessionStore>,
    persistence: SessionPersistence,
    clock: Rc<dyn Clock>,
    transport: Rc<dyn GameTransport>,
    hooks: RefCell<SessionHooks>,
    room_order: Vec<String>,
    closed: Cell<bool>,
}

impl SessionRuntime {
    pub fn new(
        store: Rc<SessionStore>,
        storage: Rc<dyn SnapshotStorage>,
        clock: Rc<dyn Clock>,
        transport: Rc<dyn GameTransport>,
    ) -> Self {
        Self {
            store,
            persistence: SessionPersistence::new(storage),
            clock,
            transport,
            hooks: RefCell::new(SessionHooks::empty()),
            room_order: ROOM_ORDER.iter().map(|room| room.to_string()).collect(),
            closed: Cell::new(false),
        }
    }

    pub fn install_hooks(&self, hooks: SessionHooks) {
        *self.hooks.borrow_mut() = hooks;
    }

    pub fn store(&self) -> &Rc<SessionStore> {
        &self.store
    }

    pub fn snapshot(&self) -> Session {
        self.store.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Applies the stored snapshot, if any, over the live session. A blob
    /// from a different session is ignored so a reused profile cannot leak
    /// progress across rooms.
    pub fn restore(&self) -> bool {
        if self.guard() {
            return false;
        }
        let loaded = self.persistence.load();
        if loaded.session_id.is_empty() {
            return false;
        }
        let mismatch = self.store.with(|current| {
            !current.session_id.is_empty() && current.session_id != loaded.session_id
        });
        if mismatch {
            warn!("stored snapshot belongs to another session, ignoring");
            return false;
        }
        self.store.set(loaded);
        self.after_mutation(PersistMode::Skip);
        true
    }

    pub fn set_phase(&self, next: Phase) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut changed = false;
        self.store
            .update(|session| changed = phase::set_phase(session, next, now));
        if !changed {
            return;
        }
        self.transport
            .emit(&ClientAction::PhaseChange { phase: next });
        self.after_mutation(PersistMode::Debounced);
    }

    /// Seats a player. Roles are assigned on the first pairing; a rejoining
    /// player resumes whatever role the slot holds.
    pub fn attach_player(&self, slot: PlayerSlot, player_id: &str, name: &str) {
        if self.guard() {
            return;
        }
        self.store.update(|session| {
            let role = session.slot_roles[slot.index()];
            session.players[slot.index()] = Some(Player {
                id: player_id.to_string(),
                name: name.to_string(),
                role,
            });
            roles::assign_roles(session);
        });
        self.after_mutation(PersistMode::Debounced);
    }

    /// Empties a slot. Puzzle and room progress is untouched.
    pub fn detach_player(&self, slot: PlayerSlot) {
        if self.guard() {
            return;
        }
        self.store
            .update(|session| session.players[slot.index()] = None);
        self.after_mutation(PersistMode::Debounced);
    }

    pub fn record_attempt(&self, puzzle_id: &str) {
        if self.guard() {
            return;
        }
        self.store
            .update(|session| progression::record_attempt(session, puzzle_id));
        self.transport.emit(&ClientAction::Attempt {
            puzzle_id: puzzle_id.to_string(),
        });
        self.after_mutation(PersistMode::Debounced);
    }

    /// Marks a puzzle solved, rotates the roles (one swap per newly solved
    /// puzzle), and runs room-completion detection against the current
    /// room's puzzle set.
    pub fn solve(&self, puzzle_id: &str) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut newly_solved = false;
        let mut swapped = false;
        let mut outcome = None;
        self.store.update(|session| {
            newly_solved = progression::solve(session, puzzle_id);
            if !newly_solved {
                return;
            }
            swapped = roles::swap_roles(session);
            outcome = self.detect_room_completion(session, now);
        });
        if !newly_solved {
            debug!(puzzle_id, "solve ignored, already solved");
            return;
        }
        self.transport.emit(&ClientAction::Solve {
            puzzle_id: puzzle_id.to_string(),
        });
        if swapped {
            self.transport.emit(&ClientAction::SwapRoles);
        }
        self.after_mutation(PersistMode::Debounced);
        if let Some(outcome) = outcome {
            self.emit_event(outcome_event(outcome));
        }
    }

    pub fn swap_roles(&self) {
        if self.guard() {
            return;
        }
        let mut swapped = false;
        self.store
            .update(|session| swapped = roles::swap_roles(session));
        if !swapped {
            debug!("role swap ignored, both players required");
            return;
        }
        self.transport.emit(&ClientAction::SwapRoles);
        self.after_mutation(PersistMode::Debounced);
    }

    pub fn use_hint(&self, puzzle_id: &str, tier: u8) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut recorded = false;
        self.store
            .update(|session| recorded = hints::use_hint(session, puzzle_id, tier, now));
        if !recorded {
            return;
        }
        self.transport.emit(&ClientAction::HintUsed {
            puzzle_id: puzzle_id.to_string(),
            tier,
        });
        self.after_mutation(PersistMode::Debounced);
    }

    pub fn set_current_room(&self, room_id: &str) {
        if self.guard() {
            return;
        }
        let mut moved = None;
        self.store.update(|session| {
            if session.current_room != room_id {
                moved = Some((session.current_room.clone(), room_id.to_string()));
                session.current_room = room_id.to_string();
            }
        });
        let Some((from, to)) = moved else {
            return;
        };
        self.transport
            .emit(&ClientAction::RoomChange { room_id: to.clone() });
        self.after_mutation(PersistMode::Debounced);
        self.emit_event(GameEvent::RoomTransition { from, to });
    }

    pub fn complete_room(&self, room_id: &str) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut outcome = None;
        self.store.update(|session| {
            outcome = progression::complete_room(session, room_id, &self.room_order, now);
        });
        let Some(outcome) = outcome else {
            return;
        };
        self.after_mutation(PersistMode::Debounced);
        self.emit_event(outcome_event(outcome));
    }

    /// Destroys the session: progress resets to defaults (identifiers
    /// survive) and the persisted copy is cleared. Nothing is re-persisted
    /// until the next mutation.
    pub fn reset(&self) {
        if self.guard() {
            return;
        }
        let now = self.now();
        self.persistence.clear();
        self.store.update(|session| {
            *session = Session::new(session.session_id.clone(), session.room_code.clone(), now);
        });
        self.after_mutation(PersistMode::Skip);
    }

    /// Applies an inbound transport update and persists immediately. Remote
    /// solves can complete the current room here, so detection re-runs after
    /// every application.
    pub fn apply_remote(&self, msg: &SyncMsg) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut outcome = None;
        self.store.update(|session| {
            match msg {
                SyncMsg::Patch { patch } => apply_patch(session, patch),
                SyncMsg::Full { session: incoming } => apply_full(session, incoming),
            }
            if session.current_phase != Phase::Completed {
                outcome = self.detect_room_completion(session, now);
            }
        });
        self.after_mutation(PersistMode::Immediate);
        if let Some(outcome) = outcome {
            self.emit_event(outcome_event(outcome));
        }
    }

    /// The 1 Hz poll: raises a timeout defeat once the play-time budget is
    /// exhausted and flushes due debounced writes.
    pub fn tick(&self) {
        if self.closed.get() {
            return;
        }
        let now = self.now();
        let timed_out = self.store.with(|session| {
            session.current_phase == Phase::Playing && phase::is_timed_out(session, now)
        });
        if timed_out {
            self.store.update(|session| {
                phase::set_phase(session, Phase::Completed, now);
            });
            self.after_mutation(PersistMode::Immediate);
            self.emit_event(GameEvent::Defeat {
                reason: DefeatReason::Timeout,
            });
        }
        self.persistence.flush_due(now);
    }

    pub fn connection_lost(&self) {
        self.terminal_defeat(DefeatReason::Disconnected);
    }

    pub fn abandon(&self) {
        self.terminal_defeat(DefeatReason::Abandoned);
    }

    /// Flushes pending persistence and closes the runtime. Later commands,
    /// remote updates, and ticks are no-ops.
    pub fn shutdown(&self) {
        if self.closed.replace(true) {
            return;
        }
        self.persistence.flush();
    }

    fn terminal_defeat(&self, reason: DefeatReason) {
        if self.guard() {
            return;
        }
        let now = self.now();
        let mut changed = false;
        self.store.update(|session| {
            changed = phase::set_phase(session, Phase::Completed, now);
        });
        if !changed {
            return;
        }
        self.after_mutation(PersistMode::Immediate);
        self.emit_event(GameEvent::Defeat { reason });
    }

    fn detect_room_completion(&self, session: &mut Session, now_ms: i64) -> Option<RoomOutcome> {
        let room = session.current_room.clone();
        if session.is_room_completed(&room) {
            return None;
        }
        if !progression::room_complete(session, puzzles_in_room(&room)) {
            return None;
        }
        progression::complete_room(session, &room, &self.room_order, now_ms)
    }

    fn guard(&self) -> bool {
        if self.closed.get() {
            debug!("runtime closed, dropping call");
            return true;
        }
        false
    }

    fn now(&self) -> i64 {
        self.clock.now_ms()
    }

    fn after_mutation(&self, mode: PersistMode) {
        let snapshot = self.store.get();
        match mode {
            PersistMode::Debounced => self.persistence.schedule(&snapshot, self.now()),
            PersistMode::Immediate => self.persistence.persist_now(&snapshot),
            PersistMode::Skip => {}
        }
        let on_change = self.hooks.borrow().on_change.clone();
        on_change(&snapshot);
    }

    fn emit_event(&self, event: GameEvent) {
        let on_event = self.hooks.borrow().on_event.clone();
        on_event(&event);
    }
}

fn outcome_event(outcome: RoomOutcome) -> GameEvent {
    match outcome {
        RoomOutcome::Advanced { from, to } => GameEvent::RoomTransition { from, to },
        RoomOutcome::Victory => GameEvent::Victory,
    }
}
