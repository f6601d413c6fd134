use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::warn;
use twogether_core::Session;

use crate::storage::{SnapshotStorage, SESSION_STORAGE_KEY};

/// A burst of mutations coalesces into one write this long after the last
/// mutation.
pub const PERSIST_DEBOUNCE_MS: i64 = 500;

/// Serializes the session to the one stored JSON blob. Writes are debounced
/// bookkeeping-style: `schedule` records the latest snapshot, `flush_due`
/// (driven by the runtime tick) performs the actual write once the window
/// elapses. Storage trouble is logged and swallowed; it never reaches the
/// players.
pub struct SessionPersistence {
    storage: Rc<dyn SnapshotStorage>,
    pending: RefCell<Option<Session>>,
    dirty_since: Cell<Option<i64>>,
}

impl SessionPersistence {
    pub fn new(storage: Rc<dyn SnapshotStorage>) -> Self {
        Self {
            storage,
            pending: RefCell::new(None),
            dirty_since: Cell::new(None),
        }
    }

    /// Reads the stored snapshot, merging it over a default session so
    /// fields added since the blob was written fall back safely. Corrupt or
    /// unavailable storage degrades to the default session.
    pub fn load(&self) -> Session {
        match self.storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => session,
                Err(err) => {
                    warn!("stored session unreadable, starting fresh: {err}");
                    Session::default()
                }
            },
            Ok(None) => Session::default(),
            Err(err) => {
                warn!("session storage unavailable: {err}");
                Session::default()
            }
        }
    }

    /// Remembers the snapshot and restarts the debounce window.
    pub fn schedule(&self, session: &Session, now_ms: i64) {
        *self.pending.borrow_mut() = Some(session.clone());
        self.dirty_since.set(Some(now_ms));
    }

    /// Writes the pending snapshot once the debounce window has elapsed.
    pub fn flush_due(&self, now_ms: i64) -> bool {
        match self.dirty_since.get() {
            Some(since) if now_ms - since >= PERSIST_DEBOUNCE_MS => {
                self.flush();
                true
            }
            _ => false,
        }
    }

    /// Writes any pending snapshot immediately and clears the window.
    pub fn flush(&self) {
        self.dirty_since.set(None);
        if let Some(session) = self.pending.borrow_mut().take() {
            self.write(&session);
        }
    }

    /// Immediate write, bypassing the debounce (remote reconciliation).
    pub fn persist_now(&self, session: &Session) {
        self.pending.borrow_mut().take();
        self.dirty_since.set(None);
        self.write(session);
    }

    /// Drops the stored blob and anything pending.
    pub fn clear(&self) {
        self.pending.borrow_mut().take();
        self.dirty_since.set(None);
        if let Err(err) = self.storage.remove(SESSION_STORAGE_KEY) {
            warn!("failed to clear stored session: {err}");
        }
    }

    pub fn has_pending(&self) -> bool {
        self.dirty_since.get().is_some()
    }

    fn write(&self, session: &Session) {
        let raw = match serde_json::to_string(session) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to serialize session: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(SESSION_STORAGE_KEY, &raw) {
            warn!("failed to persist session: {err}");
        }
    }
}
