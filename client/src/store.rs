use std::cell::{Cell, RefCell};
use std::rc::Rc;

use twogether_core::Session;

pub type StoreSubscriber = Rc<dyn Fn(&Session)>;

/// Owner of the canonical session snapshot. Every mutation funnels through
/// [`SessionStore::update`]; subscribers are notified synchronously with the
/// complete new snapshot, so they never observe a half-applied change.
pub struct SessionStore {
    state: RefCell<Session>,
    subscribers: Rc<RefCell<Vec<(u64, StoreSubscriber)>>>,
    next_subscriber_id: Cell<u64>,
}

impl SessionStore {
    pub fn new(initial: Session) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(initial),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
        })
    }

    pub fn get(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Read without cloning the whole snapshot.
    pub fn with<R>(&self, read: impl FnOnce(&Session) -> R) -> R {
        read(&self.state.borrow())
    }

    pub fn set(&self, next: Session) {
        *self.state.borrow_mut() = next;
        self.notify();
    }

    pub fn update(&self, mutate: impl FnOnce(&mut Session)) {
        {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
        }
        self.notify();
    }

    pub fn subscribe(&self, subscriber: StoreSubscriber) -> StoreSubscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id.wrapping_add(1));
        self.subscribers.borrow_mut().push((id, subscriber));
        StoreSubscription {
            id,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<StoreSubscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

/// Deregisters its subscriber on drop.
pub struct StoreSubscription {
    id: u64,
    subscribers: Rc<RefCell<Vec<(u64, StoreSubscriber)>>>,
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.subscribers
            .borrow_mut()
            .retain(|(id, _)| *id != self.id);
    }
}
