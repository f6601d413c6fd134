pub mod clock;
pub mod events;
pub mod persist;
pub mod runtime;
pub mod storage;
pub mod store;
pub mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{DefeatReason, GameEvent, SessionHooks};
pub use persist::{SessionPersistence, PERSIST_DEBOUNCE_MS};
pub use runtime::SessionRuntime;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError, SESSION_STORAGE_KEY};
pub use store::{SessionStore, StoreSubscription};
pub use transport::{GameTransport, NullTransport};
