use std::rc::Rc;

use twogether_core::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatReason {
    Timeout,
    Disconnected,
    Abandoned,
}

/// Engine events the presentation layer reacts to. Everything else is read
/// from the snapshot stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    RoomTransition { from: String, to: String },
    Victory,
    Defeat { reason: DefeatReason },
}

#[derive(Clone)]
pub struct SessionHooks {
    pub on_change: Rc<dyn Fn(&Session)>,
    pub on_event: Rc<dyn Fn(&GameEvent)>,
}

impl SessionHooks {
    pub fn empty() -> Self {
        Self {
            on_change: Rc::new(|_| {}),
            on_event: Rc::new(|_| {}),
        }
    }
}
