use twogether_core::ClientAction;

/// Outbound port to the realtime transport collaborator. The envelope,
/// acknowledgement, and room-join handshake live on the other side of this
/// trait; the runtime only hands it actions to broadcast.
pub trait GameTransport {
    fn emit(&self, action: &ClientAction);
}

/// Transport for solo or offline play: broadcasts go nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransport;

impl GameTransport for NullTransport {
    fn emit(&self, _action: &ClientAction) {}
}
