use rkyv::api::high::{HighDeserializer, HighSerializer, HighValidator};
use rkyv::bytecheck::CheckBytes;
use rkyv::rancor::Error;
use rkyv::ser::allocator::ArenaHandle;
use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::patch::SessionPatch;
use crate::session::{Phase, Session};

/// A local action broadcast to the other client through the transport
/// collaborator. The wire envelope, acknowledgement, and room-join handshake
/// belong to the transport, not to this crate.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
pub enum ClientAction {
    Attempt { puzzle_id: String },
    Solve { puzzle_id: String },
    SwapRoles,
    HintUsed { puzzle_id: String, tier: u8 },
    PhaseChange { phase: Phase },
    RoomChange { room_id: String },
}

/// An inbound state update from the transport: either a partial patch or a
/// full replacement (the latter on reconnect/resync).
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
pub enum SyncMsg {
    Patch { patch: SessionPatch },
    Full { session: Session },
}

pub fn encode<T>(value: &T) -> Option<Vec<u8>>
where
    T: for<'a> Serialize<HighSerializer<AlignedVec, ArenaHandle<'a>, Error>>,
{
    rkyv::to_bytes::<Error>(value).ok().map(|bytes| bytes.into_vec())
}

pub fn decode<T>(bytes: &[u8]) -> Option<T>
where
    T: Archive,
    T::Archived:
        for<'a> CheckBytes<HighValidator<'a, Error>> + Deserialize<T, HighDeserializer<Error>>,
{
    rkyv::from_bytes::<T, Error>(bytes).ok()
}
