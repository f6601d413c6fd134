pub mod catalog;
pub mod hints;
pub mod patch;
pub mod phase;
pub mod progression;
pub mod protocol;
pub mod roles;
pub mod room_code;
pub mod session;

pub use catalog::{puzzles_in_room, room_by_id, ROOM_ORDER};
pub use patch::SessionPatch;
pub use protocol::{decode, encode, ClientAction, SyncMsg};
pub use room_code::{is_valid_room_code, RoomCode, RoomCodeError, ROOM_CODE_ALPHABET, ROOM_CODE_LEN};
pub use session::{
    HintUsageRecord, Phase, Player, PlayerSlot, PuzzleProgress, Role, Session,
    SESSION_SNAPSHOT_VERSION,
};
