use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_ROOM;

pub const SESSION_SNAPSHOT_VERSION: u32 = 1;

/// Top-level lifecycle stage of a session. `Completed` is terminal; only an
/// explicit reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Phase {
    Lobby,
    Playing,
    Paused,
    Completed,
}

/// The two complementary player capability sets. The occupied slots never
/// hold the same role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    Explorer,
    Guide,
}

impl Role {
    pub fn complement(self) -> Self {
        match self {
            Role::Explorer => Role::Guide,
            Role::Guide => Role::Explorer,
        }
    }
}

/// One of the two fixed player slots of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSlot {
    A,
    B,
}

impl PlayerSlot {
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::A => 0,
            PlayerSlot::B => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Per-puzzle progress. `data` is an opaque widget payload this engine never
/// inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PuzzleProgress {
    pub solved: bool,
    pub attempts: u32,
    pub data: Vec<u8>,
}

impl Default for PuzzleProgress {
    fn default() -> Self {
        Self {
            solved: false,
            attempts: 0,
            data: Vec::new(),
        }
    }
}

/// At most one record exists per `(puzzle_id, tier)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintUsageRecord {
    pub puzzle_id: String,
    pub tier: u8,
    pub timestamp: i64,
}

/// The complete synchronized state of one two-player session. All timestamps
/// are epoch milliseconds. Missing fields in a stored snapshot fall back to
/// the defaults below, so older blobs survive schema additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub version: u32,
    pub session_id: String,
    pub room_code: String,
    pub created_at: i64,
    pub players: [Option<Player>; 2],
    /// Role held by each slot. Survives a player detaching, so a rejoining
    /// player resumes the role the slot had accumulated through swaps.
    pub slot_roles: [Role; 2],
    pub roles_assigned: bool,
    pub current_phase: Phase,
    pub current_room: String,
    pub rooms_completed: Vec<String>,
    pub puzzle_states: BTreeMap<String, PuzzleProgress>,
    pub started_at: Option<i64>,
    pub paused_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub total_pause_time: i64,
    pub time_limit: Option<i64>,
    pub hints: Vec<HintUsageRecord>,
    pub hints_used: u32,
    pub total_attempts: u32,
}

impl Session {
    pub fn new(session_id: impl Into<String>, room_code: impl Into<String>, created_at: i64) -> Self {
        Self {
            version: SESSION_SNAPSHOT_VERSION,
            session_id: session_id.into(),
            room_code: room_code.into(),
            created_at,
            players: [None, None],
            slot_roles: [Role::Explorer, Role::Guide],
            roles_assigned: false,
            current_phase: Phase::Lobby,
            current_room: DEFAULT_ROOM.to_string(),
            rooms_completed: Vec::new(),
            puzzle_states: BTreeMap::new(),
            started_at: None,
            paused_at: None,
            completed_at: None,
            total_pause_time: 0,
            time_limit: None,
            hints: Vec::new(),
            hints_used: 0,
            total_attempts: 0,
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.players[slot.index()].as_ref()
    }

    pub fn both_players_present(&self) -> bool {
        self.players.iter().all(Option::is_some)
    }

    pub fn puzzle(&self, puzzle_id: &str) -> Option<&PuzzleProgress> {
        self.puzzle_states.get(puzzle_id)
    }

    pub fn is_room_completed(&self, room_id: &str) -> bool {
        self.rooms_completed.iter().any(|room| room == room_id)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("", "", 0)
    }
}
