use std::fmt;

pub const ROOM_CODE_LEN: usize = 6;
/// Uppercase letters and digits, minus the ambiguous I/L/O/0/1.
pub const ROOM_CODE_ALPHABET: &str = "ABCDEFGHJKMNPQRSTUVWXYZ23456789";

pub fn is_valid_room_code(value: &str) -> bool {
    value.len() == ROOM_CODE_LEN && value.chars().all(|ch| ROOM_CODE_ALPHABET.contains(ch))
}

/// A validated six-character join code for one session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn parse(value: &str) -> Result<Self, RoomCodeError> {
        let normalized = value.trim().to_ascii_uppercase();
        if normalized.len() != ROOM_CODE_LEN {
            return Err(RoomCodeError::InvalidLength {
                expected: ROOM_CODE_LEN,
                found: normalized.len(),
            });
        }
        for (index, ch) in normalized.chars().enumerate() {
            if !ROOM_CODE_ALPHABET.contains(ch) {
                return Err(RoomCodeError::InvalidCharacter { ch, index });
            }
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for RoomCode {
    type Err = RoomCodeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomCodeError {
    InvalidLength { expected: usize, found: usize },
    InvalidCharacter { ch: char, index: usize },
}

impl fmt::Display for RoomCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomCodeError::InvalidLength { expected, found } => {
                write!(f, "room code must be {expected} chars, got {found}")
            }
            RoomCodeError::InvalidCharacter { ch, index } => {
                write!(f, "invalid character '{ch}' at position {index}")
            }
        }
    }
}

impl std::error::Error for RoomCodeError {}
