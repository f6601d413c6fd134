#[derive(Clone, Copy, Debug)]
pub struct RoomCatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub puzzles: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct PuzzleCatalogEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub room: &'static str,
    pub hint_tiers: &'static [HintTier],
}

/// One rung of a puzzle's hint ladder: `tier` unlocks once the attempt
/// counter reaches `trigger_attempts`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintTier {
    pub tier: u8,
    pub trigger_attempts: u32,
}

pub const DEFAULT_ROOM: &str = "attic";

/// Fixed completion order of the three rooms.
pub const ROOM_ORDER: &[&str] = &["attic", "clock_tower", "garden_conservatory"];

pub const ROOM_CATALOG: &[RoomCatalogEntry] = &[
    RoomCatalogEntry {
        id: "attic",
        label: "The Attic",
        puzzles: &[
            "music_box",
            "mirror_reflection",
            "mysterious_painting",
            "treasure_chest",
        ],
    },
    RoomCatalogEntry {
        id: "clock_tower",
        label: "The Clock Tower",
        puzzles: &["pendulum", "bell_collection", "cryptex"],
    },
    RoomCatalogEntry {
        id: "garden_conservatory",
        label: "The Garden Conservatory",
        puzzles: &["seed_packets", "botanical_hybrid", "glass_vials"],
    },
];

pub const PUZZLE_CATALOG: &[PuzzleCatalogEntry] = &[
    PuzzleCatalogEntry {
        id: "music_box",
        label: "Music Box",
        room: "attic",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 2 },
            HintTier { tier: 2, trigger_attempts: 4 },
            HintTier { tier: 3, trigger_attempts: 6 },
        ],
    },
    PuzzleCatalogEntry {
        id: "mirror_reflection",
        label: "Mirror Reflection",
        room: "attic",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 3 },
            HintTier { tier: 2, trigger_attempts: 5 },
        ],
    },
    PuzzleCatalogEntry {
        id: "mysterious_painting",
        label: "Mysterious Painting",
        room: "attic",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 2 },
            HintTier { tier: 2, trigger_attempts: 4 },
            HintTier { tier: 3, trigger_attempts: 7 },
        ],
    },
    PuzzleCatalogEntry {
        id: "treasure_chest",
        label: "Treasure Chest",
        room: "attic",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 3 },
            HintTier { tier: 2, trigger_attempts: 6 },
        ],
    },
    PuzzleCatalogEntry {
        id: "pendulum",
        label: "Pendulum",
        room: "clock_tower",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 2 },
            HintTier { tier: 2, trigger_attempts: 5 },
        ],
    },
    PuzzleCatalogEntry {
        id: "bell_collection",
        label: "Bell Collection",
        room: "clock_tower",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 3 },
            HintTier { tier: 2, trigger_attempts: 5 },
            HintTier { tier: 3, trigger_attempts: 8 },
        ],
    },
    PuzzleCatalogEntry {
        id: "cryptex",
        label: "Cryptex",
        room: "clock_tower",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 2 },
            HintTier { tier: 2, trigger_attempts: 4 },
            HintTier { tier: 3, trigger_attempts: 6 },
        ],
    },
    PuzzleCatalogEntry {
        id: "seed_packets",
        label: "Seed Packets",
        room: "garden_conservatory",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 3 },
            HintTier { tier: 2, trigger_attempts: 5 },
        ],
    },
    PuzzleCatalogEntry {
        id: "botanical_hybrid",
        label: "Botanical Hybrid",
        room: "garden_conservatory",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 2 },
            HintTier { tier: 2, trigger_attempts: 4 },
            HintTier { tier: 3, trigger_attempts: 7 },
        ],
    },
    PuzzleCatalogEntry {
        id: "glass_vials",
        label: "Glass Vials",
        room: "garden_conservatory",
        hint_tiers: &[
            HintTier { tier: 1, trigger_attempts: 3 },
            HintTier { tier: 2, trigger_attempts: 6 },
        ],
    },
];

pub fn room_by_id(id: &str) -> Option<&'static RoomCatalogEntry> {
    let trimmed = id.trim();
    ROOM_CATALOG
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(trimmed))
}

pub fn puzzle_by_id(id: &str) -> Option<&'static PuzzleCatalogEntry> {
    let trimmed = id.trim();
    PUZZLE_CATALOG
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(trimmed))
}

/// Ordered puzzle ids of a room, empty for an unknown room id.
pub fn puzzles_in_room(room_id: &str) -> &'static [&'static str] {
    room_by_id(room_id).map(|entry| entry.puzzles).unwrap_or(&[])
}

pub fn hint_schedule(puzzle_id: &str) -> &'static [HintTier] {
    puzzle_by_id(puzzle_id)
        .map(|entry| entry.hint_tiers)
        .unwrap_or(&[])
}
