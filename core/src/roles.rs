use crate::session::{Role, Session};

/// Assigns the starting roles on the first pairing of both players: slot A
/// is the explorer, slot B the guide. Deterministic from slot identity, a
/// no-op unless both slots are occupied, and never re-run after the first
/// pairing (later rejoins keep the parity accumulated through swaps).
pub fn assign_roles(session: &mut Session) -> bool {
    if session.roles_assigned || !session.both_players_present() {
        return false;
    }
    session.slot_roles = [Role::Explorer, Role::Guide];
    session.roles_assigned = true;
    sync_player_roles(session);
    true
}

/// Atomically exchanges the two roles. Guarded no-op while either slot is
/// empty so a swap racing a disconnect cannot leave matching roles.
pub fn swap_roles(session: &mut Session) -> bool {
    if !session.both_players_present() {
        return false;
    }
    session.slot_roles.swap(0, 1);
    sync_player_roles(session);
    true
}

/// Mirrors `slot_roles` onto the attached players in the same update.
pub fn sync_player_roles(session: &mut Session) {
    let roles = session.slot_roles;
    for (slot, player) in session.players.iter_mut().enumerate() {
        if let Some(player) = player {
            player.role = roles[slot];
        }
    }
}
