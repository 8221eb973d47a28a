// Last-faction-standing win detection.

use crate::domain::entities::{Faction, IDLE_ROUND};
use crate::domain::state::GameState;

/// Winner implied by the living members, without touching the game.
/// A game with no living members on either side has no winner.
pub fn evaluate(state: &GameState) -> Option<Faction> {
    let wolves = state.living_count(Faction::Wolves);
    let villagers = state.living_count(Faction::Villagers);

    match (wolves, villagers) {
        (0, 0) => None,
        (0, _) => Some(Faction::Villagers),
        (_, 0) => Some(Faction::Wolves),
        _ => None,
    }
}

/// Records the winner and freezes the game. Returns the faction only when
/// this call decided the game; a decided game is never touched again.
pub fn conclude(state: &mut GameState) -> Option<Faction> {
    if state.game.winner.is_some() {
        return None;
    }

    let winner = evaluate(state)?;
    state.game.winner = Some(winner);
    state.game.started = false;
    state.game.round_in_progress = IDLE_ROUND;
    Some(winner)
}
