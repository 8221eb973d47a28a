use crate::domain::entities::{Faction, Marker, PlayerId, Position, Role};
use crate::domain::errors::MoveRejection;
use crate::domain::state::GameState;
use crate::domain::systems::victory;

/// One-step displacement parsed from a two-character token, row first.
/// `-` is -1, `0` is 0, `1` is +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDelta {
    pub d_row: isize,
    pub d_col: isize,
}

impl MoveDelta {
    pub fn parse(token: &str) -> Result<Self, MoveRejection> {
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(row), Some(col), None) => Ok(Self {
                d_row: axis_delta(row)?,
                d_col: axis_delta(col)?,
            }),
            _ => Err(MoveRejection::InvalidToken),
        }
    }

    pub fn is_zero(self) -> bool {
        self.d_row == 0 && self.d_col == 0
    }

    /// Target cell, or `None` when it leaves `[0, size)²`.
    pub fn apply(self, from: Position, size: usize) -> Option<Position> {
        let row = from.row.checked_add_signed(self.d_row)?;
        let col = from.col.checked_add_signed(self.d_col)?;
        (row < size && col < size).then_some(Position::new(row, col))
    }
}

fn axis_delta(c: char) -> Result<isize, MoveRejection> {
    match c {
        '-' => Ok(-1),
        '0' => Ok(0),
        '1' => Ok(1),
        _ => Err(MoveRejection::InvalidToken),
    }
}

/// What an accepted move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResolution {
    /// Plain relocation onto a vacant cell.
    Relocated { from: Position, to: Position },
    /// A Wolf took a Villager's cell; the Villager died.
    Captured {
        from: Position,
        to: Position,
        victim: PlayerId,
    },
    /// A Villager walked into a Wolf and died where it stood.
    Perished { at: Position, killer: PlayerId },
}

impl MoveResolution {
    /// Where the mover ended up, if it survived.
    pub fn new_position(&self) -> Option<Position> {
        match self {
            MoveResolution::Relocated { to, .. } | MoveResolution::Captured { to, .. } => {
                Some(*to)
            }
            MoveResolution::Perished { .. } => None,
        }
    }
}

/// Result of an accepted move, after the round counter and win check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub resolution: MoveResolution,
    // Round number this move was counted as.
    pub round: i64,
    // Counter after the win check; idle once the game is decided.
    pub round_in_progress: i64,
    // Set only when this move decided the game.
    pub winner: Option<Faction>,
}

/// Validates and commits one move. Every check runs before the first write, so a
/// rejected move leaves the game untouched.
pub fn attempt_move(
    state: &mut GameState,
    player_id: PlayerId,
    token: &str,
) -> Result<MoveOutcome, MoveRejection> {
    let mover = state
        .member(player_id)
        .ok_or(MoveRejection::UnknownPlayer)?;
    let (role, from) = (mover.role, mover.position);

    if !mover.alive {
        return Err(MoveRejection::PlayerDead);
    }
    if !state.game.round_active() {
        return Err(MoveRejection::RoundInactive);
    }

    let delta = MoveDelta::parse(token)?;
    if delta.is_zero() {
        return Err(MoveRejection::ZeroDelta);
    }
    let to = delta
        .apply(from, state.game.board.size())
        .ok_or(MoveRejection::OutOfBounds)?;

    let occupant = state
        .living_occupant(to)
        .map(|occupant| (occupant.id, occupant.role));

    let resolution = match occupant {
        None => MoveResolution::Relocated { from, to },
        Some((_, occupant_role)) if occupant_role == role => {
            return Err(MoveRejection::SameFaction);
        }
        Some((victim, Role::Villager)) => MoveResolution::Captured { from, to, victim },
        Some((killer, Role::Wolf)) => MoveResolution::Perished { at: from, killer },
    };

    commit(state, player_id, role, resolution);
    state.game.round_in_progress += 1;
    let round = state.game.round_in_progress;
    let winner = victory::conclude(state);

    Ok(MoveOutcome {
        resolution,
        round,
        round_in_progress: state.game.round_in_progress,
        winner,
    })
}

fn commit(state: &mut GameState, player_id: PlayerId, role: Role, resolution: MoveResolution) {
    match resolution {
        MoveResolution::Relocated { from, to } => {
            relocate(state, player_id, role, from, to);
        }
        MoveResolution::Captured { from, to, victim } => {
            if let Some(victim) = state.players.get_mut(&victim) {
                victim.alive = false;
            }
            relocate(state, player_id, role, from, to);
        }
        MoveResolution::Perished { at, .. } => {
            if let Some(mover) = state.players.get_mut(&player_id) {
                mover.alive = false;
            }
            state.game.board.place_marker(at, Marker::Dead);
        }
    }
}

fn relocate(state: &mut GameState, player_id: PlayerId, role: Role, from: Position, to: Position) {
    state.game.board.place_marker(from, Marker::Empty);
    state.game.board.place_marker(to, role.marker());
    if let Some(mover) = state.players.get_mut(&player_id) {
        mover.position = to;
    }
}
