// Role-based board views. The server is the only source of what a player can see.

use crate::domain::board::Board;
use crate::domain::entities::{Marker, Player, Role};

pub const UNKNOWN_GLYPH: char = '0';
pub const HIDDEN_GLYPH: char = 'X';
pub const WOLF_GLYPH: char = 'W';
pub const VILLAGER_GLYPH: char = 'V';
pub const DEAD_GLYPH: char = 'D';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPolicy {
    /// Every cell is revealed.
    Global,
    /// Only cells within this Chebyshev radius of the viewer are revealed.
    Radius(usize),
}

impl VisibilityPolicy {
    pub fn for_role(role: Role, villager_radius: usize) -> Self {
        match role {
            Role::Wolf => VisibilityPolicy::Global,
            Role::Villager => VisibilityPolicy::Radius(villager_radius),
        }
    }
}

pub fn glyph(marker: Marker) -> char {
    match marker {
        Marker::Empty => UNKNOWN_GLYPH,
        Marker::Wolf => WOLF_GLYPH,
        Marker::Villager => VILLAGER_GLYPH,
        Marker::Dead => DEAD_GLYPH,
    }
}

/// Flattened row-major view of `board` as seen by `viewer`; `size²` glyphs long.
pub fn visible_cells(board: &Board, viewer: &Player, villager_radius: usize) -> String {
    let policy = VisibilityPolicy::for_role(viewer.role, villager_radius);

    board
        .cells()
        .map(|(position, marker)| match policy {
            VisibilityPolicy::Global => glyph(marker),
            VisibilityPolicy::Radius(radius) => {
                if viewer.position.chebyshev_distance(position) <= radius {
                    glyph(marker)
                } else {
                    HIDDEN_GLYPH
                }
            }
        })
        .collect()
}
