// Square grid of cell markers.

use super::entities::{Marker, Position};
use rand::Rng;
use rand::seq::SliceRandom;

/// Spawn cell used when no vacant cell remains.
pub const FALLBACK_POSITION: Position = Position::new(0, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Marker>,
}

impl Board {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![Marker::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Marker at `position`; out-of-range reads see an empty cell.
    pub fn marker(&self, position: Position) -> Marker {
        self.cells
            .get(self.index(position))
            .copied()
            .unwrap_or_default()
    }

    /// Low-level write. Callers check bounds; out-of-range writes are ignored.
    pub fn place_marker(&mut self, position: Position, marker: Marker) {
        let index = self.index(position);
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = marker;
        }
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Marker)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, marker)| (Position::new(i / self.size, i % self.size), *marker))
    }

    /// Uniformly samples a cell without a living occupant, or
    /// [`FALLBACK_POSITION`] when every cell is taken. Never mutates.
    pub fn random_vacant_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let vacant: Vec<Position> = self
            .cells()
            .filter(|(_, marker)| marker.is_vacant())
            .map(|(position, _)| position)
            .collect();

        vacant.choose(rng).copied().unwrap_or(FALLBACK_POSITION)
    }

    fn index(&self, position: Position) -> usize {
        if self.contains(position) {
            position.row * self.size + position.col
        } else {
            usize::MAX
        }
    }
}
