//! Ghost projector - landing preview for the active piece
//!
//! The ghost is a cache of the active piece's shape and position. It never
//! feeds back into game logic: projecting it only stamps transient ghost
//! cells, which collision tests and line clears ignore.

use crate::grid::Grid;
use crate::shape::Shape;
use crate::types::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ghost {
    shape: Option<Shape>,
    position: Position,
}

impl Ghost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_shape(&mut self, shape: &Shape) {
        self.shape = Some(shape.clone());
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Forget the cached piece
    pub fn clear(&mut self) {
        self.shape = None;
        self.position = Position::default();
    }

    /// Lowest position reachable from the cached one by unit descent.
    ///
    /// `None` when nothing is cached or the cached placement already collides.
    pub fn landing(&self, grid: &Grid) -> Option<Position> {
        let shape = self.shape.as_ref()?;
        if grid.check_collision(shape, self.position) {
            return None;
        }

        let mut landing = self.position;
        while !grid.check_collision(shape, landing.offset(0, 1)) {
            landing = landing.offset(0, 1);
        }
        Some(landing)
    }

    /// Stamp the landing preview into `grid`, replacing the previous one
    pub fn project(&self, grid: &mut Grid) {
        match (self.shape.as_ref(), self.landing(grid)) {
            (Some(shape), Some(landing)) => {
                // landing() only returns in-bounds placements
                if grid.merge_ghost_position(shape, landing).is_err() {
                    grid.clear_ghosts();
                }
            }
            _ => grid.clear_ghosts(),
        }
    }
}
