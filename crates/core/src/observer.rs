//! Push-only collaborators: score display, previews and the frame renderer.
//!
//! The core never reads anything back from an observer. Every method has a
//! no-op default so hosts only implement what they display.

use crate::controller::{ActivePiece, LockEvent};
use crate::grid::Grid;
use crate::scoring::ScoreUpdate;
use crate::shape::Shape;

pub trait GameObserver {
    /// Score, line total and level after every score update
    fn score_changed(&mut self, _update: ScoreUpdate) {}

    /// Upcoming piece for the "next" preview
    fn next_changed(&mut self, _next: Option<&Shape>) {}

    /// Held piece for the "hold" preview
    fn hold_changed(&mut self, _held: Option<&Shape>) {}

    /// Paint one frame: settled grid (ghost stamp included) plus the active piece
    fn frame(&mut self, _grid: &Grid, _active: Option<&ActivePiece>) {}

    /// A piece locked, or the next piece could not spawn
    fn locked(&mut self, _event: LockEvent) {}

    /// The board topped out with `score` points
    fn game_over(&mut self, _score: u32) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

impl<O: GameObserver + ?Sized> GameObserver for Box<O> {
    fn score_changed(&mut self, update: ScoreUpdate) {
        (**self).score_changed(update)
    }

    fn next_changed(&mut self, next: Option<&Shape>) {
        (**self).next_changed(next)
    }

    fn hold_changed(&mut self, held: Option<&Shape>) {
        (**self).hold_changed(held)
    }

    fn frame(&mut self, grid: &Grid, active: Option<&ActivePiece>) {
        (**self).frame(grid, active)
    }

    fn locked(&mut self, event: LockEvent) {
        (**self).locked(event)
    }

    fn game_over(&mut self, score: u32) {
        (**self).game_over(score)
    }
}
