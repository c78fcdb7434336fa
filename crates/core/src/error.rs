//! Error types for the simulation core.
//!
//! Collisions are ordinary boolean outcomes and never show up here. These
//! errors cover malformed input at the boundaries: shape data coming from a
//! generator, configuration values, and misuse of the grid or action queue.

use thiserror::Error;

/// Rejected shape matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape matrix has no rows or no columns")]
    Empty,
    #[error("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape matrix has no filled cells")]
    NoFilledCells,
    #[error("shape cell ({x}, {y}) uses reserved ghost code {code}")]
    ReservedCode { x: usize, y: usize, code: u8 },
}

/// Grid write outside the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

/// Invalid game configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min_width}x{min_height}, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("gravity interval must be positive")]
    ZeroInterval,
    #[error("lines per level must be positive")]
    ZeroLinesPerLevel,
    #[error("action queue must hold at least one action")]
    ZeroPendingActions,
}

/// Piece controller command failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("action queue is full ({capacity} pending)")]
    QueueFull { capacity: usize },
}
