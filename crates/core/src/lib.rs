//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to run a falling-block puzzle game without a screen,
//! a keyboard or a clock. Hosts feed timestamps and actions in, and read state
//! back through snapshots or a push-only [`GameObserver`].
//!
//! # Module Structure
//!
//! - [`grid`]: playfield storage, collision tests, locking, line clears, score counters
//! - [`shape`]: piece matrices and quarter-turn rotation
//! - [`catalog`]: the seven classic pieces in spawn orientation
//! - [`generator`]: the [`ShapeGenerator`] seam and the seeded 7-bag [`PieceQueue`]
//! - [`ghost`]: landing preview
//! - [`controller`]: the [`PieceController`] that runs a game
//! - [`scoring`]: points, levels, gravity scaling
//! - [`observer`]: output seam for score, previews, frames and game over
//! - [`snapshot`]: read-only state views with stable hashes
//!
//! # Game Rules
//!
//! - **Gravity**: one row each time the accumulated `elapsed * max(level, 1)`
//!   exceeds the base interval (1000ms by default)
//! - **Spawn**: top row, horizontally centered; a colliding spawn ends the game
//! - **Rotation**: quarter turns with one clamp against the walls or floor
//! - **Hold**: once per lock, stores the piece in spawn orientation
//! - **Scoring**: `(level + 1) * lines * [0, 40, 50, 100, 300][lines]`
//! - **Levels**: one per ten cleared lines by default
//!
//! # Example
//!
//! ```
//! use blockfall_core::PieceController;
//! use blockfall_core::types::{GameAction, GameStatus};
//!
//! let mut game = PieceController::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::Slam);
//!
//! // Two seconds of gravity
//! game.tick(2000);
//! assert_eq!(game.status(), GameStatus::Active);
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod ghost;
pub mod grid;
pub mod observer;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

pub use catalog::standard_shape;
pub use config::GameConfig;
pub use controller::{ActivePiece, LockEvent, PieceController};
pub use error::{ConfigError, ControllerError, GridError, ShapeError};
pub use generator::{PieceQueue, ShapeGenerator, SimpleRng};
pub use ghost::Ghost;
pub use grid::Grid;
pub use observer::{GameObserver, NullObserver};
pub use scoring::ScoreUpdate;
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
