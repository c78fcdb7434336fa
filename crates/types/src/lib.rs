//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation core, the replay host, and any renderer alike.
//!
//! # Grid Dimensions
//!
//! Reference playfield sizing (configurable through `GameConfig` in the core):
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the spawn row)
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_INTERVAL_MS` | 1000 | Gravity period before level scaling |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//! | `LINE_MULTIPLIERS` | `[0, 40, 50, 100, 300]` | Bonus table indexed by lines cleared at once |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, GameAction, PieceKind, GRID_WIDTH, GRID_HEIGHT};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::Slam));
//! assert_eq!(Cell::Ghost.code(), 8);
//! assert_eq!((GRID_WIDTH, GRID_HEIGHT), (12, 20));
//! ```

/// Grid width in cells (12 columns)
pub const GRID_WIDTH: usize = 12;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: usize = 20;

/// Base gravity interval (1000ms per row, divided by `max(level, 1)`)
pub const BASE_INTERVAL_MS: u64 = 1000;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Score multipliers indexed by the number of lines cleared by one lock.
///
/// Clears larger than four lines use the last entry.
pub const LINE_MULTIPLIERS: [u32; 5] = [0, 40, 50, 100, 300];

/// Numeric code reserved for ghost cells in the renderer-facing view.
pub const GHOST_CODE: u8 = 8;

/// Default bound on queued actions waiting for the next tick.
pub const MAX_PENDING_ACTIONS: usize = 32;

/// Host frame length (approximately 60 FPS)
pub const FRAME_MS: u64 = 16;

/// A single grid cell.
///
/// Ghost cells are a transient landing preview: they never block movement and
/// never count towards a full row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ghost,
    Filled(u8),
}

impl Cell {
    /// Whether this cell blocks a piece.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Renderer-facing numeric code: 0 empty, 8 ghost, color code otherwise.
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Ghost => GHOST_CODE,
            Cell::Filled(code) => *code,
        }
    }
}

/// The seven classic piece kinds
///
/// Each kind carries the color code its cells are stamped with:
/// T=1, O=2, L=3, J=4, I=5, S=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    O,
    L,
    J,
    I,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::I => "i",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Color code used for this kind's filled cells
    pub fn color(&self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }
}

/// Origin of a piece's bounding box in grid coordinates.
///
/// Not validated on write; a position is only known to be legal after a
/// collision test against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by `(dx, dy)`
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Quarter-turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    /// Transpose, then reverse each row
    Clockwise,
    /// Transpose, then reverse the row order
    CounterClockwise,
}

/// Game actions that can be applied to the piece controller
///
/// These actions are used by human input and scripted replays alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot move
    Drop,
    /// Instantly drop piece to the lowest reachable position and lock it
    Slam,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Exchange the active piece with the held one (once per lock)
    Hold,
    /// Start a fresh game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive, accepts a few aliases)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("slam"), Some(GameAction::Slam));
    /// assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "drop" | "softdrop" => Some(GameAction::Drop),
            "slam" | "harddrop" => Some(GameAction::Slam),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Drop => "drop",
            GameAction::Slam => "slam",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Lifecycle state of the piece controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Never started; updates and commands are ignored
    #[default]
    Stopped,
    /// A session is running
    Active,
    /// A freshly spawned piece collided; waiting for `start`
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Stopped => "stopped",
            GameStatus::Active => "active",
            GameStatus::GameOver => "gameOver",
        }
    }
}
