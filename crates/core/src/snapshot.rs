//! Read-only views of a running game, for renderers, replays and tests.

use std::hash::{Hash, Hasher};

use crate::controller::ActivePiece;
use crate::types::{GameStatus, PieceKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub position: Position,
    pub width: usize,
    pub height: usize,
    /// Row-major color codes of the current orientation
    pub cells: Vec<u8>,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            position: value.position,
            width: value.shape.width(),
            height: value.shape.height(),
            cells: value.shape.rows().flatten().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub counter_ms: u64,
    pub previous_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cell codes, ghost stamp included
    pub board: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<Position>,
    pub next: Option<PieceKind>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Active
    }

    /// Code at `(x, y)`, or `None` off the board
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board.get(y * self.width + x).copied()
    }

    /// Stable hash of the settled board, ghost cells ignored
    pub fn board_hash(&self) -> u64 {
        let mut hasher = Fnv1aHasher::new();
        hasher.write_usize(self.width);
        hasher.write_usize(self.height);
        for &code in &self.board {
            hasher.write_u8(if code == crate::types::GHOST_CODE { 0 } else { code });
        }
        hasher.finish()
    }

    /// Stable hash of the whole snapshot
    pub fn state_hash(&self) -> u64 {
        let mut hasher = Fnv1aHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// 64-bit FNV-1a.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions, and
/// replay summaries compare hashes between runs.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    // Fixed width regardless of platform.
    fn write_usize(&mut self, i: usize) {
        self.write(&(i as u64).to_le_bytes());
    }
}
