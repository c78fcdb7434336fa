//! Piece controller - owns the falling piece and drives the game forward
//!
//! This module ties together the grid, the shape generator, the ghost and the
//! observers. It handles gravity timing, movement, rotation, hold, locking and
//! the start / game-over lifecycle.
//!
//! The controller is a single owned value: every command takes `&mut self`, so
//! commands can never interleave with an in-progress [`PieceController::update`].
//! Hosts that collect input asynchronously push it through
//! [`PieceController::queue_action`] and it is drained at the start of the next
//! update.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::error::{ConfigError, ControllerError};
use crate::generator::{PieceQueue, ShapeGenerator};
use crate::ghost::Ghost;
use crate::grid::Grid;
use crate::observer::{GameObserver, NullObserver};
use crate::scoring::gravity_scale;
use crate::shape::Shape;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{GameAction, GameStatus, PieceKind, Position, RotationDirection};

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    /// Current orientation
    pub shape: Shape,
    /// Orientation the piece spawned with; this is what goes into hold
    pub spawn_shape: Shape,
    pub position: Position,
}

impl ActivePiece {
    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }
}

/// What happened at the most recent lock or top-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// The next piece could not spawn
    pub topped_out: bool,
}

/// Game session: grid, active piece, previews and gravity timer
#[derive(Debug, Clone)]
pub struct PieceController<G = PieceQueue, O = NullObserver> {
    config: GameConfig,
    grid: Grid,
    ghost: Ghost,
    generator: G,
    observer: O,
    status: GameStatus,
    active: Option<ActivePiece>,
    next: Option<Shape>,
    held: Option<Shape>,
    /// A hold already happened since the last lock
    swapped: bool,
    /// Gravity accumulator in level-scaled milliseconds
    counter: u64,
    /// Timestamp of the last update, in host milliseconds
    previous_time: u64,
    pending: VecDeque<GameAction>,
    last_event: Option<LockEvent>,
    /// Pieces locked in the current session
    pieces_locked: u32,
}

impl PieceController {
    /// Default-sized game fed by a seeded 7-bag
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        Self::build(config, PieceQueue::new(seed), NullObserver)
    }
}

impl Default for PieceController {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<G: ShapeGenerator, O: GameObserver> PieceController<G, O> {
    /// Assemble a controller from its collaborators
    pub fn with_parts(config: GameConfig, generator: G, observer: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, generator, observer))
    }

    fn build(config: GameConfig, generator: G, observer: O) -> Self {
        let grid = Grid::new(config.width, config.height)
            .with_lines_per_level(config.lines_per_level);
        let pending = VecDeque::with_capacity(config.max_pending_actions);

        Self {
            config,
            grid,
            ghost: Ghost::new(),
            generator,
            observer,
            status: GameStatus::Stopped,
            active: None,
            next: None,
            held: None,
            swapped: false,
            counter: 0,
            previous_time: 0,
            pending,
            last_event: None,
            pieces_locked: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn next_shape(&self) -> Option<&Shape> {
        self.next.as_ref()
    }

    pub fn held_shape(&self) -> Option<&Shape> {
        self.held.as_ref()
    }

    pub fn can_hold(&self) -> bool {
        !self.swapped
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn counter_ms(&self) -> u64 {
        self.counter
    }

    pub fn previous_time_ms(&self) -> u64 {
        self.previous_time
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn pending_actions(&self) -> usize {
        self.pending.len()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Take and clear the last lock / top-out event.
    ///
    /// Only the latest event is kept; observers see every one via
    /// [`GameObserver::locked`].
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Begin a new game, discarding any previous one.
    ///
    /// The host clock keeps running across restarts: the baseline timestamp
    /// is not rewound, so the first update after a restart sees a normal delta.
    pub fn start(&mut self) {
        self.status = GameStatus::Active;

        self.grid.initialize();
        self.initialize();
        self.observer.score_changed(self.grid.score_update());

        self.update(self.previous_time);
        if !self.reset(None) {
            self.record(LockEvent {
                topped_out: true,
                ..LockEvent::default()
            });
        }
    }

    fn initialize(&mut self) {
        self.counter = 0;
        self.active = None;
        self.next = None;
        self.held = None;
        self.swapped = false;
        self.pending.clear();
        self.last_event = None;
        self.pieces_locked = 0;
        self.ghost.clear();
    }

    /// Spawn the next piece: the override if given, else the queued next
    /// piece, else a fresh one. Returns false when the spawn collides, which
    /// ends the game.
    fn reset(&mut self, held_override: Option<Shape>) -> bool {
        if self.status != GameStatus::Active {
            return false;
        }

        let shape = match held_override.or_else(|| self.next.take()) {
            Some(shape) => shape,
            None => self.generator.next_shape(),
        };
        self.next = Some(self.generator.next_shape());

        let x = (self.grid.width() / 2) as i32 - (shape.width() / 2) as i32;
        let position = Position::new(x, 0);
        let blocked = self.grid.check_collision(&shape, position);

        self.active = Some(ActivePiece {
            spawn_shape: shape.clone(),
            shape,
            position,
        });

        self.observer.next_changed(self.next.as_ref());
        self.observer.hold_changed(self.held.as_ref());
        self.sync_ghost();
        self.counter = 0;

        if blocked {
            self.top_out();
            return false;
        }
        true
    }

    fn top_out(&mut self) {
        self.status = GameStatus::GameOver;
        self.observer.game_over(self.grid.score());

        // A session that tops out before locking anything would top out again.
        if self.config.restart_on_game_over && self.pieces_locked > 0 {
            self.start();
        }
    }

    /// Mirror the active piece into the ghost and restamp the landing preview
    fn sync_ghost(&mut self) {
        match &self.active {
            Some(active) => {
                self.ghost.set_shape(&active.shape);
                self.ghost.set_position(active.position);
            }
            None => self.ghost.clear(),
        }
        self.ghost.project(&mut self.grid);
    }

    /// Advance the game to host time `timestamp_ms`.
    ///
    /// Queued actions are applied first. Gravity then accumulates the elapsed
    /// time scaled by `max(level, 1)` and drops the piece one row once the
    /// accumulator exceeds the base interval. Finally one frame is pushed to
    /// the observer. Returns true when gravity moved or locked the piece.
    pub fn update(&mut self, timestamp_ms: u64) -> bool {
        // A drained Restart clears `pending`; the rest of this batch still runs.
        let mut queued = std::mem::take(&mut self.pending);
        while let Some(action) = queued.pop_front() {
            self.apply_action(action);
        }
        if self.pending.is_empty() {
            self.pending = queued;
        }

        if self.status != GameStatus::Active {
            return false;
        }

        let delta = timestamp_ms.saturating_sub(self.previous_time);
        self.previous_time = self.previous_time.max(timestamp_ms);
        self.counter = self
            .counter
            .saturating_add(delta.saturating_mul(gravity_scale(self.grid.level())));

        let mut fell = false;
        if self.counter > self.config.base_interval_ms {
            self.drop_piece();
            fell = true;
        }

        self.observer.frame(&self.grid, self.active.as_ref());
        fell
    }

    /// Advance by `elapsed_ms` since the previous update
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        let now = self.previous_time.saturating_add(elapsed_ms);
        self.update(now)
    }

    /// Queue an action for the next update
    pub fn queue_action(&mut self, action: GameAction) -> Result<(), ControllerError> {
        if self.pending.len() >= self.config.max_pending_actions {
            return Err(ControllerError::QueueFull {
                capacity: self.config.max_pending_actions,
            });
        }
        self.pending.push_back(action);
        Ok(())
    }

    /// Apply a game action immediately
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::Drop => self.drop_piece(),
            GameAction::Slam => self.slam(),
            GameAction::RotateCw => self.rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }

    fn playing(&self) -> bool {
        self.status == GameStatus::Active && self.active.is_some()
    }

    /// Shift the piece horizontally; stays put if the target collides
    pub fn move_piece(&mut self, offset: i32) -> bool {
        if !self.playing() {
            return false;
        }

        let moved = match self.active.as_mut() {
            Some(active) => {
                let target = active.position.offset(offset, 0);
                if self.grid.check_collision(&active.shape, target) {
                    false
                } else {
                    active.position = target;
                    true
                }
            }
            None => false,
        };

        self.sync_ghost();
        moved
    }

    /// Move the piece down one row, locking it if it cannot move.
    ///
    /// Returns true when the piece moved, false when it locked.
    pub fn drop_piece(&mut self) -> bool {
        if !self.playing() {
            return false;
        }

        let moved = match self.active.as_mut() {
            Some(active) => {
                let target = active.position.offset(0, 1);
                if self.grid.check_collision(&active.shape, target) {
                    false
                } else {
                    active.position = target;
                    true
                }
            }
            None => false,
        };

        if !moved {
            self.place();
        }

        self.counter = 0;
        self.sync_ghost();
        moved
    }

    /// Hard drop: descend one row at a time (at most grid-height steps) and
    /// lock at the first blocked step.
    pub fn slam(&mut self) -> bool {
        if !self.playing() {
            return false;
        }

        let mut landed = false;
        if let Some(active) = self.active.as_mut() {
            for _ in 0..self.grid.height() {
                let target = active.position.offset(0, 1);
                if self.grid.check_collision(&active.shape, target) {
                    landed = true;
                    break;
                }
                active.position = target;
            }
        }

        if landed {
            self.place();
        }
        landed
    }

    /// Turn the piece a quarter turn.
    ///
    /// A colliding result gets one clamp, tried in order: pull a negative x
    /// back to 0, else pull the right edge inside the grid, else lift the
    /// bottom edge inside the grid. If the piece still collides the rotation
    /// is refused.
    pub fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.playing() {
            return false;
        }

        let grid_width = self.grid.width() as i32;
        let grid_height = self.grid.height() as i32;

        let rotated = match self.active.as_mut() {
            Some(active) => {
                let shape = active.shape.rotated(direction);
                let mut position = active.position;

                let fits = if !self.grid.check_collision(&shape, position) {
                    true
                } else {
                    let (w, h) = (shape.width() as i32, shape.height() as i32);
                    if position.x < 0 {
                        position.x = 0;
                    } else if position.x + w > grid_width {
                        position.x = grid_width - w;
                    } else if position.y + h > grid_height {
                        position.y = grid_height - h;
                    }
                    !self.grid.check_collision(&shape, position)
                };

                if fits {
                    active.shape = shape;
                    active.position = position;
                }
                fits
            }
            None => false,
        };

        self.sync_ghost();
        rotated
    }

    /// Exchange the active piece with the held one, once per lock.
    ///
    /// The active piece is stored in its spawn orientation. With an empty
    /// hold slot the queued next piece comes in instead.
    pub fn hold(&mut self) -> bool {
        if !self.playing() || self.swapped {
            return false;
        }

        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let previous = self.held.replace(active.spawn_shape.clone());
        self.swapped = true;

        if !self.reset(previous) {
            self.record(LockEvent {
                topped_out: true,
                ..LockEvent::default()
            });
        }
        true
    }

    /// Lock the active piece into the grid, clear rows and spawn the next one
    fn place(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.swapped = false;

        // The position passed a collision test before it was committed.
        if self
            .grid
            .merge_position(&active.shape, active.position)
            .is_err()
        {
            self.active = Some(active);
            self.top_out();
            return;
        }

        let lines = self.grid.clear_lines();
        let update = self.grid.update_score(lines);
        self.observer.score_changed(update);
        self.pieces_locked = self.pieces_locked.saturating_add(1);

        let spawned = self.reset(None);
        self.record(LockEvent {
            lines_cleared: lines,
            score_gained: update.gained,
            topped_out: !spawned,
        });
    }

    fn record(&mut self, event: LockEvent) {
        self.observer.locked(event);
        self.last_event = Some(event);
    }

    /// Ghost landing row for the active piece
    pub fn ghost_position(&self) -> Option<Position> {
        self.ghost.landing(&self.grid)
    }

    /// Fill `out` with the current state, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.board.clear();
        out.board.extend(self.grid.codes());

        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost = self.ghost_position();
        out.next = self.next.as_ref().map(Shape::kind);
        out.held = self.held.as_ref().map(Shape::kind);
        out.can_hold = self.can_hold();
        out.status = self.status;
        out.score = self.grid.score();
        out.level = self.grid.level();
        out.lines = self.grid.line_total();
        out.pieces_locked = self.pieces_locked;
        out.timers = TimersSnapshot {
            counter_ms: self.counter,
            previous_time_ms: self.previous_time,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}
