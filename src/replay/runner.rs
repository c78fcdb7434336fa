//! Replay runner - plays a script against a fresh game
//!
//! Waits are split into frame-sized `tick`s, actions go through the
//! controller's queue and are applied at the start of the next frame. With the
//! same seed, config and script the run is fully deterministic.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameSnapshot, PieceController, PieceQueue};
use crate::replay::config::ReplayConfig;
use crate::replay::log::{JsonlLog, RecordingObserver};
use crate::replay::script::{Script, Step};
use crate::types::{GameAction, FRAME_MS, GHOST_CODE};

type Game = PieceController<PieceQueue, RecordingObserver>;

/// End-of-run report printed by the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub seed: u32,
    pub status: &'static str,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub elapsed_ms: u64,
    pub frames: u64,
    pub pieces_locked: u32,
    pub game_overs: u32,
    pub board_hash: String,
    pub state_hash: String,
    /// Final board, top row first: `.` empty, `:` ghost, color code otherwise
    pub board: Vec<String>,
}

pub struct Replay<W: Write> {
    game: Game,
    seed: u32,
    frame_ms: u64,
    /// Host time played so far; keeps running while the game is over
    clock_ms: u64,
    log: Option<JsonlLog<W>>,
}

impl<W: Write> Replay<W> {
    /// Build a fresh, unstarted game for `script`
    pub fn new(config: &ReplayConfig, script: &Script, log: Option<JsonlLog<W>>) -> Result<Self> {
        let seed = script.seed.unwrap_or(config.seed);
        let frame_ms = script.frame_ms(FRAME_MS)?;
        let game = PieceController::with_parts(
            config.game.clone(),
            PieceQueue::new(seed),
            RecordingObserver::default(),
        )
        .context("invalid game configuration")?;

        Ok(Self {
            game,
            seed,
            frame_ms,
            clock_ms: 0,
            log,
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    /// Play every step of `script`, then settle any still-queued actions
    pub fn run(&mut self, script: &Script) -> Result<ReplaySummary> {
        let steps = script.steps()?;

        self.game.start();
        self.flush_records()?;

        for step in steps {
            match step {
                Step::Wait(ms) => self.wait(ms)?,
                Step::Action(action) => self.queue(action)?,
            }
        }

        self.settle()?;
        if let Some(log) = self.log.as_mut() {
            log.flush()?;
        }

        Ok(self.summary())
    }

    fn wait(&mut self, ms: u64) -> Result<()> {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.frame_ms);
            self.frame(step)?;
            remaining -= step;
        }
        Ok(())
    }

    fn frame(&mut self, elapsed_ms: u64) -> Result<()> {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.game.observer_mut().set_time(self.clock_ms);
        self.game.tick(elapsed_ms);
        self.flush_records()
    }

    /// Apply queued actions without advancing time
    fn settle(&mut self) -> Result<()> {
        if self.game.pending_actions() > 0 {
            self.frame(0)?;
        }
        Ok(())
    }

    fn queue(&mut self, action: GameAction) -> Result<()> {
        if self.game.queue_action(action).is_err() {
            self.settle()?;
            self.game
                .queue_action(action)
                .with_context(|| format!("cannot queue {}", action.as_str()))?;
        }
        Ok(())
    }

    fn flush_records(&mut self) -> Result<()> {
        let records = self.game.observer_mut().drain();
        match self.log.as_mut() {
            Some(log) => {
                for record in records {
                    log.write(&record)?;
                }
            }
            None => drop(records),
        }
        Ok(())
    }

    pub fn summary(&self) -> ReplaySummary {
        let snapshot = self.game.snapshot();
        let observer = self.game.observer();

        ReplaySummary {
            seed: self.seed,
            status: snapshot.status.as_str(),
            score: snapshot.score,
            lines: snapshot.lines,
            level: snapshot.level,
            elapsed_ms: self.clock_ms,
            frames: observer.frames(),
            pieces_locked: snapshot.pieces_locked,
            game_overs: observer.game_overs(),
            board_hash: format!("{:016x}", snapshot.board_hash()),
            state_hash: format!("{:016x}", snapshot.state_hash()),
            board: render_rows(&snapshot),
        }
    }

    pub fn into_log(self) -> Option<JsonlLog<W>> {
        self.log
    }
}

fn render_rows(snapshot: &GameSnapshot) -> Vec<String> {
    (0..snapshot.height)
        .map(|y| {
            (0..snapshot.width)
                .map(|x| match snapshot.cell(x, y) {
                    Some(0) | None => '.',
                    Some(GHOST_CODE) => ':',
                    Some(code) => char::from_digit(u32::from(code), 36).unwrap_or('#'),
                })
                .collect()
        })
        .collect()
}
