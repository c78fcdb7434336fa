//! Event records and the JSONL log they are written to.
//!
//! The core pushes score, preview, frame and game-over notifications into a
//! [`RecordingObserver`]; the runner drains them into a [`JsonlLog`] after
//! every frame, one JSON object per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{ActivePiece, GameObserver, Grid, LockEvent, ScoreUpdate, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Record {
    Score {
        ts: u64,
        score: u32,
        lines: u32,
        level: u32,
        gained: u32,
    },
    Next {
        ts: u64,
        kind: Option<&'static str>,
    },
    Hold {
        ts: u64,
        kind: Option<&'static str>,
    },
    Lock {
        ts: u64,
        lines_cleared: u32,
        score_gained: u32,
        topped_out: bool,
    },
    GameOver {
        ts: u64,
        score: u32,
    },
}

impl Record {
    pub fn lock(ts: u64, event: LockEvent) -> Self {
        Record::Lock {
            ts,
            lines_cleared: event.lines_cleared,
            score_gained: event.score_gained,
            topped_out: event.topped_out,
        }
    }
}

/// Observer that buffers records for the host to drain
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    now_ms: u64,
    frames: u64,
    game_overs: u32,
    records: Vec<Record>,
}

impl RecordingObserver {
    /// Timestamp stamped on records pushed from now on
    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn game_overs(&self) -> u32 {
        self.game_overs
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Record> {
        self.records.drain(..)
    }
}

impl GameObserver for RecordingObserver {
    fn score_changed(&mut self, update: ScoreUpdate) {
        self.records.push(Record::Score {
            ts: self.now_ms,
            score: update.score,
            lines: update.line_total,
            level: update.level,
            gained: update.gained,
        });
    }

    fn next_changed(&mut self, next: Option<&Shape>) {
        self.records.push(Record::Next {
            ts: self.now_ms,
            kind: next.map(|shape| shape.kind().as_str()),
        });
    }

    fn hold_changed(&mut self, held: Option<&Shape>) {
        self.records.push(Record::Hold {
            ts: self.now_ms,
            kind: held.map(|shape| shape.kind().as_str()),
        });
    }

    fn frame(&mut self, _grid: &Grid, _active: Option<&ActivePiece>) {
        self.frames += 1;
    }

    fn locked(&mut self, event: LockEvent) {
        self.records.push(Record::lock(self.now_ms, event));
    }

    fn game_over(&mut self, score: u32) {
        self.game_overs += 1;
        self.records.push(Record::GameOver {
            ts: self.now_ms,
            score,
        });
    }
}

/// Line-delimited JSON writer
pub struct JsonlLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    written: u64,
}

impl JsonlLog<BufWriter<File>> {
    /// Append to `path`, creating it if needed
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            written: 0,
        }
    }

    pub fn write(&mut self, record: &Record) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record).context("failed to encode log record")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .context("failed to write log record")?;
        self.written += 1;
        Ok(())
    }

    /// Records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush log")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
