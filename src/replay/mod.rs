//! Headless replay host
//!
//! Plays a JSON action script against a seeded game, optionally appending
//! every score, preview, lock and game-over record to a JSONL log, and
//! reports a summary with stable board hashes.

pub mod config;
pub mod log;
pub mod runner;
pub mod script;

pub use config::ReplayConfig;
pub use log::{JsonlLog, Record, RecordingObserver};
pub use runner::{Replay, ReplaySummary};
pub use script::{Script, ScriptEvent, Step};
