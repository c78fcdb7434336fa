//! Headless replay runner (default binary).
//!
//! Usage: `blockfall [SCRIPT.json]`
//!
//! Plays the script (or a built-in demo) against a fresh game configured from
//! `BLOCKFALL_*` environment variables and prints a JSON summary to stdout.
//! Status lines go to stderr.

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};

use blockfall::replay::{JsonlLog, Replay, ReplayConfig, Script};

fn main() -> Result<()> {
    let config = ReplayConfig::from_env();

    let script = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read script {}", path))?;
            let script = Script::from_json(&text).with_context(|| format!("in {}", path))?;
            eprintln!(
                "[Replay] Loaded {} ({} events, {}ms)",
                path,
                script.events.len(),
                script.duration_ms()
            );
            script
        }
        None => {
            eprintln!("[Replay] No script given, playing the demo");
            Script::demo()
        }
    };

    let log: Option<JsonlLog<BufWriter<File>>> = match config.log_path.as_deref() {
        Some(path) => {
            eprintln!("[Replay] Logging records to {}", path);
            Some(JsonlLog::open(path)?)
        }
        None => None,
    };

    let mut replay = Replay::new(&config, &script, log)?;
    let summary = replay.run(&script)?;

    let snapshot = replay.snapshot();
    if !snapshot.playable() {
        eprintln!("[Replay] Game over after {} pieces", snapshot.pieces_locked);
    }

    if let Some(log) = replay.into_log() {
        eprintln!("[Replay] Wrote {} records", log.written());
    }
    eprintln!(
        "[Replay] Finished: {} points, {} lines, status {}",
        summary.score, summary.lines, summary.status
    );

    let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
    println!("{}", json);
    Ok(())
}
