//! Replay scripts - timed action sequences in JSON
//!
//! ```json
//! { "seed": 7, "frame_ms": 16,
//!   "events": [ { "type": "wait", "ms": 500 },
//!               { "type": "action", "action": "moveLeft" } ] }
//! ```
//!
//! Action names are the camelCase names of [`GameAction`] (aliases such as
//! `hardDrop` are accepted too).

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::GameAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptEvent {
    /// Let `ms` milliseconds of game time pass
    Wait { ms: u64 },
    /// Queue an action for the next frame
    Action { action: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_ms: Option<u64>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// A script event with its action name resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Wait(u64),
    Action(GameAction),
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("malformed replay script")
    }

    /// Resolve every event, failing on the first unknown action name
    pub fn steps(&self) -> Result<Vec<Step>> {
        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| match event {
                ScriptEvent::Wait { ms } => Ok(Step::Wait(*ms)),
                ScriptEvent::Action { action } => GameAction::from_str(action)
                    .map(Step::Action)
                    .ok_or_else(|| anyhow!("event {}: unknown action {:?}", index, action)),
            })
            .collect()
    }

    /// Frame length, validated
    pub fn frame_ms(&self, default: u64) -> Result<u64> {
        match self.frame_ms.unwrap_or(default) {
            0 => bail!("frame_ms must be positive"),
            ms => Ok(ms),
        }
    }

    /// Total game time covered by the waits
    pub fn duration_ms(&self) -> u64 {
        self.events
            .iter()
            .map(|event| match event {
                ScriptEvent::Wait { ms } => *ms,
                ScriptEvent::Action { .. } => 0,
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Short scripted game used when no script file is given
    pub fn demo() -> Self {
        fn wait(events: &mut Vec<ScriptEvent>, ms: u64) {
            events.push(ScriptEvent::Wait { ms });
        }
        fn act(events: &mut Vec<ScriptEvent>, action: GameAction) {
            events.push(ScriptEvent::Action {
                action: action.as_str().to_string(),
            });
        }

        let mut events = Vec::new();
        wait(&mut events, 1200);
        for round in 0..12 {
            let shift = match round % 4 {
                0 => Some((GameAction::MoveLeft, 5)),
                1 => Some((GameAction::MoveRight, 4)),
                2 => None,
                _ => Some((GameAction::MoveRight, 2)),
            };
            if round % 3 == 1 {
                act(&mut events, GameAction::RotateCw);
            }
            if let Some((action, times)) = shift {
                for _ in 0..times {
                    act(&mut events, action);
                    wait(&mut events, 48);
                }
            }
            if round == 5 {
                act(&mut events, GameAction::Hold);
            }
            wait(&mut events, 250);
            act(&mut events, GameAction::Slam);
            wait(&mut events, 600);
        }
        wait(&mut events, 2500);

        Self {
            seed: Some(2024),
            frame_ms: None,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r#"{"seed": 7, "events": [
                {"type": "wait", "ms": 100},
                {"type": "action", "action": "moveLeft"},
                {"type": "action", "action": "hardDrop"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(script.seed, Some(7));
        assert_eq!(script.frame_ms, None);
        assert_eq!(
            script.steps().unwrap(),
            vec![
                Step::Wait(100),
                Step::Action(GameAction::MoveLeft),
                Step::Action(GameAction::Slam),
            ]
        );
        assert_eq!(script.duration_ms(), 100);
    }

    #[test]
    fn test_unknown_action_is_reported() {
        let script = Script::from_json(
            r#"{"events": [{"type": "wait", "ms": 1}, {"type": "action", "action": "teleport"}]}"#,
        )
        .unwrap();
        let err = script.steps().unwrap_err().to_string();
        assert!(err.contains("event 1"), "{}", err);
        assert!(err.contains("teleport"), "{}", err);
    }

    #[test]
    fn test_malformed_script() {
        assert!(Script::from_json(r#"{"events": [{"type": "jump"}]}"#).is_err());
        assert!(Script::from_json("not json").is_err());
    }

    #[test]
    fn test_zero_frame_rejected() {
        let script = Script {
            frame_ms: Some(0),
            ..Script::default()
        };
        assert!(script.frame_ms(16).is_err());
        assert_eq!(Script::default().frame_ms(16).unwrap(), 16);
    }

    #[test]
    fn test_demo_round_trips_through_json() {
        let demo = Script::demo();
        let text = serde_json::to_string(&demo).unwrap();
        let parsed = Script::from_json(&text).unwrap();
        assert_eq!(parsed, demo);
        assert!(parsed.steps().is_ok());
    }
}
