//! Blockfall (workspace facade crate).
//!
//! The simulation lives in `crates/core` and the shared vocabulary in
//! `crates/types`; both are re-exported here as `blockfall::{core, types}`.
//! The [`replay`] module is the headless host used by the `blockfall` binary.

pub mod replay;

pub use blockfall_core as core;
pub use blockfall_types as types;
