//! Intermission screen (workspace facade crate).
//!
//! This package exposes `intermission::{core,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`, plus the pieces
//! only the terminal runner needs: command line, config file, cue playback and
//! the stats log.

pub mod cli;
pub mod config;
pub mod sound;
pub mod stats_log;

pub use intermission_core as core;
pub use intermission_input as input;
pub use intermission_term as term;
pub use intermission_types as types;
