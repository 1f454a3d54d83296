//! Terminal input for the intermission screen.
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Buttons`] and keeps a per-player held-button
//! state suitable for terminals that never emit key-release events.

pub mod handler;
pub mod map;

pub use intermission_types as types;

pub use handler::HeldButtons;
pub use map::{map_key, should_quit};
