//! Intermission core - pure, deterministic, and testable
//!
//! This crate contains the intermission state machine, the tally animator, the
//! stat model and the drawer. It has **no dependencies** on terminals, audio or
//! files:
//!
//! - **Deterministic**: Same stats and inputs produce identical frames (demo playback)
//! - **Testable**: The drawer writes into a [`Canvas`] that tests can record
//! - **Fixed-size**: Players and per-tick cues live in `ArrayVec`s
//!
//! # Module Structure
//!
//! - [`intermission`]: the `start` / `ticker` / `drawer` / `stop` lifecycle
//! - [`tally`]: the stepping rule for displayed values
//! - [`stats`]: raw level results and per-player raw/shown counters
//! - [`session`]: session flags, screen layouts and the level catalog
//! - [`canvas`]: the drawing surface trait and a recording canvas
//! - [`draw`]: layout of the screen on the virtual canvas
//! - [`summary`]: level summaries handed to a [`StatsSink`] on stop
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --start--> Counting --all done + min ticks--> WaitingForInput
//!                              |                                    |
//!                              +--button press (skip)---------------+
//!                                                                   |
//!                      Finished <--button press or idle timeout-----+
//!                          |
//!                        stop --> Uninitialized (next level returned)
//! ```
//!
//! `abort` releases the session from any active phase.
//!
//! # Example
//!
//! ```
//! use intermission_core::{
//!     CompletedLevelStats, Intermission, LevelTable, PlayerResult, RecordingCanvas, SessionFlags,
//! };
//! use intermission_core::types::{LevelId, NextLevel, TickInput};
//!
//! let catalog = LevelTable::new()
//!     .with_level(LevelId(1), "Staging Area", Some(30))
//!     .with_level(LevelId(2), "The Terraformer", Some(60));
//! let stats = CompletedLevelStats::new(LevelId(1))
//!     .with_player(0, PlayerResult::new(12, 7, 1))
//!     .with_totals(20, 10, 2)
//!     .with_time_seconds(75);
//!
//! let mut wi = Intermission::default();
//! wi.start(&stats, NextLevel::Map(LevelId(2)), SessionFlags::single_player(), &catalog)
//!     .unwrap();
//! wi.ticker(&TickInput::none()).unwrap();
//!
//! let mut canvas = RecordingCanvas::new();
//! wi.drawer(&mut canvas).unwrap();
//! assert!(canvas.contains_text("Staging Area"));
//! assert!(canvas.contains_text("2"));
//! ```

pub mod canvas;
pub mod config;
pub mod draw;
pub mod edge;
pub mod error;
pub mod intermission;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod summary;
pub mod tally;

pub use intermission_types as types;

// Re-export commonly used types for convenience
pub use canvas::{Align, Backdrop, Canvas, DrawCall, Image, RecordingCanvas, Tone};
pub use config::IntermissionConfig;
pub use draw::{format_clock, percent};
pub use edge::EdgeDetector;
pub use error::IntermissionError;
pub use intermission::{Intermission, Phase, Session, TickSignal, TrackedPlayer};
pub use session::{Layout, LevelCatalog, LevelEntry, LevelTable, SessionFlags};
pub use snapshot::IntermissionSnapshot;
pub use stats::{CompletedLevelStats, LevelTotals, PlayerResult, StatEntry, Totals};
pub use summary::{EpisodeTotals, LevelSummary, PlayerSummary, StatsSink};
pub use tally::{advance_tally, ticks_to_complete, Counter};
