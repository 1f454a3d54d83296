//! Terminal renderer for the intermission screen.
//!
//! This is a small, game-oriented rendering layer. It avoids widget toolkits
//! and instead renders into a simple framebuffer that can be flushed to a
//! terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Realize the drawer's virtual 320x240 canvas on any terminal size
//! - Only redraw cells that changed between frames

pub mod fb;
pub mod render_throttle;
pub mod renderer;
pub mod view;

pub use intermission_core as core;
pub use intermission_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, TextAnchor};
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::TerminalRenderer;
pub use view::{FrameCanvas, IntermissionView, Viewport};
