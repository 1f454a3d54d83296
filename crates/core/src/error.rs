//! Contract violations reported by the intermission entry points.
//!
//! These are caller bugs, not runtime conditions: corrupt statistics are
//! sanitized instead of rejected. Every variant is logged at error level by the
//! entry point that returns it.

use crate::types::LevelId;
use crate::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IntermissionError {
    /// `start` while a session is still running.
    #[error("intermission already active (phase {0:?}); stop it before starting again")]
    AlreadyActive(Phase),

    /// `ticker`, `drawer`, `stop` or `abort` without a running session.
    #[error("no intermission session is active")]
    NotActive,

    /// `ticker` after the advance signal was already delivered.
    #[error("intermission already finished; call stop before ticking again")]
    AlreadyFinished,

    /// `stop` before the session reached the finished phase.
    #[error("intermission cannot stop in phase {0:?}; use abort to leave early")]
    NotFinished(Phase),

    /// The next map is not in the level catalog.
    #[error("next level {0} is not in the level catalog")]
    UnknownLevel(LevelId),
}

impl IntermissionError {
    /// Stable identifier, handy for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            IntermissionError::AlreadyActive(_) => "already_active",
            IntermissionError::NotActive => "not_active",
            IntermissionError::AlreadyFinished => "already_finished",
            IntermissionError::NotFinished(_) => "not_finished",
            IntermissionError::UnknownLevel(_) => "unknown_level",
        }
    }
}
