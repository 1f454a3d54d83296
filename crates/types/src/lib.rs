//! Shared types and constants for the intermission screen.
//!
//! Everything here is plain data: level identifiers, per-player button state,
//! audio cues and the tuning constants used by the tally animation. The crate is
//! shared by the core state machine, the terminal input mapper and the
//! renderer, so it carries no runtime dependencies beyond `bitflags`.
//!
//! # Timing
//!
//! The intermission runs on the engine's fixed game tick. All durations are
//! counted in ticks, never wall-clock time, so demo playback stays
//! reproducible.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICRATE` | 35 | Game ticks per second |
//! | `DEFAULT_COUNT_STEP` | 2 | Kill/item/secret units added per tick |
//! | `DEFAULT_TIME_STEP_SECS` | 3 | Seconds of level time added per tick |
//! | `DEFAULT_FRAG_STEP` | 1 | Frags added per tick (deathmatch) |
//! | `DEFAULT_MIN_COUNT_TICKS` | 10 | Minimum ticks spent counting |
//! | `DEFAULT_DEMO_WAIT_TICKS` | 140 | Auto-advance delay for non-interactive sessions |
//! | `DEFAULT_TALLY_CUE_INTERVAL` | 4 | Ticks between tally sound cues |
//! | `DEFAULT_PROMPT_BLINK_TICKS` | 16 | Half-period of the continue prompt blink |
//!
//! # Virtual screen
//!
//! Draw coordinates are expressed on a `SCREEN_WIDTH` x `SCREEN_HEIGHT` virtual
//! canvas; renderers scale them to their own resolution.
//!
//! # Examples
//!
//! ```
//! use intermission_types::{Buttons, LevelId, NextLevel, StatField, TickInput};
//!
//! let next = NextLevel::Map(LevelId(5));
//! assert_eq!(next.map(), Some(LevelId(5)));
//! assert_eq!(LevelId(5).to_string(), "MAP05");
//!
//! let input = TickInput::none().with_player(0, Buttons::USE);
//! assert!(input.buttons[0].advances());
//!
//! assert_eq!(StatField::from_str("kills"), Some(StatField::Kills));
//! ```

use std::fmt;

use bitflags::bitflags;

/// Game ticks per second.
pub const TICRATE: u32 = 35;

/// Duration of one game tick in milliseconds (rounded down).
pub const TICK_MS: u32 = 1000 / TICRATE;

/// Maximum number of players in a session.
pub const MAX_PLAYERS: usize = 4;

/// Width of the virtual draw canvas.
pub const SCREEN_WIDTH: i32 = 320;

/// Height of the virtual draw canvas.
pub const SCREEN_HEIGHT: i32 = 240;

/// Kill/item/secret units added to the displayed value per tick.
pub const DEFAULT_COUNT_STEP: u32 = 2;

/// Seconds of level time added to the displayed clock per tick.
pub const DEFAULT_TIME_STEP_SECS: u32 = 3;

/// Frags added to the displayed value per tick.
pub const DEFAULT_FRAG_STEP: u32 = 1;

/// Minimum number of ticks spent in the counting phase.
pub const DEFAULT_MIN_COUNT_TICKS: u32 = 10;

/// Idle ticks before a non-interactive session advances on its own (4 seconds).
pub const DEFAULT_DEMO_WAIT_TICKS: u32 = 4 * TICRATE;

/// Counting ticks between two tally sound cues.
pub const DEFAULT_TALLY_CUE_INTERVAL: u32 = 4;

/// Ticks the continue prompt stays visible (and then hidden) while blinking.
pub const DEFAULT_PROMPT_BLINK_TICKS: u32 = 16;

/// Upper bound of cues a single tick can produce.
///
/// One completion per field per player, plus tally/all-complete/advance.
pub const MAX_CUES_PER_TICK: usize = MAX_PLAYERS * StatField::ALL.len() + 4;

/// Identifier of a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelId(pub u16);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MAP{:02}", self.0)
    }
}

/// Where the game goes once the intermission is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NextLevel {
    /// Load this map next.
    Map(LevelId),
    /// The episode is over; the finale takes control.
    EndOfEpisode,
}

impl NextLevel {
    pub fn map(&self) -> Option<LevelId> {
        match self {
            NextLevel::Map(id) => Some(*id),
            NextLevel::EndOfEpisode => None,
        }
    }
}

/// A single tallied statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatField {
    Kills,
    Items,
    Secrets,
    /// Level time, in seconds.
    Time,
    /// Deathmatch only.
    Frags,
}

impl StatField {
    /// Every field, in display order.
    pub const ALL: [StatField; 5] = [
        StatField::Kills,
        StatField::Items,
        StatField::Secrets,
        StatField::Time,
        StatField::Frags,
    ];

    /// Parse a field name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kills" => Some(StatField::Kills),
            "items" => Some(StatField::Items),
            "secrets" => Some(StatField::Secrets),
            "time" => Some(StatField::Time),
            "frags" => Some(StatField::Frags),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatField::Kills => "kills",
            StatField::Items => "items",
            StatField::Secrets => "secrets",
            StatField::Time => "time",
            StatField::Frags => "frags",
        }
    }

    /// On-screen label.
    pub fn label(&self) -> &'static str {
        match self {
            StatField::Kills => "KILLS",
            StatField::Items => "ITEMS",
            StatField::Secrets => "SECRETS",
            StatField::Time => "TIME",
            StatField::Frags => "FRAGS",
        }
    }
}

/// Difficulty the level was played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    Baby,
    Easy,
    #[default]
    Medium,
    Hard,
    Nightmare,
}

impl Skill {
    /// Map a 0-based skill index; out-of-range values clamp to the nearest skill.
    pub fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Skill::Baby,
            1 => Skill::Easy,
            2 => Skill::Medium,
            3 => Skill::Hard,
            _ => Skill::Nightmare,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Baby => "baby",
            Skill::Easy => "easy",
            Skill::Medium => "medium",
            Skill::Hard => "hard",
            Skill::Nightmare => "nightmare",
        }
    }
}

bitflags! {
    /// Buttons held by one player during a tick.
    ///
    /// The intermission reacts to the press edge of any of these buttons: the
    /// first edge fast-forwards the tally, the next one leaves the screen.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const ATTACK = 1 << 0;
        const USE    = 1 << 1;
        const JUMP   = 1 << 2;
    }
}

impl Buttons {
    /// Whether any button that can skip or advance the screen is held.
    pub fn advances(self) -> bool {
        self.intersects(Buttons::ATTACK | Buttons::USE | Buttons::JUMP)
    }
}

/// Input sampled once per tick: the held buttons of every player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TickInput {
    pub buttons: [Buttons; MAX_PLAYERS],
}

impl TickInput {
    /// No buttons held by anyone.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the held buttons of `player`. Slots past `MAX_PLAYERS` are ignored.
    pub fn with_player(mut self, player: usize, buttons: Buttons) -> Self {
        if let Some(slot) = self.buttons.get_mut(player) {
            *slot = buttons;
        }
        self
    }
}

/// One-shot audio notifications produced by the ticker.
///
/// The core never plays sound itself; the caller drains cues after each tick
/// and forwards them to whatever audio backend it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cue {
    /// Periodic tick while numbers are still climbing.
    TallyTick,
    /// A player's counter reached its final value.
    FieldComplete { player: u8, field: StatField },
    /// Every counter of every tracked player reached its final value.
    AllComplete,
    /// The screen is being left.
    Advance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_defaults() {
        assert_eq!(TICRATE, 35);
        assert_eq!(TICK_MS, 28);
        assert_eq!(DEFAULT_COUNT_STEP, 2);
        assert_eq!(DEFAULT_TIME_STEP_SECS, 3);
        assert_eq!(DEFAULT_FRAG_STEP, 1);
        assert_eq!(DEFAULT_MIN_COUNT_TICKS, 10);
        assert_eq!(DEFAULT_DEMO_WAIT_TICKS, 140);
        assert_eq!(MAX_CUES_PER_TICK, 24);
    }

    #[test]
    fn level_id_formats_as_map_name() {
        assert_eq!(LevelId(1).to_string(), "MAP01");
        assert_eq!(LevelId(28).to_string(), "MAP28");
        assert_eq!(LevelId(123).to_string(), "MAP123");
    }

    #[test]
    fn advance_buttons() {
        assert!(Buttons::ATTACK.advances());
        assert!(Buttons::USE.advances());
        assert!(Buttons::JUMP.advances());
        assert!(!Buttons::empty().advances());
    }

    #[test]
    fn tick_input_ignores_out_of_range_player() {
        let input = TickInput::none().with_player(MAX_PLAYERS, Buttons::ATTACK);
        assert_eq!(input, TickInput::none());
    }
}
