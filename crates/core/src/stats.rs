//! Stat model: what the level reported and what the screen currently shows.
//!
//! [`CompletedLevelStats`] is the raw, untrusted input handed over by the level
//! simulation. Counts are signed so corrupt data can be represented; they are
//! clamped to zero when the per-player [`StatEntry`] is built.

use tracing::warn;

use crate::tally::Counter;
use crate::types::{LevelId, StatField, MAX_PLAYERS, TICRATE};

/// Final counters of one player slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerResult {
    pub in_game: bool,
    pub kills: i32,
    pub items: i32,
    pub secrets: i32,
    pub frags: i32,
}

impl PlayerResult {
    /// An in-game player with the given counts and no frags.
    pub fn new(kills: i32, items: i32, secrets: i32) -> Self {
        Self {
            in_game: true,
            kills,
            items,
            secrets,
            frags: 0,
        }
    }

    pub fn with_frags(mut self, frags: i32) -> Self {
        self.frags = frags;
        self
    }
}

/// How many kills/items/secrets the level contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTotals {
    pub kills: i32,
    pub items: i32,
    pub secrets: i32,
}

/// Sanitized [`LevelTotals`]. Zero means the total is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    pub kills: u32,
    pub items: u32,
    pub secrets: u32,
}

impl Totals {
    pub fn get(&self, field: StatField) -> u32 {
        match field {
            StatField::Kills => self.kills,
            StatField::Items => self.items,
            StatField::Secrets => self.secrets,
            StatField::Time | StatField::Frags => 0,
        }
    }
}

impl From<LevelTotals> for Totals {
    fn from(value: LevelTotals) -> Self {
        Self {
            kills: clamp_total("kills", value.kills),
            items: clamp_total("items", value.items),
            secrets: clamp_total("secrets", value.secrets),
        }
    }
}

/// Level-completion data supplied by the level simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletedLevelStats {
    /// The map that was just finished.
    pub level: LevelId,
    pub totals: LevelTotals,
    /// Time spent in the level, in game ticks.
    pub time_tics: i64,
    pub players: [PlayerResult; MAX_PLAYERS],
}

impl CompletedLevelStats {
    /// No players in game, zero time and totals.
    pub fn new(level: LevelId) -> Self {
        Self {
            level,
            totals: LevelTotals::default(),
            time_tics: 0,
            players: [PlayerResult::default(); MAX_PLAYERS],
        }
    }

    /// Place `result` in slot `player`. Slots past `MAX_PLAYERS` are ignored.
    pub fn with_player(mut self, player: usize, result: PlayerResult) -> Self {
        if let Some(slot) = self.players.get_mut(player) {
            *slot = result;
        }
        self
    }

    pub fn with_totals(mut self, kills: i32, items: i32, secrets: i32) -> Self {
        self.totals = LevelTotals {
            kills,
            items,
            secrets,
        };
        self
    }

    pub fn with_time_tics(mut self, time_tics: i64) -> Self {
        self.time_tics = time_tics;
        self
    }

    pub fn with_time_seconds(mut self, seconds: i64) -> Self {
        self.time_tics = seconds.saturating_mul(TICRATE as i64);
        self
    }

    /// Elapsed level time in whole seconds; negative time becomes zero.
    pub fn time_seconds(&self) -> u32 {
        if self.time_tics < 0 {
            warn!(time_tics = self.time_tics, "negative level time clamped to zero");
            return 0;
        }
        let secs = self.time_tics / TICRATE as i64;
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// Raw and displayed statistics of one tracked player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatEntry {
    pub kills: Counter,
    pub items: Counter,
    pub secrets: Counter,
    /// Level time in seconds.
    pub time: Counter,
    /// Always zero outside deathmatch.
    pub frags: Counter,
    /// Par time in seconds, when the level has one. Not animated.
    pub par: Option<u32>,
}

impl StatEntry {
    /// Build the entry for `player` from untrusted level data.
    pub fn from_result(
        player: usize,
        result: &PlayerResult,
        time_secs: u32,
        par: Option<u32>,
        count_frags: bool,
    ) -> Self {
        // Frags may be negative after suicides.
        let frags = if count_frags {
            Counter::signed(result.frags)
        } else {
            Counter::new(0)
        };
        Self {
            kills: Counter::new(clamp_count(player, StatField::Kills, result.kills)),
            items: Counter::new(clamp_count(player, StatField::Items, result.items)),
            secrets: Counter::new(clamp_count(player, StatField::Secrets, result.secrets)),
            time: Counter::new(time_secs),
            frags,
            par,
        }
    }

    pub fn counter(&self, field: StatField) -> &Counter {
        match field {
            StatField::Kills => &self.kills,
            StatField::Items => &self.items,
            StatField::Secrets => &self.secrets,
            StatField::Time => &self.time,
            StatField::Frags => &self.frags,
        }
    }

    pub fn counter_mut(&mut self, field: StatField) -> &mut Counter {
        match field {
            StatField::Kills => &mut self.kills,
            StatField::Items => &mut self.items,
            StatField::Secrets => &mut self.secrets,
            StatField::Time => &mut self.time,
            StatField::Frags => &mut self.frags,
        }
    }

    pub fn is_done(&self) -> bool {
        StatField::ALL.iter().all(|&f| self.counter(f).is_done())
    }

    pub fn snap_all(&mut self) {
        for field in StatField::ALL {
            self.counter_mut(field).snap();
        }
    }
}

fn clamp_count(player: usize, field: StatField, value: i32) -> u32 {
    if value < 0 {
        warn!(
            player,
            field = field.as_str(),
            value,
            "negative stat count clamped to zero"
        );
        return 0;
    }
    value as u32
}

fn clamp_total(what: &'static str, value: i32) -> u32 {
    if value < 0 {
        warn!(total = what, value, "negative level total clamped to zero");
        return 0;
    }
    value as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_clamped() {
        let result = PlayerResult::new(-3, 5, -1);
        let entry = StatEntry::from_result(0, &result, 10, None, true);
        assert_eq!(entry.kills.raw(), 0);
        assert_eq!(entry.items.raw(), 5);
        assert_eq!(entry.secrets.raw(), 0);
        assert_eq!(entry.time.raw(), 10);
    }

    #[test]
    fn negative_frags_keep_their_sign() {
        let result = PlayerResult::new(0, 0, 0).with_frags(-2);
        let entry = StatEntry::from_result(0, &result, 0, None, true);
        assert_eq!(entry.frags.signed_raw(), -2);
        assert!(!entry.frags.is_done());
    }

    #[test]
    fn frags_ignored_outside_deathmatch() {
        let result = PlayerResult::new(1, 1, 1).with_frags(12);
        let entry = StatEntry::from_result(0, &result, 0, None, false);
        assert_eq!(entry.frags.raw(), 0);
        assert!(entry.frags.is_done());
    }

    #[test]
    fn time_converts_tics_to_seconds() {
        let stats = CompletedLevelStats::new(LevelId(1)).with_time_tics(35 * 90 + 34);
        assert_eq!(stats.time_seconds(), 90);

        let stats = CompletedLevelStats::new(LevelId(1)).with_time_tics(-700);
        assert_eq!(stats.time_seconds(), 0);

        let stats = CompletedLevelStats::new(LevelId(1)).with_time_seconds(125);
        assert_eq!(stats.time_seconds(), 125);
    }

    #[test]
    fn totals_are_sanitized() {
        let totals = Totals::from(LevelTotals {
            kills: 50,
            items: -4,
            secrets: 3,
        });
        assert_eq!(totals.get(StatField::Kills), 50);
        assert_eq!(totals.get(StatField::Items), 0);
        assert_eq!(totals.get(StatField::Secrets), 3);
        assert_eq!(totals.get(StatField::Time), 0);
    }

    #[test]
    fn entry_snap_completes_everything() {
        let result = PlayerResult::new(10, 20, 3);
        let mut entry = StatEntry::from_result(0, &result, 300, Some(120), false);
        assert!(!entry.is_done());
        entry.snap_all();
        assert!(entry.is_done());
        assert_eq!(entry.time.shown(), 300);
        assert_eq!(entry.par, Some(120));
    }
}
