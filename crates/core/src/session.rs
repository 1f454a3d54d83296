//! Session flags, screen layouts and the level catalog collaborator.

use crate::canvas::Backdrop;
use crate::types::{LevelId, Skill, MAX_PLAYERS};

/// Game configuration relevant to the intermission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    /// More than one player slot may be in game.
    pub multiplayer: bool,
    /// Deathmatch rules (implies multiplayer): frags are tallied.
    pub deathmatch: bool,
    /// Demo playback/recording: the screen leaves on its own after a delay.
    pub non_interactive: bool,
    pub skill: Skill,
    /// Slot of the local player.
    pub console_player: usize,
}

impl SessionFlags {
    pub fn single_player() -> Self {
        Self::default()
    }

    pub fn cooperative() -> Self {
        Self {
            multiplayer: true,
            ..Self::default()
        }
    }

    pub fn deathmatch() -> Self {
        Self {
            multiplayer: true,
            deathmatch: true,
            ..Self::default()
        }
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skill = skill;
        self
    }

    pub fn with_console_player(mut self, player: usize) -> Self {
        self.console_player = player;
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.non_interactive = true;
        self
    }
}

/// Arrangement of the statistics on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// The console player's stats as labelled rows, with par time.
    Single,
    /// One row per in-game player: kills, items, secrets.
    Cooperative,
    /// One row per in-game player: kills, items, secrets, frags.
    Deathmatch,
}

impl Layout {
    pub fn from_flags(flags: &SessionFlags) -> Self {
        if flags.deathmatch {
            Layout::Deathmatch
        } else if flags.multiplayer {
            Layout::Cooperative
        } else {
            Layout::Single
        }
    }

    pub fn backdrop(&self) -> Backdrop {
        match self {
            Layout::Single => Backdrop::Solo,
            Layout::Cooperative => Backdrop::Cooperative,
            Layout::Deathmatch => Backdrop::Deathmatch,
        }
    }

    /// Whether this layout tracks every in-game player rather than just the
    /// console player.
    pub fn shows_all_players(&self) -> bool {
        !matches!(self, Layout::Single)
    }

    pub fn tallies_frags(&self) -> bool {
        matches!(self, Layout::Deathmatch)
    }
}

/// Level/episode data: which maps exist, their names and par times.
pub trait LevelCatalog {
    fn level_name(&self, id: LevelId) -> Option<&str>;

    fn par_seconds(&self, id: LevelId) -> Option<u32>;

    fn contains(&self, id: LevelId) -> bool {
        self.level_name(id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub id: LevelId,
    pub name: String,
    pub par_seconds: Option<u32>,
}

/// In-memory [`LevelCatalog`].
#[derive(Debug, Clone, Default)]
pub struct LevelTable {
    entries: Vec<LevelEntry>,
}

impl LevelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`LevelTable::insert`].
    pub fn with_level(mut self, id: LevelId, name: impl Into<String>, par_seconds: Option<u32>) -> Self {
        self.insert(LevelEntry {
            id,
            name: name.into(),
            par_seconds,
        });
        self
    }

    /// Add or replace the entry for `entry.id`.
    pub fn insert(&mut self, entry: LevelEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: LevelId) -> Option<&LevelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelEntry> {
        self.entries.iter()
    }
}

impl LevelCatalog for LevelTable {
    fn level_name(&self, id: LevelId) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    fn par_seconds(&self, id: LevelId) -> Option<u32> {
        self.get(id).and_then(|e| e.par_seconds)
    }
}

pub(crate) fn console_slot(flags: &SessionFlags) -> Option<usize> {
    (flags.console_player < MAX_PLAYERS).then_some(flags.console_player)
}
