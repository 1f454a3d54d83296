//! Level summaries handed to an external stats collaborator on stop.

use crate::session::Layout;
use crate::stats::Totals;
use crate::types::{LevelId, NextLevel, Skill};

/// Final numbers of one tracked player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSummary {
    pub player: u8,
    pub kills: u32,
    pub items: u32,
    pub secrets: u32,
    /// Negative after suicides.
    pub frags: i64,
}

/// Pre-aggregated result of one intermission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSummary {
    pub level: LevelId,
    pub next: NextLevel,
    pub layout: Layout,
    pub skill: Skill,
    pub time_secs: u32,
    pub par_secs: Option<u32>,
    pub totals: Totals,
    pub players: Vec<PlayerSummary>,
}

/// Receives a [`LevelSummary`] when an intermission stops normally.
pub trait StatsSink {
    fn record(&mut self, summary: &LevelSummary);
}

/// Running totals across the levels of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EpisodeTotals {
    pub levels: u32,
    pub kills: u64,
    pub items: u64,
    pub secrets: u64,
    pub time_secs: u64,
    /// Levels finished at or under par.
    pub under_par: u32,
}

impl StatsSink for EpisodeTotals {
    fn record(&mut self, summary: &LevelSummary) {
        self.levels += 1;
        for p in &summary.players {
            self.kills += p.kills as u64;
            self.items += p.items as u64;
            self.secrets += p.secrets as u64;
        }
        self.time_secs += summary.time_secs as u64;
        if summary.par_secs.is_some_and(|par| summary.time_secs <= par) {
            self.under_par += 1;
        }
    }
}
