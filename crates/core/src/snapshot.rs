//! Hashable view of everything the drawer depends on.

use crate::intermission::{Intermission, Phase};
use crate::types::{StatField, MAX_PLAYERS};

/// Displayed state of an intermission.
///
/// Two equal snapshots draw identical frames, so renderers can hash one to
/// decide whether a redraw is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntermissionSnapshot {
    pub phase: Phase,
    /// Shown values per tracked player, in [`StatField::ALL`] order.
    pub shown: [[i64; StatField::ALL.len()]; MAX_PLAYERS],
    pub player_count: u8,
    pub prompt_visible: bool,
}

impl IntermissionSnapshot {
    pub fn is_counting(&self) -> bool {
        self.phase == Phase::Counting
    }
}

impl Intermission {
    pub fn snapshot(&self) -> IntermissionSnapshot {
        let mut snap = IntermissionSnapshot {
            phase: self.phase(),
            prompt_visible: self.prompt_visible(),
            ..IntermissionSnapshot::default()
        };
        if let Some(session) = self.session() {
            for (row, player) in snap.shown.iter_mut().zip(session.players()) {
                for (value, field) in row.iter_mut().zip(StatField::ALL) {
                    *value = player.stats.counter(field).display_value();
                }
            }
            snap.player_count = session.players().len() as u8;
        }
        snap
    }
}
