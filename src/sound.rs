//! Audio collaborator for intermission cues.
//!
//! The core only emits [`Cue`]s; the runner forwards them here.

use std::io::{self, Write};

use anyhow::Result;

use crate::types::Cue;

pub trait CuePlayer {
    fn play(&mut self, cue: Cue) -> Result<()>;
}

/// Rings the terminal bell.
///
/// Terminals have one sound, so only the cues a player would notice ring it:
/// field completions and the advance.
pub struct Bell<W: Write = io::Stdout> {
    out: W,
}

impl Bell<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for Bell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Bell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> CuePlayer for Bell<W> {
    fn play(&mut self, cue: Cue) -> Result<()> {
        match cue {
            Cue::TallyTick | Cue::FieldComplete { .. } => Ok(()),
            Cue::AllComplete | Cue::Advance => {
                self.out.write_all(b"\x07")?;
                self.out.flush()?;
                Ok(())
            }
        }
    }
}

pub struct Mute;

impl CuePlayer for Mute {
    fn play(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatField;

    #[test]
    fn bell_rings_on_completion_and_advance() {
        let mut bell = Bell::with_writer(Vec::new());
        bell.play(Cue::TallyTick).unwrap();
        bell.play(Cue::FieldComplete {
            player: 0,
            field: StatField::Kills,
        })
        .unwrap();
        bell.play(Cue::AllComplete).unwrap();
        bell.play(Cue::Advance).unwrap();
        assert_eq!(bell.into_writer(), b"\x07\x07".to_vec());
    }

    #[test]
    fn mute_plays_nothing() {
        assert!(Mute.play(Cue::Advance).is_ok());
    }
}
