//! Press-edge detection over per-tick held buttons.

use crate::types::{Buttons, TickInput, MAX_PLAYERS};

/// Remembers last tick's buttons so a held button only counts once.
///
/// The first input seen is only a baseline. Buttons still held from gameplay
/// (the USE that hit the exit switch) must be released and pressed again
/// before they count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    prev: [Buttons; MAX_PLAYERS],
    primed: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `input` and report whether any slot allowed by `slots` pressed
    /// an advance button this tick that was not held on the previous tick.
    ///
    /// Every slot's history is updated, tracked or not.
    pub fn advance_pressed(&mut self, input: &TickInput, slots: impl Fn(usize) -> bool) -> bool {
        if !self.primed {
            self.prev = input.buttons;
            self.primed = true;
            return false;
        }
        let mut pressed = false;
        for (slot, (prev, now)) in self.prev.iter_mut().zip(input.buttons.iter()).enumerate() {
            let edge = *now & !*prev;
            if slots(slot) && edge.advances() {
                pressed = true;
            }
            *prev = *now;
        }
        pressed
    }
}
