//! Held-button tracker for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! On those terminals a held key goes quiet for the typematic delay and then
//! resends presses; those resent presses are folded into the original hold so
//! they never read as a second press edge.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Buttons, TickInput};

// A tap on a terminal without release events must still read as "held" for a
// few ticks so the intermission sees a press edge, but must not stick.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

// Longer than common typematic delays (250-500 ms).
const DEFAULT_REPEAT_GUARD_MS: u32 = 600;

/// Buttons currently held by the local player.
#[derive(Debug, Clone)]
pub struct HeldButtons {
    held: Buttons,
    /// Auto-released buttons whose key may still be repeating.
    repeating: Buttons,
    since_last_key_ms: u32,
    key_release_timeout_ms: u32,
    repeat_guard_ms: u32,
    release_events: bool,
}

impl Default for HeldButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl HeldButtons {
    pub fn new() -> Self {
        Self {
            held: Buttons::empty(),
            repeating: Buttons::empty(),
            since_last_key_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            repeat_guard_ms: DEFAULT_REPEAT_GUARD_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// The terminal reports real release and repeat events, so no timeout
    /// is needed.
    pub fn with_release_events(mut self, release_events: bool) -> Self {
        self.release_events = release_events;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed a terminal key event. Returns the button it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Buttons> {
        let button = map_key(key)?;
        match key.kind {
            KeyEventKind::Release => {
                self.release(button);
                self.repeating.remove(button);
            }
            KeyEventKind::Repeat => self.continue_hold(button),
            KeyEventKind::Press if !self.release_events && self.repeating.contains(button) => {
                self.continue_hold(button)
            }
            KeyEventKind::Press => self.press(button),
        }
        Some(button)
    }

    pub fn press(&mut self, button: Buttons) {
        self.held |= button;
        self.repeating.remove(button);
        self.since_last_key_ms = 0;
    }

    pub fn release(&mut self, button: Buttons) {
        self.held.remove(button);
    }

    /// A repeat of a key already down. Never turns a released button back on.
    fn continue_hold(&mut self, button: Buttons) {
        if !self.held.contains(button) {
            self.repeating |= button;
        }
        self.since_last_key_ms = 0;
    }

    /// Advance the release timer by `elapsed_ms`.
    ///
    /// Once no key event arrived for longer than the timeout, everything is
    /// considered released. Terminals with release events skip this.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_last_key_ms = self.since_last_key_ms.saturating_add(elapsed_ms);
        if !self.release_events && self.since_last_key_ms > self.key_release_timeout_ms {
            self.repeating |= self.held;
            self.held = Buttons::empty();
        }
        if self.since_last_key_ms > self.repeat_guard_ms {
            self.repeating = Buttons::empty();
        }
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    /// Per-tick input with the held buttons placed in `player`'s slot.
    pub fn tick_input(&self, player: usize) -> TickInput {
        TickInput::none().with_player(player, self.held)
    }
}
