//! Tally animator: displayed values climbing toward their final values.
//!
//! The stepping rule lives in [`advance_tally`], a pure function, so it can be
//! tested without a running session. [`Counter`] wraps it with the raw/shown
//! pair the stat model stores.

/// Advance a displayed value by one tick.
///
/// Adds `step` to `shown` and clamps the result to `raw`, so the last step
/// lands exactly on the target. A `step` of zero is treated as 1, and a
/// `shown` value already at or past `raw` returns `raw`.
///
/// # Examples
///
/// ```
/// use intermission_core::advance_tally;
///
/// assert_eq!(advance_tally(0, 42, 2), 2);
/// assert_eq!(advance_tally(40, 41, 2), 41);
/// assert_eq!(advance_tally(41, 41, 2), 41);
/// ```
pub fn advance_tally(shown: u32, raw: u32, step: u32) -> u32 {
    if shown >= raw {
        return raw;
    }
    shown.saturating_add(step.max(1)).min(raw)
}

/// Number of ticks [`advance_tally`] needs to climb from 0 to `raw`.
///
/// Equal to `ceil(raw / step)`.
pub fn ticks_to_complete(raw: u32, step: u32) -> u32 {
    raw.div_ceil(step.max(1))
}

/// A raw value and the value currently on screen.
///
/// Negative targets (deathmatch frags after suicides) tally their magnitude
/// and carry the sign separately, so the screen counts 0, -1, -2 and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counter {
    raw: u32,
    shown: u32,
    negative: bool,
}

impl Counter {
    /// New counter with nothing shown yet.
    pub fn new(raw: u32) -> Self {
        Self {
            raw,
            shown: 0,
            negative: false,
        }
    }

    /// Counter whose target may be below zero.
    pub fn signed(raw: i32) -> Self {
        Self {
            raw: raw.unsigned_abs(),
            shown: 0,
            negative: raw < 0,
        }
    }

    /// Magnitude of the target.
    pub fn raw(&self) -> u32 {
        self.raw
    }

    /// Magnitude currently on screen.
    pub fn shown(&self) -> u32 {
        self.shown
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Target with its sign.
    pub fn signed_raw(&self) -> i64 {
        self.apply_sign(self.raw)
    }

    /// Value to print, with its sign.
    pub fn display_value(&self) -> i64 {
        self.apply_sign(self.shown)
    }

    fn apply_sign(&self, magnitude: u32) -> i64 {
        let v = i64::from(magnitude);
        if self.negative {
            -v
        } else {
            v
        }
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.raw
    }

    /// Step toward the raw value.
    ///
    /// Returns `true` only on the tick the counter reaches its target.
    pub fn advance(&mut self, step: u32) -> bool {
        if self.is_done() {
            return false;
        }
        self.shown = advance_tally(self.shown, self.raw, step);
        self.is_done()
    }

    /// Jump straight to the raw value.
    pub fn snap(&mut self) {
        self.shown = self.raw;
    }
}
