//! Tuning knobs for the tally animation and the idle wait.

use crate::types::{
    DEFAULT_COUNT_STEP, DEFAULT_DEMO_WAIT_TICKS, DEFAULT_FRAG_STEP, DEFAULT_MIN_COUNT_TICKS,
    DEFAULT_PROMPT_BLINK_TICKS, DEFAULT_TALLY_CUE_INTERVAL, DEFAULT_TIME_STEP_SECS,
};

/// Intermission tuning.
///
/// All values are in ticks or display units per tick. Zero steps and
/// intervals make no sense and are raised to 1 by [`IntermissionConfig::sanitized`],
/// which [`crate::Intermission::new`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntermissionConfig {
    /// Kills/items/secrets added to the displayed value per tick.
    pub count_step: u32,
    /// Seconds added to the displayed clock per tick.
    pub time_step_secs: u32,
    /// Frags added to the displayed value per tick.
    pub frag_step: u32,
    /// The counting phase lasts at least this many ticks, even when every
    /// counter is already complete.
    pub min_count_ticks: u32,
    /// Idle ticks before a non-interactive session leaves on its own.
    pub demo_wait_ticks: u32,
    /// Idle timeout for interactive sessions. `None` waits for input forever.
    pub idle_timeout_ticks: Option<u32>,
    /// Counting ticks between two [`crate::types::Cue::TallyTick`] cues.
    pub tally_cue_interval: u32,
    /// Half-period of the continue prompt blink.
    pub prompt_blink_ticks: u32,
}

impl Default for IntermissionConfig {
    fn default() -> Self {
        Self {
            count_step: DEFAULT_COUNT_STEP,
            time_step_secs: DEFAULT_TIME_STEP_SECS,
            frag_step: DEFAULT_FRAG_STEP,
            min_count_ticks: DEFAULT_MIN_COUNT_TICKS,
            demo_wait_ticks: DEFAULT_DEMO_WAIT_TICKS,
            idle_timeout_ticks: None,
            tally_cue_interval: DEFAULT_TALLY_CUE_INTERVAL,
            prompt_blink_ticks: DEFAULT_PROMPT_BLINK_TICKS,
        }
    }
}

impl IntermissionConfig {
    /// Copy with every step and interval raised to at least 1.
    pub fn sanitized(self) -> Self {
        Self {
            count_step: self.count_step.max(1),
            time_step_secs: self.time_step_secs.max(1),
            frag_step: self.frag_step.max(1),
            demo_wait_ticks: self.demo_wait_ticks.max(1),
            idle_timeout_ticks: self.idle_timeout_ticks.map(|t| t.max(1)),
            tally_cue_interval: self.tally_cue_interval.max(1),
            prompt_blink_ticks: self.prompt_blink_ticks.max(1),
            ..self
        }
    }

    /// Idle timeout that applies to a session.
    pub fn wait_timeout(&self, non_interactive: bool) -> Option<u32> {
        if non_interactive {
            Some(self.demo_wait_ticks)
        } else {
            self.idle_timeout_ticks
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_raises_zero_steps() {
        let cfg = IntermissionConfig {
            count_step: 0,
            time_step_secs: 0,
            frag_step: 0,
            min_count_ticks: 0,
            demo_wait_ticks: 0,
            idle_timeout_ticks: Some(0),
            tally_cue_interval: 0,
            prompt_blink_ticks: 0,
        }
        .sanitized();

        assert_eq!(cfg.count_step, 1);
        assert_eq!(cfg.time_step_secs, 1);
        assert_eq!(cfg.frag_step, 1);
        assert_eq!(cfg.min_count_ticks, 0);
        assert_eq!(cfg.demo_wait_ticks, 1);
        assert_eq!(cfg.idle_timeout_ticks, Some(1));
        assert_eq!(cfg.tally_cue_interval, 1);
        assert_eq!(cfg.prompt_blink_ticks, 1);
    }

    #[test]
    fn wait_timeout_depends_on_interactivity() {
        let cfg = IntermissionConfig::default();
        assert_eq!(cfg.wait_timeout(true), Some(DEFAULT_DEMO_WAIT_TICKS));
        assert_eq!(cfg.wait_timeout(false), None);

        let cfg = IntermissionConfig {
            idle_timeout_ticks: Some(700),
            ..IntermissionConfig::default()
        };
        assert_eq!(cfg.wait_timeout(false), Some(700));
    }
}
