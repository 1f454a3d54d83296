//! Skips redraws while the intermission looks the same.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::core::IntermissionSnapshot;

/// Stable-within-a-process fingerprint of a snapshot.
pub fn fingerprint(snapshot: &IntermissionSnapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    snapshot.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// - When `is_static=false`: always render (no throttling).
    /// - When `is_static=true`: render immediately on fingerprint change, otherwise at most
    ///   once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        if self.has_rendered && is_static && !changed && !due {
            return false;
        }
        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }

    /// [`RenderThrottle::should_render`] keyed on an intermission snapshot.
    ///
    /// Counting frames are never throttled; once the numbers settle only the
    /// blinking prompt changes the picture.
    pub fn should_render_snapshot(&mut self, now_ms: u64, snapshot: &IntermissionSnapshot) -> bool {
        self.should_render(now_ms, fingerprint(snapshot), !snapshot.is_counting())
    }
}
