//! Adaptive detail level tuned from measured frame pacing.

use crate::constants::*;

/// Tracks a rolling average of frame deltas and degrades or recovers the
/// detail scalar in small asymmetric steps to avoid oscillation. Any change
/// requires a particle-count resync by the caller.
#[derive(Clone, Debug)]
pub struct DetailGovernor {
    level: f32,
    avg_delta_ms: f64,
}

impl Default for DetailGovernor {
    fn default() -> Self {
        Self {
            level: 1.0,
            avg_delta_ms: 16.0,
        }
    }
}

impl DetailGovernor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn avg_delta_ms(&self) -> f64 {
        self.avg_delta_ms
    }

    /// Feed one frame delta; returns true when the level changed.
    pub fn observe(&mut self, delta_ms: f64) -> bool {
        self.avg_delta_ms =
            self.avg_delta_ms * (1.0 - DETAIL_AVG_BLEND) + delta_ms * DETAIL_AVG_BLEND;
        let next = if self.avg_delta_ms > DETAIL_DEGRADE_ABOVE_MS {
            (self.level - DETAIL_STEP_DOWN).max(DETAIL_MIN)
        } else if self.avg_delta_ms < DETAIL_RECOVER_BELOW_MS {
            (self.level + DETAIL_STEP_UP).min(DETAIL_MAX)
        } else {
            self.level
        };
        if (next - self.level).abs() > f32::EPSILON {
            self.level = next;
            true
        } else {
            false
        }
    }

    /// Per-node connection limit for the renderer.
    pub fn neighbor_cap(&self) -> usize {
        if self.level > 0.9 {
            5
        } else if self.level > 0.7 {
            4
        } else {
            3
        }
    }

    /// Index stride over connection candidates at low detail.
    pub fn connection_stride(&self) -> usize {
        if self.level < 0.7 {
            2
        } else {
            1
        }
    }

    /// Global cap on pair checks per frame, bounding worst-case cost.
    pub fn attempt_budget(&self) -> usize {
        (900.0 + 700.0 * self.level) as usize
    }

    /// Parallax connection layers drawn by the renderer.
    pub fn parallax_layers(&self) -> usize {
        if self.level > 0.85 {
            3
        } else if self.level > 0.65 {
            2
        } else {
            1
        }
    }
}
