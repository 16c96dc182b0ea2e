//! Animation driver phases.
//!
//! The frame loop itself lives in the web crate; the phase logic is kept
//! here so the transition rules stay host-testable.

/// Driver state. `Reduced` is the static, non-animating mode entered while
/// the reduced-motion preference is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Stopped,
    Running,
    Reduced,
}

impl Phase {
    /// Phase entered by a (re)start. A start under the reduced-motion
    /// preference applies the static marker and never begins a loop;
    /// otherwise transients are reset and the loop runs.
    pub fn on_start(reduced_motion: bool) -> Phase {
        if reduced_motion {
            Phase::Reduced
        } else {
            Phase::Running
        }
    }

    /// Page hidden: the loop is cancelled but scene state is held, not
    /// reset. Becoming visible again re-runs start (a deliberate full
    /// reset).
    pub fn on_hidden(self) -> Phase {
        match self {
            Phase::Running => Phase::Stopped,
            other => other,
        }
    }

    pub fn is_running(self) -> bool {
        self == Phase::Running
    }
}
