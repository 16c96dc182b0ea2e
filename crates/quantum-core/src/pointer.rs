//! Local pointer state and proxies for remote windows' pointers.

use fnv::FnvHashMap;
use glam::Vec2;

use crate::constants::*;
use crate::math::decay_factor;

/// The singleton local pointer. Input events set the target; the position
/// relaxes toward it each frame and the charge decays exponentially.
#[derive(Clone, Debug)]
pub struct Pointer {
    pub pos: Vec2,
    pub target: Vec2,
    pub active: bool,
    pub charge: f32,
    pub last_active_ms: f64,
}

impl Pointer {
    pub fn centered(center: Vec2) -> Self {
        Self {
            pos: center,
            target: center,
            active: false,
            charge: 0.0,
            last_active_ms: f64::MIN,
        }
    }

    pub fn aim(&mut self, target: Vec2, now_ms: f64) {
        self.target = target;
        self.active = true;
        self.last_active_ms = now_ms;
    }

    pub fn release(&mut self, now_ms: f64) {
        self.active = false;
        self.last_active_ms = now_ms;
    }

    /// Press boost; touch presses register a larger one.
    pub fn boost(&mut self, touch: bool) {
        let amount = if touch {
            PRESS_BOOST_TOUCH
        } else {
            PRESS_BOOST_MOUSE
        };
        self.charge = (self.charge + amount).min(CHARGE_MAX);
    }

    pub fn step(&mut self, delta_ms: f64) {
        let alpha = 1.0 - decay_factor(POINTER_SMOOTHING, delta_ms);
        self.pos += (self.target - self.pos) * alpha;
        self.charge *= decay_factor(CHARGE_DECAY, delta_ms);
    }

    /// Visible for rendering/connection purposes only while the window has
    /// focus and the pointer is active, charged, or was recently active.
    pub fn visible(&self, now_ms: f64, focused: bool) -> bool {
        focused
            && (self.active
                || self.charge > CHARGE_VISIBLE_MIN
                || now_ms - self.last_active_ms < POINTER_LINGER_MS)
    }

    /// Recenter an idle pointer after a viewport resize.
    pub fn recenter(&mut self, center: Vec2) {
        if !self.active {
            self.pos = center;
            self.target = center;
        }
    }
}

/// Proxy for a remote window's pointer, keyed by its peer id.
#[derive(Clone, Debug)]
pub struct RemotePointer {
    pub pos: Vec2,
    pub target: Vec2,
    pub charge: f32,
    pub life_ms: f64,
    pub last_pulse_ms: f64,
    /// Set when the peer broadcast a zero-charge release; cleared by any
    /// charged message. Suppressed proxies are skipped by the renderer but
    /// keep decaying normally.
    pub suppressed: bool,
}

#[derive(Default)]
pub struct RemotePointerSet {
    peers: FnvHashMap<String, RemotePointer>,
}

impl RemotePointerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the proxy for `peer`, creating it at the viewport center on
    /// first contact, and refresh its life window.
    pub fn observe(&mut self, peer: &str, center: Vec2) -> &mut RemotePointer {
        let entry = self
            .peers
            .entry(peer.to_owned())
            .or_insert_with(|| RemotePointer {
                pos: center,
                target: center,
                charge: 0.0,
                life_ms: 0.0,
                last_pulse_ms: f64::MIN,
                suppressed: false,
            });
        entry.life_ms = REMOTE_LIFE_MS;
        entry
    }

    pub fn remove(&mut self, peer: &str) {
        self.peers.remove(peer);
    }

    pub fn get(&self, peer: &str) -> Option<&RemotePointer> {
        self.peers.get(peer)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RemotePointer)> {
        self.peers.iter()
    }

    /// Proxies the renderer should draw and the field should attract toward.
    pub fn visible(&self) -> impl Iterator<Item = &RemotePointer> {
        self.peers.values().filter(|r| !r.suppressed)
    }

    /// Smooth positions, decay charges, decrement lives, expire dead proxies.
    pub fn step(&mut self, delta_ms: f64) {
        let alpha = 1.0 - decay_factor(POINTER_SMOOTHING, delta_ms);
        let charge_decay = decay_factor(CHARGE_DECAY, delta_ms);
        for r in self.peers.values_mut() {
            r.pos += (r.target - r.pos) * alpha;
            r.charge *= charge_decay;
            r.life_ms -= delta_ms;
        }
        self.peers.retain(|_, r| r.life_ms > 0.0);
    }

    /// Rescale every proxy proportionally to new viewport dimensions so
    /// peers with different window sizes stay positionally consistent.
    pub fn rescale(&mut self, sx: f32, sy: f32) {
        for r in self.peers.values_mut() {
            r.pos.x *= sx;
            r.pos.y *= sy;
            r.target.x *= sx;
            r.target.y *= sy;
        }
    }

    pub fn clear(&mut self) {
        self.peers.clear();
    }
}

/// Minimum-interval gate for outbound broadcasts.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    min_interval_ms: f64,
    last_ms: Option<f64>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_ms: None,
        }
    }

    /// Returns true (and records the send) if enough time has passed since
    /// the previous acquisition.
    pub fn try_acquire(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }

    /// Record a forced send (release/blur flushes bypass the interval).
    pub fn force(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }
}
