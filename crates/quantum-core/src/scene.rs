//! The owned scene context: particle field, pointer model, remote proxies,
//! effect layers, and the adaptive detail governor behind one
//! initialize/step/teardown lifecycle.
//!
//! Input operations mutate local state and return the signals to publish;
//! [`Scene::apply_remote`] feeds inbound envelopes to remote proxies and
//! effect layers identically to local input. The scene keeps its own
//! millisecond clock, advanced by [`Scene::step`], so lifetimes and rate
//! limits never depend on wall time.

use glam::Vec2;

use crate::bridge::{Envelope, Outbound, PointerData, PulseData, Signal, TraceData};
use crate::constants::*;
use crate::detail::DetailGovernor;
use crate::effects::{EffectSystem, Origin};
use crate::math::{denormalize, normalize, sanitize};
use crate::particle::{Attractor, ParticleField};
use crate::pointer::{Pointer, RateLimiter, RemotePointerSet};

#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    pub seed: u64,
}

pub struct Scene {
    width: f32,
    height: f32,
    clock_ms: f64,
    pub field: ParticleField,
    pub pointer: Pointer,
    pub remotes: RemotePointerSet,
    pub effects: EffectSystem,
    pub detail: DetailGovernor,
    pub focused: bool,
    pointer_send: RateLimiter,
    trace_send: RateLimiter,
    last_press_ms: f64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        let detail = DetailGovernor::new();
        let mut field = ParticleField::new(config.width, config.height, config.seed);
        field.populate(field.target_count(detail.level()), true);
        Self {
            width: config.width,
            height: config.height,
            clock_ms: 0.0,
            field,
            pointer: Pointer::centered(center),
            remotes: RemotePointerSet::new(),
            effects: EffectSystem::new(),
            detail,
            focused: true,
            pointer_send: RateLimiter::new(POINTER_SEND_MIN_MS),
            trace_send: RateLimiter::new(TRACE_SEND_MIN_MS),
            last_press_ms: f64::MIN,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn max_distance(&self) -> f32 {
        self.field.max_distance(self.detail.level())
    }

    /// Full transient reset for a driver restart: effects and remote proxies
    /// are dropped and the field is repopulated from scratch.
    pub fn reset_transients(&mut self) {
        self.effects.clear();
        self.remotes.clear();
        self.pointer = Pointer::centered(self.center());
        self.field
            .populate(self.field.target_count(self.detail.level()), true);
    }

    /// Advance the whole scene by one frame. Returns true when the detail
    /// level changed (the particle count has already been resynced).
    pub fn step(&mut self, delta_ms: f64) -> bool {
        self.clock_ms += delta_ms;

        self.pointer.step(delta_ms);
        self.remotes.step(delta_ms);

        let mut attractors: Vec<Attractor> = Vec::with_capacity(1 + self.remotes.len());
        if self.pointer.visible(self.clock_ms, self.focused) {
            attractors.push(Attractor {
                pos: self.pointer.pos,
                charge_factor: 0.6 + self.pointer.charge,
            });
        }
        for r in self.remotes.visible() {
            attractors.push(Attractor {
                pos: r.pos,
                charge_factor: 0.6 + r.charge,
            });
        }

        self.field
            .step(delta_ms, &attractors, self.detail.level());
        self.effects.step(delta_ms);

        let changed = self.detail.observe(delta_ms);
        if changed {
            let count = self.field.target_count(self.detail.level());
            self.field.populate(count, false);
        }
        changed
    }

    /// Local pointer motion. Returns the rate-limited position broadcast.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<Outbound> {
        let target = self.sanitize_point(x, y);
        self.pointer.aim(target, self.clock_ms);
        if self.pointer_send.try_acquire(self.clock_ms) {
            Some(Outbound::new(self.pointer_signal(self.pointer.charge)))
        } else {
            None
        }
    }

    /// Press at a viewport point: charge boost, local burst, and the
    /// broadcasts mirroring it to peers.
    pub fn press(&mut self, x: f32, y: f32, touch: bool) -> Vec<Outbound> {
        let pos = self.sanitize_point(x, y);
        self.pointer.aim(pos, self.clock_ms);
        self.pointer.boost(touch);
        self.last_press_ms = self.clock_ms;
        self.pointer_send.force(self.clock_ms);

        let mut out = vec![Outbound::new(self.pointer_signal(self.pointer.charge))];
        out.extend(self.burst(pos));
        out
    }

    /// Pointer released: stop tracking and force-flush the release so peers
    /// see the pointer go idle immediately.
    pub fn release(&mut self) -> Option<Outbound> {
        self.pointer.release(self.clock_ms);
        self.pointer_send.force(self.clock_ms);
        Some(Outbound::flushed(self.pointer_signal(0.0)))
    }

    /// Synthetic click burst. Suppressed shortly after a real press (the
    /// press already burst); keyboard-triggered activation (click detail 0)
    /// bursts at the viewport center.
    pub fn tap_burst(&mut self, x: f32, y: f32, keyboard: bool) -> Vec<Outbound> {
        if self.clock_ms - self.last_press_ms < CLICK_SUPPRESS_MS {
            return Vec::new();
        }
        let pos = if keyboard {
            self.center()
        } else {
            self.sanitize_point(x, y)
        };
        self.burst(pos)
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Window lost focus: pointer visibility is suppressed and a release is
    /// broadcast, but the loop keeps running so remote effects stay visible.
    pub fn blur(&mut self) -> Option<Outbound> {
        self.focused = false;
        self.pointer.release(self.clock_ms);
        self.pointer_send.force(self.clock_ms);
        Some(Outbound::flushed(self.pointer_signal(0.0)))
    }

    /// Viewport resize: rescale particles and remote proxies in place, no
    /// full reset.
    pub fn resize(&mut self, width: f32, height: f32) {
        let sx = if self.width > 0.0 { width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { height / self.height } else { 1.0 };
        self.width = width;
        self.height = height;
        self.field.resize(width, height, self.detail.level());
        self.remotes.rescale(sx, sy);
        if self.pointer.active {
            self.pointer.pos.x *= sx;
            self.pointer.pos.y *= sy;
            self.pointer.target.x *= sx;
            self.pointer.target.y *= sy;
        } else {
            self.pointer.recenter(self.center());
        }
    }

    /// The best-effort goodbye published on page teardown.
    pub fn leave_signal(&self) -> Outbound {
        Outbound::flushed(Signal::Leave(Default::default()))
    }

    /// Feed an admitted inbound envelope into the remote-pointer proxies and
    /// effect layers, exactly as local input would.
    pub fn apply_remote(&mut self, envelope: &Envelope) {
        let center = self.center();
        let (w, h) = (self.width, self.height);
        match &envelope.signal {
            Signal::Pointer(d) => {
                let r = self.remotes.observe(&envelope.id, center);
                r.target = Vec2::new(denormalize(d.x, w), denormalize(d.y, h));
                if d.charge > REMOTE_CHARGE_SUPPRESS {
                    r.suppressed = false;
                    r.charge = r.charge.max(d.charge.min(CHARGE_MAX));
                } else {
                    r.suppressed = true;
                }
            }
            Signal::Pulse(d) => {
                let pos = Vec2::new(denormalize(d.x, w), denormalize(d.y, h));
                let clock = self.clock_ms;
                let r = self.remotes.observe(&envelope.id, center);
                r.target = pos;
                r.suppressed = false;
                r.charge = r.charge.max(d.charge.min(CHARGE_MAX));
                r.last_pulse_ms = clock;
                self.effects.spawn_pulse(pos, d.strength);
                self.effects.spawn_ripples(pos, d.strength, true);
            }
            Signal::Trace(d) => {
                let pos = Vec2::new(denormalize(d.x, w), denormalize(d.y, h));
                self.remotes.observe(&envelope.id, center);
                self.effects.spawn_trace(pos, d.energy, Origin::Remote);
            }
            Signal::Leave(_) => {
                self.remotes.remove(&envelope.id);
                log::debug!("peer {} left", envelope.id);
            }
        }
    }

    fn burst(&mut self, pos: Vec2) -> Vec<Outbound> {
        let strength =
            (BURST_STRENGTH_BASE + BURST_STRENGTH_CHARGE * self.pointer.charge).min(1.2);
        self.effects.spawn_burst(pos, strength, Origin::Local);

        let mut out = vec![Outbound::flushed(Signal::Pulse(PulseData {
            x: normalize(pos.x, self.width),
            y: normalize(pos.y, self.height),
            strength,
            charge: self.pointer.charge,
        }))];
        if self.trace_send.try_acquire(self.clock_ms) {
            out.push(Outbound::flushed(Signal::Trace(TraceData {
                x: normalize(pos.x, self.width),
                y: normalize(pos.y, self.height),
                energy: strength,
            })));
        }
        out
    }

    fn pointer_signal(&self, charge: f32) -> Signal {
        Signal::Pointer(PointerData {
            x: normalize(self.pointer.target.x, self.width),
            y: normalize(self.pointer.target.y, self.height),
            charge,
        })
    }

    fn sanitize_point(&self, x: f32, y: f32) -> Vec2 {
        let center = self.center();
        Vec2::new(sanitize(x, center.x), sanitize(y, center.y))
    }
}
