//! Transient visual events: pulses, ripple wave groups, and rotating arc
//! traces. Each has its own lifecycle and decay law; all decay frame-rate
//! independently.

use glam::Vec2;
use smallvec::SmallVec;

use crate::constants::*;
use crate::math::{decay_factor, frame_scale};

/// Where an effect was triggered from. Remote traces spin the other way so
/// relayed interactions are visually distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Local,
    Remote,
}

/// Expanding ring burst.
#[derive(Clone, Debug)]
pub struct Pulse {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub strength: f32,
}

/// One front of a ripple wave group. Fronts start with staggered negative
/// progress and are only rendered once progress passes zero.
#[derive(Clone, Debug)]
pub struct Ripple {
    pub pos: Vec2,
    pub progress: f32,
    pub speed: f32,
    pub strength: f32,
    pub remote: bool,
}

/// Rotating arc mark left at an interaction point.
#[derive(Clone, Debug)]
pub struct Trace {
    pub pos: Vec2,
    pub energy: f32,
    pub radius: f32,
    pub thickness: f32,
    pub alpha: f32,
    pub rotation: f32,
    pub spin: f32,
    pub span: f32,
    pub life_ms: f64,
}

#[derive(Default)]
pub struct EffectSystem {
    pub pulses: Vec<Pulse>,
    pub ripples: Vec<Ripple>,
    pub traces: Vec<Trace>,
}

impl EffectSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pulses.clear();
        self.ripples.clear();
        self.traces.clear();
    }

    pub fn spawn_pulse(&mut self, pos: Vec2, strength: f32) {
        self.pulses.push(Pulse {
            pos,
            radius: PULSE_RADIUS_START,
            alpha: PULSE_ALPHA_START,
            strength,
        });
    }

    /// Spawn the fixed 3-front wave group: staggered progress offsets, each
    /// subsequent front 18% faster than the last.
    pub fn spawn_ripples(&mut self, pos: Vec2, strength: f32, remote: bool) {
        let base_speed = RIPPLE_SPEED_BASE + RIPPLE_SPEED_STRENGTH * strength;
        let fronts: SmallVec<[Ripple; 3]> = RIPPLE_OFFSETS
            .iter()
            .enumerate()
            .map(|(i, offset)| Ripple {
                pos,
                progress: *offset,
                speed: base_speed * RIPPLE_FRONT_GAIN.powi(i as i32),
                strength,
                remote,
            })
            .collect();
        self.ripples.extend(fronts);
    }

    pub fn spawn_trace(&mut self, pos: Vec2, energy: f32, origin: Origin) {
        let spin = TRACE_SPIN_BASE + TRACE_SPIN_ENERGY * energy;
        self.traces.push(Trace {
            pos,
            energy,
            radius: TRACE_RADIUS_START + TRACE_RADIUS_ENERGY * energy,
            thickness: 1.4 + energy,
            alpha: TRACE_ALPHA_START,
            rotation: 0.0,
            spin: match origin {
                Origin::Local => spin,
                Origin::Remote => -spin,
            },
            span: TRACE_SPAN_START,
            life_ms: TRACE_LIFE_BASE_MS + TRACE_LIFE_ENERGY_MS * energy as f64,
        });
    }

    /// A burst composes all three layers at once.
    pub fn spawn_burst(&mut self, pos: Vec2, strength: f32, origin: Origin) {
        self.spawn_pulse(pos, strength);
        self.spawn_ripples(pos, strength, origin == Origin::Remote);
        self.spawn_trace(pos, strength, origin);
    }

    pub fn step(&mut self, delta_ms: f64) {
        let frame = frame_scale(delta_ms);
        let pulse_decay = decay_factor(PULSE_ALPHA_DECAY, delta_ms);
        let trace_decay = decay_factor(TRACE_ALPHA_DECAY, delta_ms);

        for p in &mut self.pulses {
            p.radius += frame * (PULSE_GROWTH_BASE + PULSE_GROWTH_STRENGTH * p.strength);
            p.alpha *= pulse_decay;
        }
        self.pulses.retain(|p| p.alpha >= PULSE_ALPHA_FLOOR);

        for r in &mut self.ripples {
            r.progress += r.speed * frame;
        }
        self.ripples.retain(|r| r.progress <= RIPPLE_PROGRESS_MAX);

        for t in &mut self.traces {
            t.radius += TRACE_RADIUS_GROWTH * frame;
            t.alpha *= trace_decay;
            t.rotation += t.spin * frame;
            t.span = (t.span + TRACE_SPAN_GROWTH * frame).min(TRACE_SPAN_MAX);
            t.life_ms -= delta_ms;
        }
        self.traces
            .retain(|t| t.life_ms > 0.0 && t.alpha >= TRACE_ALPHA_FLOOR);
    }
}
