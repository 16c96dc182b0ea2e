//! Ambient particle field: bulk creation, motion integration, and
//! pointer attraction.

use glam::Vec2;
use rand::prelude::*;

use crate::constants::*;
use crate::math::frame_scale;

/// A single ambient particle. No identity beyond array membership.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Parallax depth in [0.45, 1.25]; scales integration speed and the
    /// renderer's layer assignment.
    pub depth: f32,
    drift: f32,
    drift_speed: f32,
}

/// A point that pulls nearby particles: the local pointer or a remote proxy.
#[derive(Clone, Copy, Debug)]
pub struct Attractor {
    pub pos: Vec2,
    pub charge_factor: f32,
}

pub struct ParticleField {
    pub particles: Vec<Particle>,
    width: f32,
    height: f32,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            width,
            height,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Target particle count for the current viewport and detail level.
    /// Denser viewports and higher detail both raise the cap.
    pub fn target_count(&self, detail: f32) -> usize {
        let cap = PARTICLE_CAP * detail;
        let by_area = self.width * self.height / (PARTICLE_DENSITY / detail);
        cap.min(by_area).max(0.0).floor() as usize
    }

    /// Connection/attraction radius; scales with viewport area and detail.
    pub fn max_distance(&self, detail: f32) -> f32 {
        let raw = (self.width * self.height).sqrt()
            * (DISTANCE_AREA_FACTOR + detail * DISTANCE_DETAIL_FACTOR);
        raw.clamp(DISTANCE_MIN, DISTANCE_MAX)
    }

    /// Resize the collection to `count`. A forced populate replaces every
    /// particle; otherwise the field truncates or appends incrementally so a
    /// resize does not visually discontinue the whole field.
    pub fn populate(&mut self, count: usize, forced: bool) {
        if forced {
            self.particles.clear();
        }
        if self.particles.len() > count {
            self.particles.truncate(count);
            return;
        }
        while self.particles.len() < count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    /// Rescale positions to new viewport dimensions and resync the count.
    /// Deliberately not a full reset.
    pub fn resize(&mut self, width: f32, height: f32, detail: f32) {
        let sx = if self.width > 0.0 { width / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { height / self.height } else { 1.0 };
        self.width = width;
        self.height = height;
        for p in &mut self.particles {
            p.pos.x *= sx;
            p.pos.y *= sy;
        }
        let count = self.target_count(detail);
        self.populate(count, false);
    }

    /// Advance the field by `delta_ms`, applying drift, attraction toward
    /// every live attractor, damping, and toroidal wrap.
    pub fn step(&mut self, delta_ms: f64, attractors: &[Attractor], detail: f32) {
        let frame = frame_scale(delta_ms);
        let damping = VELOCITY_DAMPING.powf(frame);
        let field_radius = self.max_distance(detail) * FIELD_RADIUS_FACTOR;
        let (w, h) = (self.width, self.height);

        for p in &mut self.particles {
            p.pos += p.vel * (p.depth * frame);
            p.drift += p.drift_speed * frame;
            p.pos.x += p.drift.cos() * DRIFT_AMPLITUDE * frame;
            p.pos.y += p.drift.sin() * DRIFT_AMPLITUDE * frame;

            for a in attractors {
                let to = a.pos - p.pos;
                let dist = to.length();
                if dist > 1e-3 && dist < field_radius {
                    let force =
                        (1.0 - dist / field_radius) * BASE_INFLUENCE * a.charge_factor * frame;
                    p.vel += to * (force / dist);
                }
            }

            p.vel *= damping;

            if p.pos.x < -WRAP_MARGIN {
                p.pos.x = w + WRAP_MARGIN;
            } else if p.pos.x > w + WRAP_MARGIN {
                p.pos.x = -WRAP_MARGIN;
            }
            if p.pos.y < -WRAP_MARGIN {
                p.pos.y = h + WRAP_MARGIN;
            } else if p.pos.y > h + WRAP_MARGIN {
                p.pos.y = -WRAP_MARGIN;
            }
        }
    }

    fn spawn(&mut self) -> Particle {
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        let speed = 0.25 + self.rng.gen::<f32>() * 0.55;
        Particle {
            pos: Vec2::new(
                self.rng.gen::<f32>() * self.width,
                self.rng.gen::<f32>() * self.height,
            ),
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: 0.6 + self.rng.gen::<f32>() * 1.8,
            depth: DEPTH_MIN + self.rng.gen::<f32>() * (DEPTH_MAX - DEPTH_MIN),
            drift: self.rng.gen::<f32>() * std::f32::consts::TAU,
            drift_speed: 0.004 + self.rng.gen::<f32>() * 0.012,
        }
    }
}
