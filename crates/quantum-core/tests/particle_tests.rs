// Particle field tests: sizing rules, seeded determinism, wrap, and
// attraction.

use glam::Vec2;
use quantum_core::constants::{
    DEPTH_MAX, DEPTH_MIN, DISTANCE_MAX, DISTANCE_MIN, WRAP_MARGIN,
};
use quantum_core::particle::{Attractor, ParticleField};

fn field() -> ParticleField {
    ParticleField::new(1000.0, 900.0, 42)
}

#[test]
fn target_count_is_the_lesser_of_cap_and_area_density() {
    let field = field();
    // 1000x900 / 9000 px^2-per-particle = 100, under the 180 cap
    assert_eq!(field.target_count(1.0), 100);
    // lower detail shrinks both the cap and the density allowance
    assert_eq!(field.target_count(0.5), 50);

    let huge = ParticleField::new(4000.0, 4000.0, 0);
    assert_eq!(huge.target_count(1.0), 180);
}

#[test]
fn max_distance_clamps_to_its_band() {
    let tiny = ParticleField::new(100.0, 100.0, 0);
    assert_eq!(tiny.max_distance(1.0), DISTANCE_MIN);

    let huge = ParticleField::new(4000.0, 4000.0, 0);
    assert_eq!(huge.max_distance(1.0), DISTANCE_MAX);

    let mid = field().max_distance(1.0);
    assert!(mid > DISTANCE_MIN && mid < DISTANCE_MAX);
    let expected = (1000.0_f32 * 900.0).sqrt() * 0.22;
    assert!((mid - expected).abs() < 0.5);
}

#[test]
fn populate_is_incremental_unless_forced() {
    let mut field = field();
    field.populate(50, true);
    assert_eq!(field.particles.len(), 50);
    let kept = field.particles[10].pos;

    field.populate(30, false);
    assert_eq!(field.particles.len(), 30);
    assert_eq!(field.particles[10].pos, kept);

    field.populate(60, false);
    assert_eq!(field.particles.len(), 60);
    assert_eq!(field.particles[10].pos, kept);
}

#[test]
fn spawning_is_deterministic_per_seed() {
    let mut a = ParticleField::new(800.0, 600.0, 7);
    let mut b = ParticleField::new(800.0, 600.0, 7);
    let mut c = ParticleField::new(800.0, 600.0, 8);
    a.populate(20, true);
    b.populate(20, true);
    c.populate(20, true);
    for (pa, pb) in a.particles.iter().zip(&b.particles) {
        assert_eq!(pa.pos, pb.pos);
        assert_eq!(pa.vel, pb.vel);
    }
    assert!(a.particles.iter().zip(&c.particles).any(|(pa, pc)| pa.pos != pc.pos));
}

#[test]
fn spawned_particles_are_within_tuning_ranges() {
    let mut field = field();
    field.populate(100, true);
    for p in &field.particles {
        assert!(p.pos.x >= 0.0 && p.pos.x <= 1000.0);
        assert!(p.pos.y >= 0.0 && p.pos.y <= 900.0);
        assert!(p.depth >= DEPTH_MIN && p.depth <= DEPTH_MAX);
        assert!(p.radius >= 0.6 && p.radius <= 2.4);
    }
}

#[test]
fn particles_wrap_toroidally_at_the_margin() {
    let mut field = field();
    field.populate(10, true);
    field.particles[0].pos = Vec2::new(-WRAP_MARGIN - 20.0, 450.0);
    field.particles[0].vel = Vec2::ZERO;
    field.step(16.0, &[], 1.0);
    assert!(
        (field.particles[0].pos.x - (1000.0 + WRAP_MARGIN)).abs() < 1e-3,
        "pos.x={}",
        field.particles[0].pos.x
    );
}

#[test]
fn attractors_pull_nearby_particles() {
    let mut field = field();
    field.populate(1, true);
    field.particles[0].pos = Vec2::new(500.0, 450.0);
    field.particles[0].vel = Vec2::ZERO;
    let attractor = Attractor {
        pos: Vec2::new(600.0, 450.0),
        charge_factor: 1.0,
    };
    field.step(16.0, &[attractor], 1.0);
    assert!(field.particles[0].vel.x > 0.0);
}

#[test]
fn distant_attractors_have_no_pull() {
    let mut field = ParticleField::new(4000.0, 4000.0, 1);
    field.populate(1, true);
    field.particles[0].pos = Vec2::new(100.0, 100.0);
    field.particles[0].vel = Vec2::ZERO;
    // max_distance caps at 240, field radius at 240 * 1.35 = 324
    let attractor = Attractor {
        pos: Vec2::new(3900.0, 3900.0),
        charge_factor: 1.4,
    };
    field.step(16.0, &[attractor], 1.0);
    assert_eq!(field.particles[0].vel, Vec2::ZERO);
}

#[test]
fn resize_rescales_positions_and_resyncs_the_count() {
    let mut field = field();
    field.populate(field.target_count(1.0), true);
    let before = field.particles[0].pos;
    field.resize(2000.0, 900.0, 1.0);
    let after = field.particles[0].pos;
    assert!((after.x - before.x * 2.0).abs() < 1e-3);
    assert!((after.y - before.y).abs() < 1e-3);
    assert_eq!(field.particles.len(), field.target_count(1.0));
}
