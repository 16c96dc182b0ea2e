// Host-side tests for the frame-rate independent decay and coordinate
// helpers everything else is built on.

use quantum_core::math::{decay_factor, denormalize, frame_scale, normalize, sanitize};

#[test]
fn frame_scale_is_relative_to_16ms() {
    assert!((frame_scale(16.0) - 1.0).abs() < 1e-6);
    assert!((frame_scale(8.0) - 0.5).abs() < 1e-6);
    assert!((frame_scale(32.0) - 2.0).abs() < 1e-6);
}

#[test]
fn decay_factor_composes_over_split_intervals() {
    // decaying for 16ms twice must equal decaying for 32ms once
    let split = decay_factor(0.92, 16.0) * decay_factor(0.92, 16.0);
    let whole = decay_factor(0.92, 32.0);
    assert!((split - whole).abs() < 1e-5);

    let split = decay_factor(0.88, 5.0) * decay_factor(0.88, 11.0);
    let whole = decay_factor(0.88, 16.0);
    assert!((split - whole).abs() < 1e-5);
}

#[test]
fn decayed_trajectory_is_frame_rate_independent() {
    // One second simulated at 30fps and at 120fps lands on the same value.
    let mut slow = 1.4_f32;
    for _ in 0..30 {
        slow *= decay_factor(0.92, 1000.0 / 30.0);
    }
    let mut fast = 1.4_f32;
    for _ in 0..120 {
        fast *= decay_factor(0.92, 1000.0 / 120.0);
    }
    assert!((slow - fast).abs() < 1e-4, "slow={slow} fast={fast}");
}

#[test]
fn normalize_clamps_to_unit_range() {
    assert!((normalize(250.0, 1000.0) - 0.25).abs() < 1e-6);
    assert_eq!(normalize(-50.0, 1000.0), 0.0);
    assert_eq!(normalize(1500.0, 1000.0), 1.0);
    // degenerate viewport falls back to the midpoint
    assert_eq!(normalize(123.0, 0.0), 0.5);
}

#[test]
fn denormalize_reconstructs_pixel_coordinates() {
    assert!((denormalize(0.1, 1000.0) - 100.0).abs() < 1e-3);
    assert!((denormalize(0.125, 800.0) - 100.0).abs() < 1e-3);
    // out-of-range normalized values clamp before scaling
    assert_eq!(denormalize(1.7, 1000.0), 1000.0);
    assert_eq!(denormalize(-0.3, 1000.0), 0.0);
}

#[test]
fn sanitize_substitutes_fallback_for_non_finite() {
    assert_eq!(sanitize(42.0, 7.0), 42.0);
    assert_eq!(sanitize(f32::NAN, 7.0), 7.0);
    assert_eq!(sanitize(f32::INFINITY, 7.0), 7.0);
    assert_eq!(sanitize(f32::NEG_INFINITY, 7.0), 7.0);
}
