// Adaptive detail governor: degrade under load, recover when pacing
// improves, and the derived renderer knobs.

use quantum_core::constants::{DETAIL_MAX, DETAIL_MIN};
use quantum_core::detail::DetailGovernor;

fn degraded_to_floor() -> DetailGovernor {
    let mut governor = DetailGovernor::new();
    for _ in 0..200 {
        governor.observe(40.0);
    }
    governor
}

#[test]
fn starts_at_full_detail() {
    let governor = DetailGovernor::new();
    assert!((governor.level() - 1.0).abs() < 1e-6);
}

#[test]
fn sustained_slow_frames_degrade_to_the_floor() {
    let mut governor = DetailGovernor::new();
    let mut previous = governor.level();
    for _ in 0..200 {
        governor.observe(40.0);
        assert!(governor.level() <= previous + 1e-6, "level increased under load");
        previous = governor.level();
    }
    assert!((governor.level() - DETAIL_MIN).abs() < 1e-4);

    // at the floor, further slow frames report no change
    assert!(!governor.observe(40.0));
}

#[test]
fn fast_frames_recover_to_the_ceiling() {
    let mut governor = degraded_to_floor();
    for _ in 0..300 {
        governor.observe(10.0);
    }
    assert!((governor.level() - DETAIL_MAX).abs() < 1e-4);
}

#[test]
fn in_band_pacing_holds_the_level_steady() {
    let mut governor = DetailGovernor::new();
    // the rolling average needs a few frames to settle into the dead band
    for _ in 0..50 {
        governor.observe(22.0);
    }
    let settled = governor.level();
    for _ in 0..50 {
        assert!(!governor.observe(22.0));
    }
    assert_eq!(governor.level(), settled);
}

#[test]
fn renderer_knobs_follow_the_level() {
    let full = DetailGovernor::new();
    assert_eq!(full.neighbor_cap(), 5);
    assert_eq!(full.connection_stride(), 1);
    assert_eq!(full.parallax_layers(), 3);

    let floor = degraded_to_floor();
    assert_eq!(floor.neighbor_cap(), 3);
    assert_eq!(floor.connection_stride(), 2);
    assert_eq!(floor.parallax_layers(), 1);
    assert!(floor.attempt_budget() < full.attempt_budget());
    // budget stays within the 900 + 700 * level envelope
    assert!(floor.attempt_budget() >= 900);
    assert!(full.attempt_budget() <= 900 + (700.0 * DETAIL_MAX) as usize + 1);
}
