//! Frame-rate independent decay and coordinate helpers.
//!
//! All decaying quantities in the scene use `value *= rate^(delta/16)` so a
//! run at 30 fps and a run at 120 fps converge on the same trajectory.

/// Elapsed-frame ratio relative to a nominal 16 ms frame.
#[inline]
pub fn frame_scale(delta_ms: f64) -> f32 {
    (delta_ms / 16.0) as f32
}

/// Exponential decay factor for `delta_ms` of elapsed time.
///
/// Composes: `decay_factor(r, a) * decay_factor(r, b) == decay_factor(r, a + b)`
/// within floating tolerance.
#[inline]
pub fn decay_factor(rate: f32, delta_ms: f64) -> f32 {
    rate.powf(frame_scale(delta_ms))
}

/// Normalize a viewport coordinate into `[0, 1]` for transmission.
#[inline]
pub fn normalize(v: f32, dim: f32) -> f32 {
    if dim <= 0.0 {
        return 0.5;
    }
    (v / dim).clamp(0.0, 1.0)
}

/// Reconstruct a pixel coordinate from a normalized one. Exact: the receiver
/// sees `normalized * dim` with no rounding applied.
#[inline]
pub fn denormalize(n: f32, dim: f32) -> f32 {
    n.clamp(0.0, 1.0) * dim
}

/// Substitute a fallback for non-finite input so malformed events never push
/// NaN through the physics.
#[inline]
pub fn sanitize(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}
