// Shared simulation tuning constants used by both the core scene and the
// web renderer.

// Particle field
pub const PARTICLE_CAP: f32 = 180.0; // hard ceiling on the particle count
pub const PARTICLE_DENSITY: f32 = 9000.0; // viewport px^2 per particle at detail 1.0
pub const WRAP_MARGIN: f32 = 80.0; // toroidal wrap margin outside the viewport
pub const VELOCITY_DAMPING: f32 = 0.992; // per-frame velocity damping
pub const DRIFT_AMPLITUDE: f32 = 0.35; // sinusoidal drift offset per frame
pub const BASE_INFLUENCE: f32 = 0.045; // attraction gain at zero distance
pub const FIELD_RADIUS_FACTOR: f32 = 1.35; // attraction radius over max_distance
pub const DEPTH_MIN: f32 = 0.45; // parallax depth range
pub const DEPTH_MAX: f32 = 1.25;

// Connection radius: clamp(sqrt(w*h) * (0.18 + detail*0.04), 160, 240)
pub const DISTANCE_AREA_FACTOR: f32 = 0.18;
pub const DISTANCE_DETAIL_FACTOR: f32 = 0.04;
pub const DISTANCE_MIN: f32 = 160.0;
pub const DISTANCE_MAX: f32 = 240.0;

// Pointer
pub const POINTER_SMOOTHING: f32 = 0.86; // position relaxes by 1 - 0.86^frame
pub const CHARGE_DECAY: f32 = 0.92; // charge decays by 0.92^frame
pub const CHARGE_MAX: f32 = 1.4;
pub const CHARGE_VISIBLE_MIN: f32 = 0.05;
pub const POINTER_LINGER_MS: f64 = 1400.0; // visibility window after last activity
pub const PRESS_BOOST_MOUSE: f32 = 0.6;
pub const PRESS_BOOST_TOUCH: f32 = 0.85;

// Remote pointers
pub const REMOTE_LIFE_MS: f64 = 2000.0; // refreshed on every inbound message
pub const REMOTE_CHARGE_SUPPRESS: f32 = 0.001; // a zero-charge pointer message suppresses the proxy

// Outbound rate limits
pub const POINTER_SEND_MIN_MS: f64 = 60.0;
pub const TRACE_SEND_MIN_MS: f64 = 110.0;

// Pulses
pub const PULSE_GROWTH_BASE: f32 = 42.0;
pub const PULSE_GROWTH_STRENGTH: f32 = 64.0;
pub const PULSE_ALPHA_START: f32 = 0.85;
pub const PULSE_ALPHA_DECAY: f32 = 0.88;
pub const PULSE_ALPHA_FLOOR: f32 = 0.05;
pub const PULSE_RADIUS_START: f32 = 4.0;

// Ripples: 3 staggered fronts per trigger
pub const RIPPLE_OFFSETS: [f32; 3] = [0.0, -0.18, -0.36];
pub const RIPPLE_SPEED_BASE: f32 = 0.012;
pub const RIPPLE_SPEED_STRENGTH: f32 = 0.0065;
pub const RIPPLE_FRONT_GAIN: f32 = 1.18; // each subsequent front is 18% faster
pub const RIPPLE_PROGRESS_MAX: f32 = 1.25;
pub const RIPPLE_EXTENT_FACTOR: f32 = 0.45; // rendered radius = progress * sqrt(w*h) * this

// Traces
pub const TRACE_ALPHA_START: f32 = 0.8;
pub const TRACE_ALPHA_DECAY: f32 = 0.88;
pub const TRACE_ALPHA_FLOOR: f32 = 0.03;
pub const TRACE_RADIUS_START: f32 = 14.0;
pub const TRACE_RADIUS_ENERGY: f32 = 10.0;
pub const TRACE_RADIUS_GROWTH: f32 = 0.9; // per frame
pub const TRACE_SPIN_BASE: f32 = 0.035;
pub const TRACE_SPIN_ENERGY: f32 = 0.02;
pub const TRACE_SPAN_START: f32 = 0.6;
pub const TRACE_SPAN_GROWTH: f32 = 0.05; // per frame, up to TRACE_SPAN_MAX
pub const TRACE_SPAN_MAX: f32 = 1.8 * std::f32::consts::PI;
pub const TRACE_LIFE_BASE_MS: f64 = 900.0;
pub const TRACE_LIFE_ENERGY_MS: f64 = 350.0;

// Burst strength mapping from pointer charge
pub const BURST_STRENGTH_BASE: f32 = 0.5;
pub const BURST_STRENGTH_CHARGE: f32 = 0.5;

// Adaptive detail
pub const DETAIL_MIN: f32 = 0.55;
pub const DETAIL_MAX: f32 = 1.08;
pub const DETAIL_DEGRADE_ABOVE_MS: f64 = 28.0;
pub const DETAIL_RECOVER_BELOW_MS: f64 = 18.0;
pub const DETAIL_STEP_DOWN: f32 = 0.05;
pub const DETAIL_STEP_UP: f32 = 0.03;
pub const DETAIL_AVG_BLEND: f64 = 0.1; // rolling average blend weight per frame

// Bridge
pub const DEDUP_CAP: usize = 2000; // recently-seen signature bound
pub const STALE_MS: f64 = 4000.0; // inbound messages older than this are dropped

// Click-burst heuristic (tunable, not load-bearing)
pub const CLICK_SUPPRESS_MS: f64 = 420.0; // synthetic click this soon after a press is ignored
