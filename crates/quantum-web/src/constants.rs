// DOM and rendering tuning for the web frontend.

pub const CANVAS_ID: &str = "quantum-background";
pub const STORAGE_KEY: &str = "quantum-background-sync";
pub const CHANNEL_NAME: &str = "quantum-background";
pub const REDUCED_CLASS: &str = "is-reduced";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub const DPR_CAP: f64 = 2.5;

// Accent colors re-derived from computed style on theme changes
pub const ACCENT_PROPERTY: &str = "--accent-color";
pub const ACCENT_PROPERTY_2: &str = "--accent-color-2";
pub const ACCENT_FALLBACK: &str = "#4a60ff";
pub const ACCENT_FALLBACK_2: &str = "#8b5cf6";

// Glow sizing: pointer > remote > ordinary particle
pub const GLOW_POINTER_MULT: f32 = 3.6;
pub const GLOW_REMOTE_MULT: f32 = 3.0;
pub const GLOW_PARTICLE_MULT: f32 = 2.4;
pub const POINTER_NODE_RADIUS: f32 = 3.0;
pub const GLOW_BASE_ALPHA: f32 = 0.45;
pub const GLOW_SHADOW_BLUR: f64 = 18.0;

// Connection parallax layers: (base alpha, line width, phase offset)
pub const PARALLAX_LAYERS: [(f32, f32, f32); 3] =
    [(0.55, 0.7, 0.0), (0.30, 0.5, 2.1), (0.18, 0.4, 4.2)];
pub const PARALLAX_ALPHA_SWING: f32 = 0.12;
pub const PARALLAX_WOBBLE_PX: f32 = 1.5;
