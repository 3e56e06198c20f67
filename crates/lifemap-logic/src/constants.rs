//! Fixed dimensions and tuning constants shared across the crate.
//!
//! Tunable values here are the defaults for [`crate::config`]; code that
//! needs the live value should read it from the config instead.

/// Logical canvas width in canvas units.
pub const MAP_WIDTH: f32 = 2800.0;
/// Logical canvas height in canvas units.
pub const MAP_HEIGHT: f32 = 1800.0;

pub const CENTER_X: f32 = MAP_WIDTH / 2.0;
pub const CENTER_Y: f32 = MAP_HEIGHT / 2.0;

/// Camera defaults and limits. Angles are in degrees.
pub mod camera {
    pub const DEFAULT_SCALE: f32 = 0.65;
    pub const MIN_SCALE: f32 = 0.4;
    pub const MAX_SCALE: f32 = 1.8;
    /// Scale change per unit of wheel delta.
    pub const ZOOM_FACTOR: f32 = 0.001;

    /// Degrees of rotation per pixel of pointer travel.
    pub const ROTATE_SENSITIVITY: f32 = 0.2;

    pub const DEFAULT_TILT: f32 = 30.0;
    pub const MIN_TILT: f32 = 10.0;
    pub const MAX_TILT: f32 = 55.0;

    pub const DEFAULT_SPIN: f32 = 0.0;
    pub const MIN_SPIN: f32 = -20.0;
    pub const MAX_SPIN: f32 = 20.0;

    pub const FOCUS_SCALE: f32 = 1.4;
    pub const FOCUS_TILT: f32 = 10.0;
    pub const FOCUS_SPIN: f32 = 0.0;
}

/// Fog (neglect) levels, all on a 0–100 scale.
pub mod fog {
    pub const MIN_LEVEL: u8 = 0;
    pub const MAX_LEVEL: u8 = 100;

    /// Initial levels are drawn from `INITIAL_MIN..INITIAL_MAX` (upper bound exclusive).
    pub const INITIAL_MIN: u8 = 20;
    pub const INITIAL_MAX: u8 = 60;

    /// Amount removed from a node's level when activity is logged against it.
    pub const RELIEF_AMOUNT: u8 = 15;

    /// Levels strictly above this hide the node's identity.
    pub const FOGGY_THRESHOLD: u8 = 60;

    /// Levels at or above this draw a fog cloud over the node.
    pub const CLOUD_THRESHOLD: u8 = 40;

    /// Step used by the developer raise/lower controls.
    pub const DEV_STEP: i32 = 10;
}

/// Placeholder label shown in place of a foggy node's real label.
pub const UNKNOWN_NODE_LABEL: &str = "Unknown Node";
