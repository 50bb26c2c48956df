//! Round World - a side-scrolling combat encounter on a circular track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AI, hit boxes, combat)
//! - `levels`: Spawn rosters for each stage
//! - `settings`: Run configuration loaded from JSON
//!
//! Horizontal positions are world units on a circle of circumference
//! [`consts::CIRCUMFERENCE`]. Every stored position is normalized into
//! `[0, C)`; the helpers below are the only place wrapping happens.

pub mod levels;
pub mod settings;
pub mod sim;

pub use settings::{SettingsError, SimSettings};

/// Game configuration constants
pub mod consts {
    use std::f32::consts::{PI, TAU};

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Radius of the round world, in pixels
    pub const WORLD_RADIUS: f32 = 800.0;
    /// Circumference of the track in world units (2πr)
    pub const CIRCUMFERENCE: f32 = 2.0 * PI * WORLD_RADIUS;
    /// Whole pixels in one lap of the track
    pub const PIXELS_PER_LAP: f32 = 5026.0;
    /// World units covered by one pixel of movement
    pub const UNITS_PER_PIXEL: f32 = CIRCUMFERENCE / PIXELS_PER_LAP;
    /// Rotation (radians) covered by one pixel of movement
    pub const RADIANS_PER_PIXEL: f32 = TAU / PIXELS_PER_LAP;
    /// Rotation (radians) per world unit
    pub const RADIANS_PER_UNIT: f32 = TAU / CIRCUMFERENCE;

    /// Width/height of the out-of-bounds bands either side of the seam
    pub const SEAM_BAND: f32 = 1000.0;

    /// Downward acceleration added every airborne tick
    pub const GRAVITY_STEP: f32 = 0.5;
    /// Upward lift applied every jumping tick
    pub const JUMP_LIFT: f32 = 9.0;
    /// Upward lift applied every knock-back tick
    pub const KNOCKBACK_LIFT: f32 = 5.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u8 = 5;
    pub const DAMAGE_IMMUNITY_TICKS: u32 = 40;
    pub const ATTACK_TICKS: u32 = 24;
    pub const ROLL_TICKS: u32 = 60;

    /// Enemy defaults
    pub const REVERSE_LOCK_TICKS: u8 = 5;
    pub const ENEMY_INVULNERABLE_TICKS: u32 = 18;
    /// Invulnerability left when the hit/deflect flash is cleared
    pub const FLASH_CLEAR_BELOW: u32 = 10;
    pub const TURN_AROUND_BASE: i32 = 300;
}

use consts::{CIRCUMFERENCE, RADIANS_PER_UNIT, UNITS_PER_PIXEL};

/// Wrap a linear offset into `[0, C)`
#[inline]
pub fn normalize(x: f32) -> f32 {
    let wrapped = x.rem_euclid(CIRCUMFERENCE);
    // rem_euclid can round up to exactly C for tiny negative inputs
    if wrapped >= CIRCUMFERENCE { 0.0 } else { wrapped }
}

/// Forward distance walking in the positive direction from `from` to `to`,
/// in `[0, C)`
#[inline]
pub fn signed_distance(from: f32, to: f32) -> f32 {
    normalize(to - from)
}

/// Shortest distance between two points on the circle, in `[0, C/2]`
#[inline]
pub fn shortest_distance(a: f32, b: f32) -> f32 {
    let forward = signed_distance(a, b);
    forward.min(CIRCUMFERENCE - forward)
}

/// Convert a pixel offset to world units
#[inline]
pub fn pixels_to_units(pixels: f32) -> f32 {
    pixels * UNITS_PER_PIXEL
}

/// Convert world units to radians of track rotation
#[inline]
pub fn units_to_radians(units: f32) -> f32 {
    units * RADIANS_PER_UNIT
}

/// Convert radians of track rotation back to world units
#[inline]
pub fn radians_to_units(radians: f32) -> f32 {
    radians / RADIANS_PER_UNIT
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle >= PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}
