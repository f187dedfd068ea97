//! Oswald - reward shaping and episode setup for a Rocket League training environment
//!
//! Core modules:
//! - `game`: Read-only game snapshots, the mutable state wrapper, event extraction
//! - `reward`: Pluggable reward terms and their weighted combination
//! - `setter`: Seeded episode state randomization (attack/defend/center)
//! - `terminal`: Episode end conditions
//! - `controls`: Action vector to controller mapping
//! - `settings`: Data-driven training configuration
//! - `training`: One environment instance's match composition

pub mod controls;
pub mod game;
pub mod reward;
pub mod settings;
pub mod setter;
pub mod terminal;
pub mod training;

pub use settings::{SettingsError, TrainingSettings};
pub use training::{StepOutcome, TrainingMatch};

use glam::Vec3;

/// Field and physics constants
pub mod consts {
    use glam::Vec3;

    /// Team numbers as reported by the game
    pub const BLUE_TEAM: u8 = 0;
    pub const ORANGE_TEAM: u8 = 1;

    /// Physics engine frequency (ticks per second)
    pub const PHYSICS_TICK_FREQ: f32 = 120.0;

    /// Distance from the field center to the back wall
    pub const BACK_WALL_Y: f32 = 5120.0;
    /// Y coordinate of the back of the goal net
    pub const BACK_NET_Y: f32 = 6000.0;
    /// Height of the goal mouth (crossbar z)
    pub const GOAL_HEIGHT: f32 = 642.775;

    pub const BLUE_GOAL_CENTER: Vec3 = Vec3::new(0.0, -BACK_WALL_Y, GOAL_HEIGHT / 2.0);
    pub const ORANGE_GOAL_CENTER: Vec3 = Vec3::new(0.0, BACK_WALL_Y, GOAL_HEIGHT / 2.0);
    pub const BLUE_GOAL_BACK: Vec3 = Vec3::new(0.0, -BACK_NET_Y, GOAL_HEIGHT / 2.0);
    pub const ORANGE_GOAL_BACK: Vec3 = Vec3::new(0.0, BACK_NET_Y, GOAL_HEIGHT / 2.0);

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 92.75;
    pub const BALL_MAX_SPEED: f32 = 6000.0;

    /// Constant penalty returned by shaping terms when they have nothing to reward
    pub const IDLE_PENALTY: f32 = -0.1;
}

/// Length of a vector (always >= 0)
#[inline]
pub fn magnitude(v: Vec3) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`, or `Vec3::ZERO` when `v` has no length
///
/// The vector is divided by its largest component first so the squared length
/// can neither overflow nor underflow.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let scale = v.abs().max_element();
    if !(v.is_finite() && scale > 0.0) {
        return Vec3::ZERO;
    }
    let scaled = v / scale;
    scaled / scaled.length()
}

/// Angle between two directions in radians, within [0, π]
///
/// Zero vectors normalize to zero, giving a dot product of 0 and an angle of π/2.
/// The dot product is clamped before `acos` since normalized inputs can
/// overshoot ±1 by a few ulps.
#[inline]
pub fn angle_between(u: Vec3, v: Vec3) -> f32 {
    let dot = normalize(u).dot(normalize(v));
    dot.clamp(-1.0, 1.0).acos()
}
