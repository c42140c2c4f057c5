//! Climate Hero - trash-collecting mini-games
//!
//! Core modules:
//! - `sim`: Game simulation (lifecycle, stamina, timer, trash field, click round)
//! - `platform`: Browser/native platform abstraction (frame clock, input, storage)
//! - `progress`: Global reward counter shared across sessions
//! - `tuning`: Data-driven game balance
//! - `ui`: Presentation helpers for the HUD and screens

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use progress::GlobalProgress;
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds (2 minutes)
    pub const GAME_DURATION: f32 = 120.0;

    /// Player walking speed (world units/s)
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Speed multiplier while sprinting with stamina left
    pub const SPRINT_MULTIPLIER: f32 = 1.8;
    /// Camera height above the ground
    pub const PLAYER_EYE_HEIGHT: f32 = 1.6;

    /// Stamina pool
    pub const STAMINA_MAX: f32 = 100.0;
    /// Stamina lost per second while sprinting and moving
    pub const STAMINA_DEPLETION_RATE: f32 = 25.0;
    /// Stamina regained per second otherwise
    pub const STAMINA_REGEN_RATE: f32 = 15.0;

    /// Trash items in the world (constant for the session)
    pub const TRASH_COUNT: usize = 80;
    /// Probability that a spawned item is rare
    pub const RARE_CHANCE: f32 = 0.2;
    pub const COMMON_SCORE: u32 = 1;
    pub const RARE_SCORE: u32 = 5;
    /// Trash spawns in [-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT] on x and z
    pub const WORLD_HALF_EXTENT: f32 = 240.0;
    /// Resting height of trash items
    pub const TRASH_HEIGHT: f32 = 0.5;
    /// Ground plane is 500x500 - the player can't walk off it
    pub const GROUND_HALF_EXTENT: f32 = 250.0;
    /// Horizontal distance at which the player picks up trash
    pub const PICKUP_RADIUS: f32 = 1.5;

    /// Radians per pixel of pointer-locked mouse movement
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    /// Pitch limit (just short of straight up/down)
    pub const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Forward direction on the ground plane for a yaw angle.
///
/// Yaw 0 looks down -Z (the usual camera convention), positive yaw turns left.
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Right-hand direction on the ground plane for a yaw angle
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Horizontal (XZ) distance between two points
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(5.0) - (5.0 - 2.0 * PI)).abs() < 1e-5);
        assert!((normalize_angle(-4.0) - (-4.0 + 2.0 * PI)).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) - -PI / 2.0).abs() < 1e-6);
        let huge = normalize_angle(1.0e10);
        assert!((-PI..=PI).contains(&huge));
    }

    #[test]
    fn test_yaw_directions_are_perpendicular() {
        for yaw in [0.0, 0.7, -2.1, PI] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!(f.dot(r).abs() < 1e-5);
            assert!((f.length() - 1.0).abs() < 1e-5);
        }
        // Yaw 0 looks down -Z, right is +X
        assert!((yaw_forward(0.0) - Vec3::NEG_Z).length() < 1e-6);
        assert!((yaw_right(0.0) - Vec3::X).length() < 1e-6);
    }
}
