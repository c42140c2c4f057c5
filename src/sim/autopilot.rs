//! Idle/demo mode - the game plays itself
//!
//! Heads for the nearest item and sprints while stamina is comfortable.

use super::field::TrashField;
use super::state::GameState;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Sprint only above this fraction of max stamina
const SPRINT_RESERVE: f32 = 0.3;

/// Close enough to stop walking (the pickup radius takes over)
const ARRIVE_DISTANCE: f32 = 0.25;

/// Movement intents that walk toward the nearest item
pub fn steer(state: &GameState, field: &TrashField, tuning: &Tuning) -> TickInput {
    let Some(target) = field.nearest(state.player.position) else {
        return TickInput::default();
    };

    let dx = target.position.x - state.player.position.x;
    let dz = target.position.z - state.player.position.z;
    let dist = (dx * dx + dz * dz).sqrt();
    if dist < ARRIVE_DISTANCE {
        return TickInput::default();
    }

    TickInput {
        forward: true,
        sprint: state.stamina > tuning.stamina_max * SPRINT_RESERVE,
        // yaw_forward(yaw) == (-sin, -cos) on XZ
        yaw: Some((-dx).atan2(-dz)),
        ..Default::default()
    }
}
