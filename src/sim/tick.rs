//! Per-frame simulation step
//!
//! Advances movement, stamina and the round timer, in that order. Pure state
//! updates: the lifecycle turns the outcome into events.

use glam::Vec3;

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;
use crate::{normalize_angle, yaw_forward, yaw_right};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    /// Absolute heading override (autopilot); mouse look goes through `look`
    pub yaw: Option<f32>,
}

impl TickInput {
    /// Any movement intent set
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the simulation advanced at all (only while Playing)
    pub advanced: bool,
    /// The timer hit zero on this tick
    pub expired: bool,
}

/// Sprint speed only applies while there is stamina left
pub fn current_speed(stamina: f32, input: &TickInput, tuning: &Tuning) -> f32 {
    if input.sprint && stamina > 0.0 {
        tuning.player_speed * tuning.sprint_multiplier
    } else {
        tuning.player_speed
    }
}

/// Move the player along its heading, staying on the ground plane
pub fn update_player_movement(state: &mut GameState, input: &TickInput, tuning: &Tuning, dt: f32) {
    let speed = current_speed(state.stamina, input, tuning);
    let player = &mut state.player;

    match input.yaw {
        Some(yaw) if yaw.is_finite() => player.yaw = normalize_angle(yaw),
        Some(yaw) => log::warn!("Ignoring non-finite heading {yaw}"),
        None => {}
    }

    let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
    let dir = yaw_forward(player.yaw) * axis(input.forward, input.backward)
        + yaw_right(player.yaw) * axis(input.right, input.left);

    if dir != Vec3::ZERO {
        // Diagonals aren't faster
        player.position += dir.normalize() * speed * dt;
    }

    let limit = tuning.ground_half_extent;
    player.position.x = player.position.x.clamp(-limit, limit);
    player.position.z = player.position.z.clamp(-limit, limit);
    player.position.y = tuning.eye_height;
}

/// Drain while sprinting and moving, regenerate otherwise
pub fn update_stamina(state: &mut GameState, input: &TickInput, tuning: &Tuning, dt: f32) {
    if input.sprint && input.is_moving() {
        state.stamina = (state.stamina - tuning.stamina_depletion_rate * dt).max(0.0);
    } else {
        state.stamina = (state.stamina + tuning.stamina_regen_rate * dt).min(tuning.stamina_max);
    }
}

/// Count the round down; returns true when the clock reaches zero
pub fn update_timer(state: &mut GameState, dt: f32) -> bool {
    state.time_left = (state.time_left - dt).max(0.0);
    state.time_left == 0.0
}

/// Advance the game state by one frame.
///
/// Does nothing outside [`GamePhase::Playing`]. The phase itself is not
/// changed here; `expired` tells the caller to end the round.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, dt: f32) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::default();
    }

    state.frames += 1;
    update_player_movement(state, input, tuning, dt);
    update_stamina(state, input, tuning, dt);
    let expired = update_timer(state, dt);

    TickOutcome {
        advanced: true,
        expired,
    }
}
