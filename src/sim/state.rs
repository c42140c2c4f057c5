//! Game state and core simulation types
//!
//! Everything the lifecycle owns lives in [`GameState`]; trash items live in
//! the [`TrashField`](super::TrashField).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Top-level lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets; the only way out is to Menu
    Loading,
    /// Start menu, waiting for the player
    Menu,
    /// Active round
    Playing,
    /// Round ended, waiting for restart
    GameOver,
}

/// Trash rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrashKind {
    Common,
    Rare,
}

impl TrashKind {
    /// Points awarded for collecting this kind
    pub fn score_value(self, tuning: &Tuning) -> u32 {
        match self {
            TrashKind::Common => tuning.common_score,
            TrashKind::Rare => tuning.rare_score,
        }
    }
}

/// A piece of trash lying in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashItem {
    pub id: u32,
    pub kind: TrashKind,
    /// Fixed at spawn
    pub score_value: u32,
    pub position: Vec3,
}

/// First-person player (camera) transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Rotation around Y (radians, 0 looks down -Z)
    pub yaw: f32,
    /// Rotation around X (radians, clamped)
    pub pitch: f32,
}

impl Player {
    /// Spawn at the world origin at eye height
    pub fn spawn(eye_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, eye_height, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Per-frame HUD data sent to the observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub time_left: f32,
    pub stamina: f32,
}

/// Data attached to a phase change (final score only matters on GameOver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub final_score: u64,
}

/// Everything the lifecycle reports to the UI, as data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged {
        phase: GamePhase,
        summary: RoundSummary,
    },
    Update(HudSnapshot),
    ScoreFeedback(u32),
}

/// Complete game state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the session RNG was built from
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score for the current round
    pub score: u64,
    /// Seconds left in the round, in [0, game_duration]
    pub time_left: f32,
    /// Sprint resource, in [0, stamina_max]
    pub stamina: f32,
    pub player: Player,
    /// Playing ticks simulated this round
    pub frames: u64,
}

impl GameState {
    /// Fresh state in the Loading phase
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Loading,
            score: 0,
            time_left: tuning.game_duration,
            stamina: tuning.stamina_max,
            player: Player::spawn(tuning.eye_height),
            frames: 0,
        }
    }

    /// Reset round values for a new round (phase is left alone)
    pub fn reset_round(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.time_left = tuning.game_duration;
        self.stamina = tuning.stamina_max;
        self.player = Player::spawn(tuning.eye_height);
        self.frames = 0;
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            time_left: self.time_left,
            stamina: self.stamina,
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            final_score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_loading_and_full() {
        let tuning = Tuning::default();
        let state = GameState::new(&tuning, 7);
        assert_eq!(state.phase, GamePhase::Loading);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_left, 120.0);
        assert_eq!(state.stamina, 100.0);
        assert_eq!(state.player.position.y, tuning.eye_height);
    }

    #[test]
    fn test_score_values() {
        let tuning = Tuning::default();
        assert_eq!(TrashKind::Common.score_value(&tuning), 1);
        assert_eq!(TrashKind::Rare.score_value(&tuning), 5);
    }

    #[test]
    fn test_reset_round_keeps_phase() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning, 1);
        state.phase = GamePhase::GameOver;
        state.score = 42;
        state.time_left = 0.0;
        state.stamina = 3.0;
        state.player.position.x = 50.0;
        state.reset_round(&tuning);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snapshot(), HudSnapshot { score: 0, time_left: 120.0, stamina: 100.0 });
        assert_eq!(state.player.position.x, 0.0);
    }
}
