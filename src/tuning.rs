//! Data-driven game balance
//!
//! Every gameplay constant from [`crate::consts`] as a named option. Missing
//! fields fall back to the defaults, so a tuning file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Round length (seconds)
    pub game_duration: f32,
    pub player_speed: f32,
    pub sprint_multiplier: f32,
    pub stamina_max: f32,
    /// Stamina per second while sprinting and moving
    pub stamina_depletion_rate: f32,
    /// Stamina per second otherwise
    pub stamina_regen_rate: f32,
    pub trash_count: usize,
    /// Probability (0-1) that an item spawns rare
    pub rare_chance: f32,
    pub common_score: u32,
    pub rare_score: u32,
    pub world_half_extent: f32,
    pub ground_half_extent: f32,
    pub trash_height: f32,
    pub pickup_radius: f32,
    pub eye_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration: GAME_DURATION,
            player_speed: PLAYER_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            stamina_max: STAMINA_MAX,
            stamina_depletion_rate: STAMINA_DEPLETION_RATE,
            stamina_regen_rate: STAMINA_REGEN_RATE,
            trash_count: TRASH_COUNT,
            rare_chance: RARE_CHANCE,
            common_score: COMMON_SCORE,
            rare_score: RARE_SCORE,
            world_half_extent: WORLD_HALF_EXTENT,
            ground_half_extent: GROUND_HALF_EXTENT,
            trash_height: TRASH_HEIGHT,
            pickup_radius: PICKUP_RADIUS,
            eye_height: PLAYER_EYE_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation can't honor
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("game_duration", self.game_duration)?;
        positive("player_speed", self.player_speed)?;
        positive("stamina_max", self.stamina_max)?;
        positive("world_half_extent", self.world_half_extent)?;
        positive("ground_half_extent", self.ground_half_extent)?;
        positive("pickup_radius", self.pickup_radius)?;
        // Trash must spawn where the player can walk
        if self.world_half_extent > self.ground_half_extent {
            return Err(TuningError::OutOfRange {
                field: "world_half_extent",
                expected: "at most ground_half_extent",
                value: self.world_half_extent,
            });
        }
        non_negative("stamina_depletion_rate", self.stamina_depletion_rate)?;
        non_negative("stamina_regen_rate", self.stamina_regen_rate)?;
        if !(self.sprint_multiplier.is_finite() && self.sprint_multiplier >= 1.0) {
            return Err(TuningError::OutOfRange {
                field: "sprint_multiplier",
                expected: "at least 1.0",
                value: self.sprint_multiplier,
            });
        }
        if !(0.0..=1.0).contains(&self.rare_chance) {
            return Err(TuningError::OutOfRange {
                field: "rare_chance",
                expected: "between 0 and 1",
                value: self.rare_chance,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            expected: "zero or more",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.game_duration, 120.0);
        assert_eq!(tuning.trash_count, 80);
        assert_eq!(tuning.rare_score, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_duration": 30.0, "trash_count": 5 }"#).unwrap();
        assert_eq!(tuning.game_duration, 30.0);
        assert_eq!(tuning.trash_count, 5);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_rejects_bad_rare_chance() {
        let err = Tuning::from_json(r#"{ "rare_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange { field: "rare_chance", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = Tuning::from_json(r#"{ "game_duration": 0.0 }"#).unwrap_err();
        assert!(err.to_string().contains("game_duration"));
    }

    #[test]
    fn test_rejects_trash_beyond_ground() {
        let err = Tuning::from_json(r#"{ "world_half_extent": 300.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange { field: "world_half_extent", .. }
        ));
        assert!(Tuning::from_json(r#"{ "world_half_extent": 250.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
