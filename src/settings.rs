//! Game settings and preferences
//!
//! Persisted separately from global progress in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Mouse look multiplier (1.0 = default speed)
    pub mouse_sensitivity: f32,
    /// Invert vertical look
    pub invert_y: bool,

    // === Visual Effects ===
    /// Collection sparkles
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no sparkles, no HUD pop)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,

            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Clamp out-of-range values (hand-edited storage)
    pub fn sanitize(&mut self) {
        self.mouse_sensitivity = if self.mouse_sensitivity.is_finite() {
            self.mouse_sensitivity.clamp(0.1, 5.0)
        } else {
            1.0
        };
        for vol in [&mut self.master_volume, &mut self.sfx_volume, &mut self.music_volume] {
            *vol = if vol.is_finite() { (*vol).clamp(0.0, 1.0) } else { 0.0 };
        }
    }

    /// Effective collection effects (respects reduced_motion)
    pub fn effects_enabled(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    pub fn effective_music_volume(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Look deltas as (dx, dy) with inversion applied
    pub fn look_delta(&self, dx: f32, dy: f32) -> (f32, f32) {
        if self.invert_y { (dx, -dy) } else { (dx, dy) }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "climate_hero_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::load_json::<Settings>(Self::STORAGE_KEY) {
            Some(mut settings) => {
                settings.sanitize();
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if crate::platform::storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps() {
        let mut settings = Settings {
            mouse_sensitivity: 40.0,
            master_volume: 2.0,
            sfx_volume: f32::NAN,
            ..Default::default()
        };
        settings.sanitize();
        assert_eq!(settings.mouse_sensitivity, 5.0);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effects_enabled());
        assert!(Settings::default().effects_enabled());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "invert_y": true }"#).unwrap();
        assert!(settings.invert_y);
        assert_eq!(settings.look_delta(3.0, 4.0), (3.0, -4.0));
        assert_eq!(settings.master_volume, 0.8);
    }
}
