//! Global progress counter
//!
//! Points from every session pile up here. Each time the total passes a
//! multiple of the threshold the player earns a reward. Persisted to
//! LocalStorage.

use serde::{Deserialize, Serialize};

/// Points per reward
pub const REWARD_THRESHOLD: u64 = 1000;

/// A reward earned by crossing a threshold multiple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Total points at the moment the reward was earned
    pub total: u64,
    /// How many rewards this is, counting from the first
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalProgress {
    pub total: u64,
    #[serde(default = "default_threshold")]
    pub threshold: u64,
}

fn default_threshold() -> u64 {
    REWARD_THRESHOLD
}

impl Default for GlobalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalProgress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "climate_hero_progress";

    pub fn new() -> Self {
        Self::with_threshold(REWARD_THRESHOLD)
    }

    /// A zero threshold is bumped to 1
    pub fn with_threshold(threshold: u64) -> Self {
        Self {
            total: 0,
            threshold: threshold.max(1),
        }
    }

    /// Add points; reports a reward if a threshold multiple was crossed
    pub fn add(&mut self, points: u64) -> Option<Reward> {
        if points == 0 {
            return None;
        }
        let before = self.total / self.threshold;
        self.total = self.total.saturating_add(points);
        let after = self.total / self.threshold;

        if after > before {
            log::info!("Reward earned at {} points", self.total);
            Some(Reward {
                total: self.total,
                count: after,
            })
        } else {
            None
        }
    }

    /// Points toward the next reward
    pub fn in_cycle(&self) -> u64 {
        self.total % self.threshold
    }

    /// Progress toward the next reward, 0.0 - 1.0
    pub fn fraction(&self) -> f32 {
        self.in_cycle() as f32 / self.threshold as f32
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::storage::load_json::<GlobalProgress>(Self::STORAGE_KEY) {
            Some(progress) => {
                log::info!("Loaded global progress: {} points", progress.total);
                Self {
                    threshold: progress.threshold.max(1),
                    ..progress
                }
            }
            None => {
                log::info!("No global progress found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if crate::platform::storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("Global progress saved ({} points)", self.total);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
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
    fn test_single_clicks_reward_on_multiples() {
        let mut progress = GlobalProgress::new();
        let mut rewards = Vec::new();
        for _ in 0..2500 {
            if let Some(reward) = progress.add(1) {
                rewards.push(reward);
            }
        }
        assert_eq!(
            rewards,
            vec![
                Reward { total: 1000, count: 1 },
                Reward { total: 2000, count: 2 }
            ]
        );
        assert_eq!(progress.in_cycle(), 500);
        assert!((progress.fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_session_scores_crossing_threshold() {
        let mut progress = GlobalProgress::new();
        assert_eq!(progress.add(990), None);
        assert_eq!(progress.add(15), Some(Reward { total: 1005, count: 1 }));
        assert_eq!(progress.in_cycle(), 5);
    }

    #[test]
    fn test_zero_points_never_rewards() {
        let mut progress = GlobalProgress::new();
        assert_eq!(progress.add(0), None);
        assert_eq!(progress.total, 0);
    }

    #[test]
    fn test_threshold_from_older_save() {
        let progress: GlobalProgress = serde_json::from_str(r#"{ "total": 1234 }"#).unwrap();
        assert_eq!(progress.threshold, 1000);
        assert_eq!(progress.in_cycle(), 234);
        assert_eq!(GlobalProgress::with_threshold(0).threshold, 1);
    }
}
