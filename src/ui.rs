//! HUD and screen helpers
//!
//! Pure formatting so the DOM adapter only has to copy strings around.

use crate::progress::GlobalProgress;
use crate::sim::GamePhase;

/// Full-screen panels; exactly one is visible at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    StartMenu,
    Hud,
    GameOver,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Loading, Screen::StartMenu, Screen::Hud, Screen::GameOver];

    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Loading => Screen::Loading,
            GamePhase::Menu => Screen::StartMenu,
            GamePhase::Playing => Screen::Hud,
            GamePhase::GameOver => Screen::GameOver,
        }
    }

    /// DOM element id
    pub fn element_id(self) -> &'static str {
        match self {
            Screen::Loading => "loading-screen",
            Screen::StartMenu => "start-menu",
            Screen::Hud => "game-hud",
            Screen::GameOver => "game-over-screen",
        }
    }
}

/// `MM:SS` from whole seconds (rounded down)
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Stamina bar width in percent
pub fn stamina_percent(stamina: f32, stamina_max: f32) -> f32 {
    if stamina_max <= 0.0 {
        return 0.0;
    }
    (stamina / stamina_max * 100.0).clamp(0.0, 100.0)
}

/// Floating "+N" text
pub fn score_feedback_text(delta: u32) -> String {
    format!("+{delta}")
}

/// "in_cycle/threshold" under the global progress bar
pub fn progress_text(progress: &GlobalProgress) -> String {
    format!("{}/{}", progress.in_cycle(), progress.threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_per_phase() {
        assert_eq!(Screen::for_phase(GamePhase::Loading), Screen::Loading);
        assert_eq!(Screen::for_phase(GamePhase::Menu), Screen::StartMenu);
        assert_eq!(Screen::for_phase(GamePhase::Playing), Screen::Hud);
        assert_eq!(Screen::for_phase(GamePhase::GameOver), Screen::GameOver);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120.0), "02:00");
        assert_eq!(format_clock(59.99), "00:59");
        assert_eq!(format_clock(61.5), "01:01");
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_stamina_percent() {
        assert_eq!(stamina_percent(50.0, 100.0), 50.0);
        assert_eq!(stamina_percent(30.0, 60.0), 50.0);
        assert_eq!(stamina_percent(1.0, 0.0), 0.0);
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(score_feedback_text(5), "+5");
        let mut progress = GlobalProgress::new();
        progress.add(1234);
        assert_eq!(progress_text(&progress), "234/1000");
    }
}
