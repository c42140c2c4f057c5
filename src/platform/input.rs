//! Keyboard input
//!
//! Maps `KeyboardEvent.code` values to game actions and keeps the held
//! movement keys as a [`TickInput`] snapshot.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Forward,
    Backward,
    Left,
    Right,
    Sprint,
    /// Start/restart the round
    Start,
    /// Demo mode on/off
    ToggleAutopilot,
}

/// Physical key codes, so WASD works on any layout
pub fn binding_for(code: &str) -> Option<KeyBinding> {
    match code {
        "KeyW" | "ArrowUp" => Some(KeyBinding::Forward),
        "KeyS" | "ArrowDown" => Some(KeyBinding::Backward),
        "KeyA" | "ArrowLeft" => Some(KeyBinding::Left),
        "KeyD" | "ArrowRight" => Some(KeyBinding::Right),
        "ShiftLeft" | "ShiftRight" => Some(KeyBinding::Sprint),
        "Enter" | "Space" => Some(KeyBinding::Start),
        "KeyI" => Some(KeyBinding::ToggleAutopilot),
        _ => None,
    }
}

/// Held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl InputState {
    /// Record a key press/release. Returns the binding for one-shot handling.
    pub fn set_key(&mut self, code: &str, pressed: bool) -> Option<KeyBinding> {
        let binding = binding_for(code)?;
        match binding {
            KeyBinding::Forward => self.forward = pressed,
            KeyBinding::Backward => self.backward = pressed,
            KeyBinding::Left => self.left = pressed,
            KeyBinding::Right => self.right = pressed,
            KeyBinding::Sprint => self.sprint = pressed,
            KeyBinding::Start | KeyBinding::ToggleAutopilot => {}
        }
        Some(binding)
    }

    /// Drop all held keys (focus lost, pointer unlocked)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            sprint: self.sprint,
            yaw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        let mut input = InputState::default();
        input.set_key("KeyW", true);
        input.set_key("ArrowLeft", true);
        input.set_key("ShiftLeft", true);
        let snap = input.snapshot();
        assert!(snap.forward && snap.left && snap.sprint);
        assert!(snap.is_moving());

        input.set_key("KeyW", false);
        input.set_key("ArrowLeft", false);
        assert!(!input.snapshot().is_moving());
    }

    #[test]
    fn test_one_shots_dont_hold() {
        let mut input = InputState::default();
        assert_eq!(input.set_key("KeyI", true), Some(KeyBinding::ToggleAutopilot));
        assert_eq!(input.set_key("Enter", true), Some(KeyBinding::Start));
        assert_eq!(input, InputState::default());
        assert_eq!(input.set_key("KeyQ", true), None);
    }

    #[test]
    fn test_clear() {
        let mut input = InputState::default();
        input.set_key("KeyD", true);
        input.set_key("ShiftRight", true);
        input.clear();
        assert_eq!(input.snapshot(), TickInput::default());
    }
}
