//! Keyboard driven movement.
//!
//! Held keys are tracked as a bitmask of [`Actions`]. A press sets the bit of the
//! mapped action and a release clears it, so several directions can be held at
//! once.

use std::ops::{BitOr, BitOrAssign};

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Actions(u8);

impl Actions {
    pub const NONE: Actions = Actions(0);
    pub const MOVE_UP: Actions = Actions(1);
    pub const MOVE_DOWN: Actions = Actions(1 << 1);
    pub const MOVE_LEFT: Actions = Actions(1 << 2);
    pub const MOVE_RIGHT: Actions = Actions(1 << 3);
    pub const MOVE_FORWARD: Actions = Actions(1 << 4);
    pub const MOVE_BACKWARD: Actions = Actions(1 << 5);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Actions) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Actions) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Actions) {
        self.0 &= !other.0;
    }

    pub fn set(&mut self, other: Actions, pressed: bool) {
        if pressed {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }

    /// Apply a winit key event. Keys without an action are ignored.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.apply_key(event.physical_key, event.state);
    }

    pub fn apply_key(&mut self, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        if let Some(action) = action_for_key(code) {
            self.set(action, state == ElementState::Pressed);
        }
    }
}

impl BitOr for Actions {
    type Output = Actions;

    fn bitor(self, rhs: Actions) -> Actions {
        Actions(self.0 | rhs.0)
    }
}

impl BitOrAssign for Actions {
    fn bitor_assign(&mut self, rhs: Actions) {
        self.0 |= rhs.0;
    }
}

pub fn action_for_key(code: KeyCode) -> Option<Actions> {
    match code {
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Actions::MOVE_LEFT),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Actions::MOVE_RIGHT),
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Actions::MOVE_UP),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Actions::MOVE_DOWN),
        KeyCode::KeyF => Some(Actions::MOVE_FORWARD),
        KeyCode::KeyB => Some(Actions::MOVE_BACKWARD),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_map_to_the_same_action() {
        assert_eq!(action_for_key(KeyCode::KeyA), action_for_key(KeyCode::ArrowLeft));
        assert_eq!(action_for_key(KeyCode::KeyD), action_for_key(KeyCode::ArrowRight));
        assert_eq!(action_for_key(KeyCode::KeyW), action_for_key(KeyCode::ArrowUp));
        assert_eq!(action_for_key(KeyCode::KeyS), Some(Actions::MOVE_DOWN));
        assert_eq!(action_for_key(KeyCode::ArrowDown), Some(Actions::MOVE_DOWN));
        assert_eq!(action_for_key(KeyCode::KeyF), Some(Actions::MOVE_FORWARD));
        assert_eq!(action_for_key(KeyCode::KeyB), Some(Actions::MOVE_BACKWARD));
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn press_and_release_toggle_only_their_bit() {
        let mut actions = Actions::default();
        actions.set(Actions::MOVE_LEFT, true);
        actions.set(Actions::MOVE_UP, true);
        assert!(actions.contains(Actions::MOVE_LEFT | Actions::MOVE_UP));

        actions.set(Actions::MOVE_LEFT, false);
        assert!(!actions.contains(Actions::MOVE_LEFT));
        assert!(actions.contains(Actions::MOVE_UP));
        assert_eq!(actions.bits(), 1);

        actions.set(Actions::MOVE_UP, false);
        assert!(actions.is_empty());
    }

    #[test]
    fn key_events_set_and_clear_their_action() {
        let mut actions = Actions::default();
        actions.apply_key(PhysicalKey::Code(KeyCode::ArrowLeft), ElementState::Pressed);
        actions.apply_key(PhysicalKey::Code(KeyCode::KeyF), ElementState::Pressed);
        assert!(actions.contains(Actions::MOVE_LEFT | Actions::MOVE_FORWARD));

        actions.apply_key(PhysicalKey::Code(KeyCode::KeyA), ElementState::Released);
        assert_eq!(actions, Actions::MOVE_FORWARD);

        // unmapped keys leave the held set alone
        actions.apply_key(PhysicalKey::Code(KeyCode::KeyQ), ElementState::Pressed);
        assert_eq!(actions, Actions::MOVE_FORWARD);
    }

    #[test]
    fn flags_are_distinct_bits() {
        let all = Actions::MOVE_UP
            | Actions::MOVE_DOWN
            | Actions::MOVE_LEFT
            | Actions::MOVE_RIGHT
            | Actions::MOVE_FORWARD
            | Actions::MOVE_BACKWARD;
        assert_eq!(all.bits(), 0b11_1111);
    }
}
