use crate::latch::{Input, InputDevice, KeyCode};

/// A camera command produced from input. Games consume actions, never raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    TurnUp,
    TurnDown,
    TurnLeft,
    TurnRight,
    /// Return the camera to its starting frame.
    ResetCamera,
}

impl Action {
    /// Edge-triggered actions fire once per press; the rest fire on every tick the key is held.
    pub fn is_edge_triggered(self) -> bool {
        matches!(self, Action::ResetCamera)
    }
}

/// Key-to-action map. Several keys may drive the same action.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    entries: Vec<(KeyCode, Action)>,
}

impl Default for Bindings {
    /// WASD moves, the arrow keys turn, R resets the camera.
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::W, Action::MoveForward);
        bindings.bind(KeyCode::S, Action::MoveBackward);
        bindings.bind(KeyCode::A, Action::MoveLeft);
        bindings.bind(KeyCode::D, Action::MoveRight);
        bindings.bind(KeyCode::UP, Action::TurnUp);
        bindings.bind(KeyCode::DOWN, Action::TurnDown);
        bindings.bind(KeyCode::LEFT, Action::TurnLeft);
        bindings.bind(KeyCode::RIGHT, Action::TurnRight);
        bindings.bind(KeyCode::R, Action::ResetCamera);
        bindings
    }
}

impl Bindings {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.unbind(key);
        self.entries.push((key, action));
    }

    pub fn unbind(&mut self, key: KeyCode) {
        self.entries.retain(|(k, _)| *k != key);
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, a)| *a)
    }

    /// Actions triggered by the latch's current state, each at most once, in binding order.
    pub fn active_actions<D: InputDevice>(&self, input: &Input<D>) -> Vec<Action> {
        let mut active = Vec::new();
        for &(key, action) in &self.entries {
            let fired = if action.is_edge_triggered() {
                input.key_just_down(key)
            } else {
                input.is_key_down(key)
            };
            if fired && !active.contains(&action) {
                active.push(action);
            }
        }
        active
    }
}
