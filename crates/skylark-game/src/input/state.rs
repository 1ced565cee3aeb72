//! Action-based input state
//!
//! Maps named physical keys to game actions and tracks held/pressed/released
//! actions for one frame.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Look up (W by default)
    MoveUp,
    /// Crouch / drop through platforms (S by default)
    MoveDown,
    /// Jump (Space by default)
    Jump,
    /// Attack (J by default)
    Attack,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Record a press or release of an action
    pub fn set_action(&mut self, action: InputAction, pressed: bool) {
        if pressed {
            if !self.held.contains(&action) {
                self.just_pressed.insert(action);
            }
            self.held.insert(action);
        } else if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Maps key names (e.g. `"KeyA"`, `"Space"`) to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<String, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<String>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        bindings.bind("KeyA", InputAction::MoveLeft);
        bindings.bind("KeyD", InputAction::MoveRight);
        bindings.bind("KeyW", InputAction::MoveUp);
        bindings.bind("KeyS", InputAction::MoveDown);

        // Arrow keys as alternative
        bindings.bind("ArrowLeft", InputAction::MoveLeft);
        bindings.bind("ArrowRight", InputAction::MoveRight);
        bindings.bind("ArrowUp", InputAction::MoveUp);
        bindings.bind("ArrowDown", InputAction::MoveDown);

        bindings.bind("Space", InputAction::Jump);
        bindings.bind("KeyJ", InputAction::Attack);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: impl Into<String>, action: InputAction) {
        let key = key.into();
        self.unbind(&key);
        self.reverse.entry(action).or_default().push(key.clone());
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: &str) {
        if let Some(action) = self.bindings.remove(key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_action(&self, key: &str) -> Option<InputAction> {
        self.bindings.get(key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[String] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Apply a key event to an input state. Returns the action it maps to, if any.
    pub fn apply_key(
        &self,
        state: &mut InputState,
        key: &str,
        pressed: bool,
    ) -> Option<InputAction> {
        let action = self.get_action(key)?;
        state.set_action(action, pressed);
        Some(action)
    }
}
