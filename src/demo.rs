//! Headless demo level and scripted key timeline

use std::sync::Arc;

use glam::Vec2;
use skylark_game::{InputBindings, InputState};
use skylark_physics::{PhysicsWorld, Platform};
use tracing::debug;

/// Where the player spawns, above the ledge
pub const SPAWN: Vec2 = Vec2::new(-6.0, 4.0);

/// Flat floor, a one-way ledge to jump onto and a wall at the far end
pub fn build_level() -> Arc<PhysicsWorld> {
    Arc::new(
        PhysicsWorld::new()
            .with_platform(Platform::solid(Vec2::new(-20.0, -1.0), Vec2::new(20.0, 0.0)))
            .with_platform(Platform::one_way(Vec2::new(-8.0, 2.4), Vec2::new(-2.0, 2.5)))
            .with_platform(Platform::one_way(Vec2::new(1.0, 2.4), Vec2::new(6.0, 2.5)))
            .with_platform(Platform::solid(Vec2::new(12.0, 0.0), Vec2::new(13.0, 6.0))),
    )
}

/// A key press or release at a point in time
#[derive(Debug, Clone, Copy)]
pub struct KeyEvent {
    pub at: f32,
    pub key: &'static str,
    pub pressed: bool,
}

const fn key(at: f32, key: &'static str, pressed: bool) -> KeyEvent {
    KeyEvent { at, key, pressed }
}

/// Drop off the ledge, run right, short hop, full jump onto the second
/// ledge, attack, drop back down and run into the wall.
pub const SCRIPT: &[KeyEvent] = &[
    key(0.5, "KeyS", true),
    key(0.6, "KeyS", false),
    key(1.5, "KeyD", true),
    key(1.8, "Space", true),
    key(1.9, "Space", false),
    key(2.6, "Space", true),
    key(3.4, "Space", false),
    key(3.8, "KeyD", false),
    key(4.0, "KeyJ", true),
    key(4.1, "KeyJ", false),
    key(4.6, "ArrowDown", true),
    key(4.7, "ArrowDown", false),
    key(4.9, "ArrowRight", true),
];

/// Plays [`KeyEvent`]s into an [`InputState`] as time advances
pub struct ScriptedKeys<'a> {
    events: &'a [KeyEvent],
    next: usize,
    elapsed: f32,
    bindings: InputBindings,
    state: InputState,
}

impl<'a> ScriptedKeys<'a> {
    pub fn new(events: &'a [KeyEvent], bindings: InputBindings) -> Self {
        Self {
            events,
            next: 0,
            elapsed: 0.0,
            bindings,
            state: InputState::new(),
        }
    }

    /// Advance by `dt` and return the action state for this frame
    pub fn advance(&mut self, dt: f32) -> &InputState {
        self.state.clear_frame();
        self.elapsed += dt;

        while let Some(event) = self.events.get(self.next) {
            if event.at > self.elapsed {
                break;
            }
            let action = self.bindings.apply_key(&mut self.state, event.key, event.pressed);
            debug!(key = event.key, pressed = event.pressed, ?action, "Scripted key");
            self.next += 1;
        }
        &self.state
    }

    pub fn finished(&self) -> bool {
        self.next >= self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skylark_game::InputAction;

    #[test]
    fn test_script_replays_in_order() {
        let events = [key(0.1, "Space", true), key(0.3, "Space", false)];
        let mut keys = ScriptedKeys::new(&events, InputBindings::new());

        assert!(!keys.advance(0.05).is_held(InputAction::Jump));
        assert!(keys.advance(0.1).is_just_pressed(InputAction::Jump));

        let state = keys.advance(0.1);
        assert!(state.is_held(InputAction::Jump));
        assert!(!state.is_just_pressed(InputAction::Jump));

        assert!(keys.advance(0.1).is_just_released(InputAction::Jump));
        assert!(keys.finished());
    }

    #[test]
    fn test_level_has_floor_under_spawn() {
        let level = build_level();
        assert!(level
            .platforms
            .iter()
            .any(|p| p.bounds.min.x <= SPAWN.x && p.bounds.max.x >= SPAWN.x && p.top() <= SPAWN.y));
    }
}
