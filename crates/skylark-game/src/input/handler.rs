//! Player input handler
//!
//! Receives raw directional and button input, feeds the input buffer, and
//! publishes the signals the player reacts to (jump released, drop requested).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skylark_core::{EventChannel, SubscriberId};
use tracing::debug;

use super::buffer::{BufferedInput, InputBuffer};
use super::state::{InputAction, InputState};

/// Lifecycle phase of a button action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPhase {
    /// Not pressed
    #[default]
    Waiting,
    /// Press began this frame
    Started,
    /// Press registered and still held
    Performed,
    /// Released
    Canceled,
}

/// Signals published to subscribers of the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    /// Jump was released
    JumpCanceled,
    /// Drop through the platform underfoot
    Drop,
}

/// Translates raw input into buffered intents and signals
#[derive(Debug)]
pub struct PlayerInputHandler {
    /// Normalized directional input
    axis: Vec2,
    /// Last phase reported for the jump button
    jump_phase: InputPhase,
    /// Whether jump is currently held
    jump_held: bool,
    buffer: InputBuffer,
    signals: EventChannel<InputSignal>,
}

impl PlayerInputHandler {
    /// Create a handler whose presses stay buffered for `buffer_time` seconds
    pub fn new(buffer_time: f32) -> Self {
        Self {
            axis: Vec2::ZERO,
            jump_phase: InputPhase::Waiting,
            jump_held: false,
            buffer: InputBuffer::new(buffer_time),
            signals: EventChannel::new(),
        }
    }

    /// Get the normalized directional input
    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    /// Get the last phase reported for jump
    pub fn jump_phase(&self) -> InputPhase {
        self.jump_phase
    }

    /// Check if jump is held
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Get the currently buffered intent
    pub fn buffered(&self) -> BufferedInput {
        self.buffer.current()
    }

    /// Clear the buffered intent
    pub fn consume_buffer(&mut self) {
        self.buffer.consume();
    }

    /// Advance the buffer's expiry timer
    pub fn advance(&mut self, dt: f32) {
        self.buffer.advance(dt);
    }

    /// Register for input signals
    pub fn subscribe(&mut self) -> SubscriberId {
        self.signals.subscribe()
    }

    /// Stop receiving input signals
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.signals.unsubscribe(id)
    }

    /// Take the signals published for a subscriber since its last drain
    pub fn drain_signals(&mut self, id: SubscriberId) -> Vec<InputSignal> {
        self.signals.drain(id)
    }

    /// Directional input, normalized (zero stays zero)
    pub fn read_axis(&mut self, value: Vec2) {
        self.axis = value.normalize_or_zero();
    }

    pub fn read_jump(&mut self, phase: InputPhase) {
        self.jump_phase = phase;
        match phase {
            InputPhase::Started => {
                self.jump_held = true;
                self.buffer.buffer(BufferedInput::Jump);
            }
            InputPhase::Canceled => {
                self.jump_held = false;
                self.signals.publish(InputSignal::JumpCanceled);
            }
            InputPhase::Performed | InputPhase::Waiting => {}
        }
    }

    pub fn read_drop(&mut self, phase: InputPhase) {
        if phase == InputPhase::Performed {
            self.signals.publish(InputSignal::Drop);
        }
    }

    pub fn read_attack(&mut self, phase: InputPhase) {
        if phase == InputPhase::Started {
            self.buffer.buffer(BufferedInput::Attack);
            debug!("Buffered an attack");
        }
    }

    /// Translate one frame of action state into handler calls.
    ///
    /// A press reports `Started` then `Performed`; a release reports `Canceled`.
    pub fn feed(&mut self, state: &InputState) {
        let mut axis = Vec2::ZERO;
        if state.is_held(InputAction::MoveLeft) {
            axis.x -= 1.0;
        }
        if state.is_held(InputAction::MoveRight) {
            axis.x += 1.0;
        }
        if state.is_held(InputAction::MoveUp) {
            axis.y += 1.0;
        }
        if state.is_held(InputAction::MoveDown) {
            axis.y -= 1.0;
        }
        self.read_axis(axis);

        if state.is_just_pressed(InputAction::Jump) {
            self.read_jump(InputPhase::Started);
            self.read_jump(InputPhase::Performed);
        }
        if state.is_just_released(InputAction::Jump) {
            self.read_jump(InputPhase::Canceled);
        }

        if state.is_just_pressed(InputAction::MoveDown) {
            self.read_drop(InputPhase::Started);
            self.read_drop(InputPhase::Performed);
        }

        if state.is_just_pressed(InputAction::Attack) {
            self.read_attack(InputPhase::Started);
            self.read_attack(InputPhase::Performed);
        }
    }
}

impl Default for PlayerInputHandler {
    fn default() -> Self {
        Self::new(super::buffer::DEFAULT_BUFFER_TIME)
    }
}
