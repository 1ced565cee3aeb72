//! Animation sink
//!
//! The controller pushes parameters into whatever animates the player; it
//! never reads anything back.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Receives animation parameters from gameplay code
pub trait Animator {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_trigger(&mut self, name: &str);
    /// Mirror the sprite horizontally
    fn set_flip_x(&mut self, flip: bool);
}

/// Names of the animator parameters the player drives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorParameters {
    /// Float: absolute horizontal input
    pub speed: String,
    /// Trigger: start an attack
    pub attack: String,
    /// Bool: inside an attack combo
    pub combo: String,
}

impl Default for AnimatorParameters {
    fn default() -> Self {
        Self {
            speed: "Input".to_string(),
            attack: "Attack".to_string(),
            combo: "In Combo".to_string(),
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimator;

impl Animator for NullAnimator {
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
    fn set_trigger(&mut self, _name: &str) {}
    fn set_flip_x(&mut self, _flip: bool) {}
}

/// Traces every parameter change; handy for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnimator;

impl Animator for LogAnimator {
    fn set_float(&mut self, name: &str, value: f32) {
        trace!(name, value, "Animator float");
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        trace!(name, value, "Animator bool");
    }

    fn set_trigger(&mut self, name: &str) {
        trace!(name, "Animator trigger");
    }

    fn set_flip_x(&mut self, flip: bool) {
        trace!(flip, "Sprite flip");
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameter_names() {
        let params = AnimatorParameters::default();
        assert_eq!(params.speed, "Input");
        assert_eq!(params.attack, "Attack");
        assert_eq!(params.combo, "In Combo");
    }
}
