//! Player tunables and the physics constants derived from them

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};

/// Tunable player parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    /// Top horizontal speed in units per second
    pub base_speed: f32,
    /// Seconds to reach `base_speed` from rest on the ground
    pub acceleration_time: f32,
    /// Seconds to stop from `base_speed` on the ground
    pub deceleration_time: f32,
    /// Multiplier on acceleration and deceleration while airborne
    pub air_acceleration_modifier: f32,

    /// Apex height of a full jump
    pub max_jump_height: f32,
    /// Seconds to reach the apex of a full jump
    pub time_to_jump_apex: f32,
    /// Fall gravity relative to jump gravity
    pub fall_gravity_multiplier: f32,
    /// Grace period after leaving the ground where a jump is still allowed
    pub coyote_time: f32,

    /// Starting and maximum hit points
    pub base_hit_points: u32,
    /// Seconds of invulnerability after taking damage
    pub damage_invincibility_time: f32,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            base_speed: 6.5,
            acceleration_time: 0.1,
            deceleration_time: 0.1,
            air_acceleration_modifier: 0.5,

            max_jump_height: 3.5,
            time_to_jump_apex: 0.75,
            fall_gravity_multiplier: 1.75,
            coyote_time: 0.1,

            base_hit_points: 6,
            damage_invincibility_time: 1.0,
        }
    }
}

impl PlayerData {
    /// Name of the first field that would make the derived physics degenerate.
    ///
    /// Durations are divisors, so they must be strictly positive.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let durations = [
            ("acceleration_time", self.acceleration_time),
            ("deceleration_time", self.deceleration_time),
            ("time_to_jump_apex", self.time_to_jump_apex),
        ];
        let finite = [
            ("base_speed", self.base_speed),
            ("air_acceleration_modifier", self.air_acceleration_modifier),
            ("max_jump_height", self.max_jump_height),
            ("fall_gravity_multiplier", self.fall_gravity_multiplier),
            ("coyote_time", self.coyote_time),
            ("damage_invincibility_time", self.damage_invincibility_time),
        ];

        durations
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
            .or_else(|| finite.iter().find(|(_, value)| !value.is_finite()))
            .map(|(name, _)| *name)
    }
}

/// Shared handle to the player's tunables.
///
/// Gameplay reads it; only the tunables store writes to it.
#[derive(Debug, Clone, Default)]
pub struct PlayerDataAsset(Arc<RwLock<PlayerData>>);

impl PlayerDataAsset {
    pub fn new(data: PlayerData) -> Self {
        Self(Arc::new(RwLock::new(data)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, PlayerData> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, PlayerData> {
        self.0.write()
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> PlayerData {
        self.0.read().clone()
    }

    /// Overwrite every value
    pub fn replace(&self, data: PlayerData) {
        *self.0.write() = data;
    }
}

/// Constants computed once from [`PlayerData`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedPhysics {
    /// Gravity while rising with jump held (negative)
    pub jump_gravity: f32,
    /// Gravity while falling or after a jump cancel (negative, steeper)
    pub fall_gravity: f32,
    /// Upward launch velocity of a jump
    pub jump_force: f32,
    /// Horizontal acceleration on the ground
    pub acceleration: f32,
    /// Horizontal deceleration on the ground
    pub deceleration: f32,
}

impl DerivedPhysics {
    pub fn from_data(data: &PlayerData) -> Self {
        // Gravity that peaks at max_jump_height after time_to_jump_apex
        let jump_gravity = -(2.0 * data.max_jump_height) / data.time_to_jump_apex.powi(2);
        let fall_gravity = jump_gravity * data.fall_gravity_multiplier;
        let jump_force = jump_gravity.abs() * data.time_to_jump_apex;

        Self {
            jump_gravity,
            fall_gravity,
            jump_force,
            acceleration: data.base_speed / data.acceleration_time,
            deceleration: data.base_speed / data.deceleration_time,
        }
    }

    /// Lowest vertical velocity allowed.
    ///
    /// This reuses the fall gravity value as a velocity floor, so its units
    /// are off; kept for tuning parity with existing levels.
    pub fn terminal_velocity(&self) -> f32 {
        self.fall_gravity
    }
}

impl Default for DerivedPhysics {
    fn default() -> Self {
        Self::from_data(&PlayerData::default())
    }
}
