//! Player module
//!
//! Provides the platformer controller, its tunables, health and hitboxes.

mod controller;
mod data;
mod health;
mod hitbox;

pub use controller::{
    DebugStats, KinematicState, PlayerController, PlayerEvent, DEATH_HITSTUN,
    DROP_GRAVITY_MULTIPLIER, GROUNDED_VELOCITY_EPSILON,
};
pub use data::{DerivedPhysics, PlayerData, PlayerDataAsset};
pub use health::{DamageOutcome, Health};
pub use hitbox::Hitbox;
