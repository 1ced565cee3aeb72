//! Skylark Game - Player gameplay for a 2D platformer
//!
//! Provides the platformer player controller, input buffering, animation
//! output and persisted tunables.

pub mod animation;
pub mod input;
pub mod player;
pub mod rig;
pub mod tunables;

pub use animation::{Animator, AnimatorParameters, LogAnimator, NullAnimator};
pub use input::{
    BufferedInput, InputAction, InputBindings, InputBuffer, InputPhase, InputSignal, InputState,
    PlayerInputHandler, DEFAULT_BUFFER_TIME,
};
pub use player::{
    DamageOutcome, DebugStats, DerivedPhysics, Health, Hitbox, KinematicState, PlayerController,
    PlayerData, PlayerDataAsset, PlayerEvent,
};
pub use rig::PlayerRig;
pub use tunables::{LoadOutcome, PlayerDataStore, TunablesError, TunablesSession};
