//! Skylark Core - Core types and utilities for the Skylark engine
//!
//! This crate provides the foundational pieces used throughout the engine:
//! - Time system with a fixed simulation step and hitstun freezes
//! - Cancellable timers advanced by the simulation clock
//! - Observer channels for input and gameplay signals
//! - The behaviour lifecycle and the scheduler that drives it

pub mod behaviour;
pub mod events;
pub mod time;
pub mod timer;
pub mod types;

pub use behaviour::{Behaviour, FrameStats, Scheduler, TickContext};
pub use events::{EventChannel, SubscriberId};
pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
pub use timer::{TimerHandle, TimerQueue};
pub use types::EntityId;
