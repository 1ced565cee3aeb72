//! Skylark Physics - 2D platform collision and motion control
//!
//! Provides the [`MotionController`] seam the player controller moves through,
//! plus a small axis-separated AABB implementation against static platforms.

mod character_controller;

pub use character_controller::{CharacterController, CharacterControllerConfig};

use glam::Vec2;

/// Something that moves a body with collision and reports contacts.
///
/// Contact flags describe the most recent [`MotionController::move_by`] call.
pub trait MotionController {
    /// Resting on a walkable surface after the last move
    fn is_grounded(&self) -> bool;

    /// Hit something above during the last move
    fn ceiling_contact(&self) -> bool;

    /// Let the next move pass through one-way platforms. Applies to one move only.
    fn ignore_one_way_platforms_next_move(&mut self);

    /// Move by `delta`, resolving collisions
    fn move_by(&mut self, delta: Vec2);

    /// Current position of the body's feet
    fn position(&self) -> Vec2;
}

/// Contacts found during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub below: bool,
    pub above: bool,
    pub left: bool,
    pub right: bool,
}

/// Axis-aligned bounding box, y up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap test; touching edges do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// How a platform collides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// Blocks from every side
    Solid,
    /// Only blocks a body falling onto its top
    OneWay,
}

/// A static platform in the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub bounds: Aabb,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn solid(min: Vec2, max: Vec2) -> Self {
        Self {
            bounds: Aabb::new(min, max),
            kind: PlatformKind::Solid,
        }
    }

    pub fn one_way(min: Vec2, max: Vec2) -> Self {
        Self {
            bounds: Aabb::new(min, max),
            kind: PlatformKind::OneWay,
        }
    }

    pub fn top(&self) -> f32 {
        self.bounds.max.y
    }
}

/// Static level geometry the character moves against
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    pub platforms: Vec<Platform>,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_platform(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// Builder-style variant of [`PhysicsWorld::add_platform`]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.add_platform(platform);
        self
    }
}
