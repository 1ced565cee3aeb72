//! Axis-separated AABB character controller for 2D platforming

use std::sync::Arc;

use glam::Vec2;
use tracing::trace;

use crate::{Aabb, CollisionState, MotionController, PhysicsWorld, PlatformKind};

/// How far past a surface a move may start and still count as arriving from its side
const CONTACT_TOLERANCE: f32 = 1e-3;

/// Character controller configuration
#[derive(Debug, Clone)]
pub struct CharacterControllerConfig {
    /// Body width (default: 0.8)
    pub width: f32,
    /// Body height (default: 1.6)
    pub height: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            width: 0.8,
            height: 1.6,
        }
    }
}

/// Kinematic body that moves against a [`PhysicsWorld`]
pub struct CharacterController {
    /// Configuration
    pub config: CharacterControllerConfig,
    /// Feet position (bottom centre of the body)
    pub position: Vec2,
    /// Contacts from the last move
    collision_state: CollisionState,
    /// Pass through one-way platforms on the next move
    ignore_one_way_platforms: bool,
    world: Arc<PhysicsWorld>,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new(world: Arc<PhysicsWorld>) -> Self {
        Self::with_config(world, CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(world: Arc<PhysicsWorld>, config: CharacterControllerConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            collision_state: CollisionState::default(),
            ignore_one_way_platforms: false,
            world,
        }
    }

    /// Place the body, clearing contacts
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.collision_state = CollisionState::default();
    }

    pub fn collision_state(&self) -> CollisionState {
        self.collision_state
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height) * 0.5
    }

    /// Current body bounds
    pub fn bounds(&self) -> Aabb {
        let half = self.half_extents();
        Aabb::from_center(self.position + Vec2::new(0.0, half.y), half)
    }

    fn resolve_horizontal(&mut self, dx: f32, state: &mut CollisionState) {
        if dx == 0.0 {
            return;
        }
        self.position.x += dx;

        let half_width = self.half_extents().x;
        let world = Arc::clone(&self.world);
        for platform in world.platforms.iter().filter(|p| p.kind == PlatformKind::Solid) {
            if !self.bounds().intersects(&platform.bounds) {
                continue;
            }
            if dx > 0.0 {
                self.position.x = platform.bounds.min.x - half_width;
                state.right = true;
            } else {
                self.position.x = platform.bounds.max.x + half_width;
                state.left = true;
            }
        }
    }

    fn resolve_vertical(&mut self, dy: f32, ignore_one_way: bool, state: &mut CollisionState) {
        if dy == 0.0 {
            return;
        }
        let previous_bottom = self.position.y;
        let previous_top = previous_bottom + self.config.height;
        self.position.y += dy;

        let height = self.config.height;
        let world = Arc::clone(&self.world);
        for platform in &world.platforms {
            if !self.bounds().intersects(&platform.bounds) {
                continue;
            }
            match platform.kind {
                // Overlaps entered from the side were settled by the horizontal pass
                PlatformKind::Solid if dy < 0.0 => {
                    if previous_bottom >= platform.top() - CONTACT_TOLERANCE {
                        self.position.y = platform.top();
                        state.below = true;
                    }
                }
                PlatformKind::Solid => {
                    if previous_top <= platform.bounds.min.y + CONTACT_TOLERANCE {
                        self.position.y = platform.bounds.min.y - height;
                        state.above = true;
                    }
                }
                PlatformKind::OneWay => {
                    let landing = dy < 0.0
                        && !ignore_one_way
                        && previous_bottom >= platform.top() - CONTACT_TOLERANCE;
                    if landing {
                        self.position.y = platform.top();
                        state.below = true;
                    }
                }
            }
        }
    }
}

impl MotionController for CharacterController {
    fn is_grounded(&self) -> bool {
        self.collision_state.below
    }

    fn ceiling_contact(&self) -> bool {
        self.collision_state.above
    }

    fn ignore_one_way_platforms_next_move(&mut self) {
        self.ignore_one_way_platforms = true;
    }

    fn move_by(&mut self, delta: Vec2) {
        let ignore_one_way = std::mem::take(&mut self.ignore_one_way_platforms);
        let mut state = CollisionState::default();

        self.resolve_horizontal(delta.x, &mut state);
        self.resolve_vertical(delta.y, ignore_one_way, &mut state);

        if state.below && !self.collision_state.below {
            trace!(x = self.position.x, y = self.position.y, "Landed");
        }
        self.collision_state = state;
    }

    fn position(&self) -> Vec2 {
        self.position
    }
}
