//! Attack hitboxes owned by an entity and mirrored with its facing

use glam::Vec2;
use skylark_core::EntityId;
use skylark_physics::Aabb;

#[derive(Debug, Clone)]
pub struct Hitbox {
    owner: EntityId,
    /// Offset from the owner's feet when facing right
    offset: Vec2,
    half_extents: Vec2,
    facing_left: bool,
}

impl Hitbox {
    pub fn new(owner: EntityId, offset: Vec2, half_extents: Vec2) -> Self {
        Self {
            owner,
            offset: Vec2::new(offset.x.abs(), offset.y),
            half_extents,
            facing_left: false,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn set_owner(&mut self, owner: EntityId) {
        self.owner = owner;
    }

    pub fn set_facing(&mut self, facing_left: bool) {
        self.facing_left = facing_left;
    }

    /// Offset after mirroring for the current facing
    pub fn local_offset(&self) -> Vec2 {
        if self.facing_left {
            Vec2::new(-self.offset.x, self.offset.y)
        } else {
            self.offset
        }
    }

    /// Bounds in world space for an owner standing at `position`
    pub fn world_bounds(&self, position: Vec2) -> Aabb {
        Aabb::from_center(position + self.local_offset(), self.half_extents)
    }
}
