//! Platformer player controller
//!
//! Runs the per-tick movement and jump update: acceleration-based horizontal
//! movement, asymmetric jump/fall gravity, coyote time, buffered jumps and
//! attacks, variable jump height, and dropping through one-way platforms.
//! Collision is delegated to a [`MotionController`].

use std::fmt;

use glam::Vec2;
use skylark_core::{EntityId, SubscriberId};
use skylark_physics::MotionController;
use tracing::{debug, info};

use super::data::{DerivedPhysics, PlayerDataAsset};
use super::health::{DamageOutcome, Health};
use super::hitbox::Hitbox;
use crate::animation::{Animator, AnimatorParameters};
use crate::input::{BufferedInput, InputPhase, InputSignal, PlayerInputHandler};

/// Vertical velocity held while grounded.
///
/// Must stay negative: the motion controller only reports ground contact for a
/// move that pushes into the floor.
pub const GROUNDED_VELOCITY_EPSILON: f32 = -0.002;

/// Gravity multiplier applied on the tick a drop-through starts
pub const DROP_GRAVITY_MULTIPLIER: f32 = 4.0;

/// Real seconds of hitstun when the player dies
pub const DEATH_HITSTUN: f32 = 1.0;

/// Mutable per-tick state of the player
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    pub velocity: Vec2,
    /// Seconds since last grounded
    pub coyote_elapsed: f32,
    /// A jump was executed during the current airborne cycle
    pub has_jumped: bool,
    /// The current jump was cut short
    pub has_canceled_jump: bool,
    /// Use fall gravity even while rising
    pub override_jump_gravity: bool,
    /// Drop through the platform underfoot on the next physics tick
    pub drop_pending: bool,
    pub can_turn: bool,
    pub facing_left: bool,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            coyote_elapsed: 0.0,
            has_jumped: false,
            has_canceled_jump: false,
            override_jump_gravity: false,
            drop_pending: false,
            can_turn: true,
            facing_left: false,
        }
    }
}

/// Gameplay events raised by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Jumped,
    Attacked,
    Damaged { remaining: u32 },
    Died,
}

/// Snapshot for on-screen debugging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugStats {
    pub coyote_time: f32,
    pub has_jumped: bool,
    pub grounded: bool,
    pub can_jump: bool,
    pub canceled_jump: bool,
    pub velocity: Vec2,
}

impl fmt::Display for DebugStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coyote={:.3} jumped={} grounded={} can_jump={} canceled={} velocity=({:.2}, {:.2})",
            self.coyote_time,
            self.has_jumped,
            self.grounded,
            self.can_jump,
            self.canceled_jump,
            self.velocity.x,
            self.velocity.y
        )
    }
}

/// Player controller handling input, movement, combat and animation output
pub struct PlayerController<M, A> {
    id: EntityId,
    data: PlayerDataAsset,
    physics: DerivedPhysics,
    state: KinematicState,
    motion: M,
    animator: A,
    parameters: AnimatorParameters,
    health: Health,
    hitboxes: Vec<Hitbox>,
    attacking: bool,
    /// Attacks may be started
    pub can_attack: bool,
    subscription: Option<SubscriberId>,
    events: Vec<PlayerEvent>,
    hitstun_request: Option<f32>,
}

impl<M: MotionController, A: Animator> PlayerController<M, A> {
    /// Create a controller. Call [`PlayerController::initialize`] before ticking.
    pub fn new(data: PlayerDataAsset, motion: M, animator: A) -> Self {
        let (physics, health) = {
            let values = data.read();
            (
                DerivedPhysics::from_data(&values),
                Health::new(values.base_hit_points, values.damage_invincibility_time),
            )
        };

        Self {
            id: EntityId::new(),
            data,
            physics,
            state: KinematicState::default(),
            motion,
            animator,
            parameters: AnimatorParameters::default(),
            health,
            hitboxes: Vec::new(),
            attacking: false,
            can_attack: true,
            subscription: None,
            events: Vec::new(),
            hitstun_request: None,
        }
    }

    /// Use custom animator parameter names
    pub fn with_parameters(mut self, parameters: AnimatorParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach a hitbox owned by this player
    pub fn add_hitbox(&mut self, offset: Vec2, half_extents: Vec2) {
        self.hitboxes.push(Hitbox::new(self.id, offset, half_extents));
    }

    /// Compute derived physics, reset health and claim hitboxes.
    pub fn initialize(&mut self) {
        self.reinitialize();

        let values = self.data.read();
        self.health = Health::new(values.base_hit_points, values.damage_invincibility_time);
        for hitbox in &mut self.hitboxes {
            hitbox.set_owner(self.id);
        }
        info!(id = %self.id, hp = values.base_hit_points, "Player initialized");
    }

    /// Recompute the derived physics constants from the current tunables
    pub fn reinitialize(&mut self) {
        self.physics = DerivedPhysics::from_data(&self.data.read());
        debug!(physics = ?self.physics, "Derived player physics");
    }

    /// Start listening to the handler's signals
    pub fn on_activate(&mut self, input: &mut PlayerInputHandler) {
        if self.subscription.is_none() {
            self.subscription = Some(input.subscribe());
        }
    }

    /// Stop listening to the handler's signals
    pub fn on_deactivate(&mut self, input: &mut PlayerInputHandler) {
        if let Some(id) = self.subscription.take() {
            input.unsubscribe(id);
        }
    }

    /// Whether the player is subscribed to input signals
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    fn process_signals(&mut self, input: &mut PlayerInputHandler) {
        let Some(id) = self.subscription else {
            return;
        };
        for signal in input.drain_signals(id) {
            match signal {
                InputSignal::JumpCanceled => self.cancel_jump(),
                InputSignal::Drop => self.drop_through_platform(),
            }
        }
    }

    /// Whether a jump may start now (grounded or within coyote time)
    pub fn can_jump(&self) -> bool {
        let coyote_time = self.data.read().coyote_time;
        !self.state.has_jumped
            && (self.motion.is_grounded() || self.state.coyote_elapsed < coyote_time)
    }

    /// Switch to fall gravity for the rest of the ascent
    pub fn cancel_jump(&mut self) {
        self.state.override_jump_gravity = true;
        self.state.has_canceled_jump = true;
    }

    /// Request a drop through the one-way platform underfoot
    pub fn drop_through_platform(&mut self) {
        if self.motion.is_grounded() {
            self.state.drop_pending = true;
        }
    }

    /// Attack animation began
    pub fn start_attack(&mut self) {
        self.attacking = true;
        self.animator.set_bool(&self.parameters.combo, true);
    }

    /// Attack animation finished
    pub fn stop_attack(&mut self) {
        self.attacking = false;
        self.animator.set_bool(&self.parameters.combo, false);
    }

    /// Whether an attack animation is playing
    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Apply damage; death raises [`PlayerEvent::Died`] and requests hitstun.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let outcome = self.health.take_damage(amount);
        match outcome {
            DamageOutcome::Damaged { remaining } => {
                debug!(amount, remaining, "Player damaged");
                self.events.push(PlayerEvent::Damaged { remaining });
            }
            DamageOutcome::Died => {
                info!(id = %self.id, "Player died");
                self.events.push(PlayerEvent::Died);
                self.hitstun_request = Some(DEATH_HITSTUN);
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// Variable-rate update: buffered intents and jump cancellation
    pub fn tick_logic(&mut self, input: &mut PlayerInputHandler, dt: f32) {
        self.process_signals(input);
        self.health.tick(dt);
        if !self.health.is_alive() {
            return;
        }

        match input.buffered() {
            BufferedInput::Jump => {
                // The press stays buffered until a jump is possible
                if !self.can_jump() {
                    return;
                }
                self.state.override_jump_gravity = false;
                input.consume_buffer();
                self.state.velocity.y = self.physics.jump_force;
                self.state.has_jumped = true;
                self.state.has_canceled_jump = input.jump_phase() == InputPhase::Canceled;
                debug!(
                    coyote = self.state.coyote_elapsed,
                    short_hop = self.state.has_canceled_jump,
                    "Jump"
                );
                self.events.push(PlayerEvent::Jumped);
            }
            BufferedInput::Attack => {
                if !self.can_attack {
                    return;
                }
                input.consume_buffer();
                self.animator.set_trigger(&self.parameters.attack);
                debug!("Attack");
                self.events.push(PlayerEvent::Attacked);
            }
            BufferedInput::None => {}
        }

        if input.jump_phase() == InputPhase::Performed {
            self.state.override_jump_gravity = self.state.has_canceled_jump;
        }

        if self.state.has_canceled_jump || input.jump_phase() == InputPhase::Canceled {
            self.cancel_jump();
        }
    }

    /// Fixed-rate update: integrate velocity and move
    pub fn tick_physics(&mut self, input: &mut PlayerInputHandler, dt: f32) {
        self.process_signals(input);
        if !self.health.is_alive() {
            return;
        }

        let raw_axis = input.axis();
        self.handle_movement(raw_axis, dt);
        self.animator.set_float(&self.parameters.speed, raw_axis.x.abs());
    }

    fn handle_movement(&mut self, mut axis: Vec2, dt: f32) {
        let grounded = self.motion.is_grounded();
        let (base_speed, air_modifier) = {
            let values = self.data.read();
            (values.base_speed, values.air_acceleration_modifier)
        };
        let air_scale = if grounded { 1.0 } else { air_modifier };

        // No walking while attacking on the ground
        if self.attacking && grounded {
            axis.x = 0.0;
        }

        let mut vel_x = self.state.velocity.x;
        if axis.x != 0.0 {
            vel_x += axis.x * dt * self.physics.acceleration * air_scale;
            vel_x = vel_x.clamp(-base_speed, base_speed);
        } else {
            let step = self.physics.deceleration * air_scale * dt;
            if vel_x.abs() >= step {
                vel_x -= vel_x.signum() * step;
            } else {
                vel_x = 0.0;
            }
        }

        let mut vel_y = self.state.velocity.y;
        let gravity = if !self.state.override_jump_gravity && vel_y > 0.0 {
            self.physics.jump_gravity
        } else {
            self.physics.fall_gravity
        };
        self.state.coyote_elapsed += dt;

        if self.motion.ceiling_contact() {
            vel_y = 0.0;
        }

        if !grounded {
            vel_y += dt * gravity;
        }

        if vel_y <= 0.0 && grounded {
            vel_y = GROUNDED_VELOCITY_EPSILON;
            self.state.coyote_elapsed = 0.0;
            self.state.override_jump_gravity = false;
            self.state.has_jumped = false;
        }

        if grounded && self.state.drop_pending {
            vel_y += dt * gravity * DROP_GRAVITY_MULTIPLIER;
            self.motion.ignore_one_way_platforms_next_move();
            self.state.drop_pending = false;
            debug!("Dropping through platform");
        }

        vel_y = vel_y.max(self.physics.terminal_velocity());
        self.state.velocity = Vec2::new(vel_x, vel_y);

        // Facing is locked while airborne
        self.state.can_turn = grounded;
        if self.state.can_turn && vel_x != 0.0 {
            let facing_left = vel_x < 0.0;
            if facing_left != self.state.facing_left {
                self.state.facing_left = facing_left;
                self.animator.set_flip_x(facing_left);
            }
        }
        for hitbox in &mut self.hitboxes {
            hitbox.set_facing(self.state.facing_left);
        }

        self.motion.move_by(self.state.velocity * dt);
    }

    /// Take the hitstun requested since the last call
    pub fn take_hitstun_request(&mut self) -> Option<f32> {
        self.hitstun_request.take()
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a snapshot of the jump state for debugging
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            coyote_time: self.state.coyote_elapsed,
            has_jumped: self.state.has_jumped,
            grounded: self.motion.is_grounded(),
            can_jump: self.can_jump(),
            canceled_jump: self.state.has_canceled_jump,
            velocity: self.state.velocity,
        }
    }

    /// Get the player's entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the player's kinematic state
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Get the player's current velocity
    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Get the player's current position
    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    /// Check if the player is on the ground
    pub fn is_grounded(&self) -> bool {
        self.motion.is_grounded()
    }

    /// Get the derived physics constants
    pub fn physics(&self) -> &DerivedPhysics {
        &self.physics
    }

    /// Get the player's tunables
    pub fn data(&self) -> &PlayerDataAsset {
        &self.data
    }

    /// Get the player's health
    pub fn health(&self) -> &Health {
        &self.health
    }

    /// Get the player's hitboxes
    pub fn hitboxes(&self) -> &[Hitbox] {
        &self.hitboxes
    }

    /// Get the motion controller
    pub fn motion(&self) -> &M {
        &self.motion
    }

    /// Get the motion controller mutably
    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    /// Get the animator
    pub fn animator(&self) -> &A {
        &self.animator
    }
}
