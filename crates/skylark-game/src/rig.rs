//! Schedulable player: input handler and controller wired together

use skylark_core::{Behaviour, TickContext};
use skylark_physics::MotionController;
use tracing::debug;

use crate::animation::Animator;
use crate::input::{InputState, PlayerInputHandler};
use crate::player::{PlayerController, PlayerEvent};

/// Player behaviour run by a [`skylark_core::Scheduler`]
pub struct PlayerRig<M, A> {
    input: PlayerInputHandler,
    controller: PlayerController<M, A>,
    events: Vec<PlayerEvent>,
}

impl<M: MotionController, A: Animator> PlayerRig<M, A> {
    /// Pair an input handler with the controller it drives
    pub fn new(input: PlayerInputHandler, controller: PlayerController<M, A>) -> Self {
        Self {
            input,
            controller,
            events: Vec::new(),
        }
    }

    /// Push one frame of action state into the input handler
    pub fn feed(&mut self, state: &InputState) {
        self.input.feed(state);
    }

    /// Get the input handler
    pub fn input(&self) -> &PlayerInputHandler {
        &self.input
    }

    /// Get the player controller
    pub fn controller(&self) -> &PlayerController<M, A> {
        &self.controller
    }

    /// Get the player controller mutably
    pub fn controller_mut(&mut self) -> &mut PlayerController<M, A> {
        &mut self.controller
    }

    /// Take the player events gathered since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<M: MotionController, A: Animator> Behaviour for PlayerRig<M, A> {
    fn initialize(&mut self) {
        self.controller.initialize();
    }

    fn on_activate(&mut self) {
        self.controller.on_activate(&mut self.input);
    }

    fn on_deactivate(&mut self) {
        self.controller.on_deactivate(&mut self.input);
    }

    fn tick_logic(&mut self, ctx: &mut TickContext<'_>) {
        let dt = ctx.dt();
        self.controller.tick_logic(&mut self.input, dt);
        // Expire the buffer after the controller had its chance to consume it
        self.input.advance(dt);

        if let Some(duration) = self.controller.take_hitstun_request() {
            ctx.request_hitstun(duration);
        }
        let events = self.controller.drain_events();
        if !events.is_empty() {
            debug!(count = events.len(), frame = ctx.frame_count(), "Player events");
            self.events.extend(events);
        }
    }

    fn tick_physics(&mut self, ctx: &mut TickContext<'_>) {
        self.controller.tick_physics(&mut self.input, ctx.dt());
    }
}
