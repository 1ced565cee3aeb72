//! Behaviour lifecycle and the frame scheduler that drives it
//!
//! A behaviour is set up once, then receives two per-frame callbacks at
//! different rates: `tick_physics` once per fixed step and `tick_logic` once
//! per rendered frame.

use tracing::{debug, trace};

use crate::time::GameTime;

/// Per-tick view of the clock handed to a behaviour
pub struct TickContext<'a> {
    dt: f32,
    time: &'a mut GameTime,
}

impl<'a> TickContext<'a> {
    pub fn new(dt: f32, time: &'a mut GameTime) -> Self {
        Self { dt, time }
    }

    /// Seconds covered by this tick
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn frame_count(&self) -> u64 {
        self.time.frame_count
    }

    /// Ask the clock to freeze scaled time for `duration` real seconds
    pub fn request_hitstun(&mut self, duration: f32) {
        debug!(duration, "Hitstun requested");
        self.time.hitstun(duration);
    }
}

/// Something the scheduler can run
pub trait Behaviour {
    /// One-time setup, before the first activation
    fn initialize(&mut self) {}

    /// Called every time the behaviour becomes active
    fn on_activate(&mut self) {}

    /// Called every time the behaviour stops being active
    fn on_deactivate(&mut self) {}

    /// Variable-rate update, once per frame
    fn tick_logic(&mut self, ctx: &mut TickContext<'_>);

    /// Fixed-rate update, once per accumulated fixed step
    fn tick_physics(&mut self, ctx: &mut TickContext<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Active,
    Inactive,
}

/// What a single frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Fixed steps run this frame
    pub fixed_steps: u32,
    /// Scaled delta handed to `tick_logic`
    pub delta_time: f32,
}

/// Owns a behaviour and the clock, and runs frames against it
pub struct Scheduler<B: Behaviour> {
    time: GameTime,
    behaviour: B,
    lifecycle: Lifecycle,
}

impl<B: Behaviour> Scheduler<B> {
    pub fn new(time: GameTime, behaviour: B) -> Self {
        Self {
            time,
            behaviour,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Initialize on first call, then activate.
    pub fn start(&mut self) {
        match self.lifecycle {
            Lifecycle::Active => return,
            Lifecycle::Created => {
                debug!("Initializing behaviour");
                self.behaviour.initialize();
            }
            Lifecycle::Inactive => {}
        }
        self.behaviour.on_activate();
        self.lifecycle = Lifecycle::Active;
    }

    /// Deactivate; a later `start` reactivates without re-initializing.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Active {
            self.behaviour.on_deactivate();
            self.lifecycle = Lifecycle::Inactive;
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// Advance the clock by `raw_delta` and run the fixed steps, then the logic tick.
    ///
    /// An inactive behaviour is not ticked, but the clock still advances.
    pub fn run_frame(&mut self, raw_delta: f32) -> FrameStats {
        self.time.update(raw_delta);
        let steps = self.time.fixed_steps();
        let delta_time = self.time.delta_time;

        if !self.is_active() {
            return FrameStats {
                fixed_steps: 0,
                delta_time,
            };
        }

        let fixed_dt = self.time.config.fixed_timestep;
        for _ in 0..steps {
            let mut ctx = TickContext::new(fixed_dt, &mut self.time);
            self.behaviour.tick_physics(&mut ctx);
        }

        let mut ctx = TickContext::new(delta_time, &mut self.time);
        self.behaviour.tick_logic(&mut ctx);

        trace!(steps, delta_time, "Frame complete");
        FrameStats {
            fixed_steps: steps,
            delta_time,
        }
    }

    pub fn time(&self) -> &GameTime {
        &self.time
    }

    pub fn time_mut(&mut self) -> &mut GameTime {
        &mut self.time
    }

    pub fn behaviour(&self) -> &B {
        &self.behaviour
    }

    pub fn behaviour_mut(&mut self) -> &mut B {
        &mut self.behaviour
    }

    /// Stop the behaviour and hand it back
    pub fn into_inner(mut self) -> B {
        self.stop();
        self.behaviour
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeConfig;

    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        physics_dt: Vec<f32>,
    }

    impl Behaviour for Recorder {
        fn initialize(&mut self) {
            self.log.push("init");
        }

        fn on_activate(&mut self) {
            self.log.push("activate");
        }

        fn on_deactivate(&mut self) {
            self.log.push("deactivate");
        }

        fn tick_logic(&mut self, _ctx: &mut TickContext<'_>) {
            self.log.push("logic");
        }

        fn tick_physics(&mut self, ctx: &mut TickContext<'_>) {
            self.log.push("physics");
            self.physics_dt.push(ctx.dt());
        }
    }

    fn time() -> GameTime {
        GameTime::new(TimeConfig {
            time_scale: 1.0,
            fixed_timestep: 0.02,
            max_delta_time: 0.25,
        })
    }

    #[test]
    fn test_initializes_once() {
        let mut scheduler = Scheduler::new(time(), Recorder::default());
        scheduler.start();
        scheduler.stop();
        scheduler.start();

        assert_eq!(
            scheduler.behaviour().log,
            vec!["init", "activate", "deactivate", "activate"]
        );
    }

    #[test]
    fn test_physics_runs_before_logic() {
        let mut scheduler = Scheduler::new(time(), Recorder::default());
        scheduler.start();
        scheduler.behaviour_mut().log.clear();

        let stats = scheduler.run_frame(0.045);

        assert_eq!(stats.fixed_steps, 2);
        assert_eq!(scheduler.behaviour().log, vec!["physics", "physics", "logic"]);
        assert!(scheduler.behaviour().physics_dt.iter().all(|dt| *dt == 0.02));
    }

    #[test]
    fn test_inactive_behaviour_is_not_ticked() {
        let mut scheduler = Scheduler::new(time(), Recorder::default());
        let stats = scheduler.run_frame(0.1);

        assert_eq!(stats.fixed_steps, 0);
        assert!(scheduler.behaviour().log.is_empty());
    }

    #[test]
    fn test_into_inner_deactivates() {
        let mut scheduler = Scheduler::new(time(), Recorder::default());
        scheduler.start();
        let recorder = scheduler.into_inner();
        assert_eq!(recorder.log.last(), Some(&"deactivate"));
    }
}
