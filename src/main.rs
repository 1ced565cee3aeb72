//! Skylark - 2D platformer player controller
//!
//! Headless entry point: loads settings and player tunables, then runs the
//! player through a scripted level and logs what it does.

mod demo;
mod settings;

use anyhow::{Context, Result};
use glam::Vec2;
use skylark_core::{GameTime, Scheduler};
use skylark_game::{
    InputBindings, LogAnimator, PlayerController, PlayerDataAsset, PlayerDataStore, PlayerEvent,
    PlayerInputHandler, PlayerRig, TunablesSession,
};
use skylark_physics::CharacterController;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use demo::{ScriptedKeys, SCRIPT, SPAWN};
use settings::EngineSettings;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Skylark...");

    let settings = EngineSettings::load();
    if !EngineSettings::exists() {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {}", e);
        }
    }

    let asset = PlayerDataAsset::default();
    let store = PlayerDataStore::new().context("Failed to locate player tunables")?;
    let session = TunablesSession::begin(store, asset.clone())
        .context("Failed to load player tunables")?;
    info!(
        path = %session.store().path().display(),
        outcome = ?session.outcome(),
        "Player tunables ready"
    );

    let mut body = CharacterController::new(demo::build_level());
    body.set_position(SPAWN);

    let mut controller = PlayerController::new(asset, body, LogAnimator);
    controller.add_hitbox(Vec2::new(0.9, 0.8), Vec2::new(0.5, 0.4));
    let input = PlayerInputHandler::new(settings.input.buffer_time);

    let mut scheduler = Scheduler::new(
        GameTime::new(settings.time.clone()),
        PlayerRig::new(input, controller),
    );
    scheduler.start();

    let mut keys = ScriptedKeys::new(SCRIPT, InputBindings::new());
    let frame_delta = settings.demo.frame_delta();
    let frames = settings.demo.frame_count();
    let mut physics_steps = 0;

    for frame in 0..frames {
        let state = keys.advance(frame_delta);
        scheduler.behaviour_mut().feed(state);

        let stats = scheduler.run_frame(frame_delta);
        physics_steps += stats.fixed_steps;

        for event in scheduler.behaviour_mut().drain_events() {
            match event {
                PlayerEvent::Jumped | PlayerEvent::Attacked => info!(frame, ?event, "Player"),
                PlayerEvent::Damaged { remaining } => info!(frame, remaining, "Player hurt"),
                PlayerEvent::Died => warn!(frame, "Player died"),
            }
        }

        let interval = settings.demo.stats_interval;
        if interval > 0 && frame % interval == 0 {
            let controller = scheduler.behaviour().controller();
            let position = controller.position();
            info!(
                frame,
                x = position.x,
                y = position.y,
                "{}",
                controller.debug_stats()
            );
        }
    }

    let rig = scheduler.into_inner();
    let position = rig.controller().position();
    info!(
        frames,
        physics_steps,
        x = position.x,
        y = position.y,
        script_done = keys.finished(),
        "Run complete"
    );

    if settings.demo.save_tunables {
        session.save_current().context("Failed to save player tunables")?;
    }
    session.finish();

    info!("Skylark shutdown complete");
    Ok(())
}
