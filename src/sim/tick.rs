//! Fixed timestep simulation tick
//!
//! Per-tick order: drained commands apply first, then the notice countdown,
//! then visual-effect decay (which runs even while paused, rendering never
//! stops), and only while the world is active: spawner, gravity, collision
//! evaluation and effect dispatch.

use glam::Vec3;
use rand::Rng;

use super::collide;
use super::effects;
use super::fx::DistortionFrame;
use super::spawn;
use super::state::{GamePhase, GameState};
use crate::input::Command;
use crate::presentation::Presentation;
use crate::tuning::Tuning;

/// Render parameters produced by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Offset to add to the camera's base position
    pub camera_offset: Vec3,
    /// Scene tint and ambient dimming for this frame
    pub distortion: DistortionFrame,
}

/// Advance the simulation by one fixed timestep
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    commands: &[Command],
    presentation: &mut dyn Presentation,
    dt: f32,
) -> FrameOutput {
    for command in commands {
        apply_command(state, tuning, *command, presentation);
    }

    state.time_ticks += 1;

    // Notice countdown runs on wall ticks and auto-resumes the world
    if let GamePhase::Notice { kind, ticks_left } = state.phase {
        let ticks_left = ticks_left.saturating_sub(1);
        if ticks_left == 0 {
            state.phase = GamePhase::Flying;
            presentation.resume();
        } else {
            state.phase = GamePhase::Notice { kind, ticks_left };
        }
    }

    // Visual effects decay every tick; active distortion occasionally adds
    // a subtle disorientation shake
    if state.distortion.is_active() && state.rng.random_bool(0.1) {
        let subtle = state.distortion.intensity * 0.5;
        state.shake.start(subtle, 0.1);
    }
    let camera_offset = state
        .shake
        .update(dt, tuning.effects.shake_decay, &mut state.rng);
    let distortion = state.distortion.update(dt, &tuning.effects);
    let output = FrameOutput {
        camera_offset,
        distortion,
    };

    if !state.world_active() {
        return output;
    }

    if state.invincible_ticks > 0 {
        state.invincible_ticks -= 1;
    }

    spawn::advance(state, tuning, dt);
    state
        .player
        .integrate_gravity(&tuning.flight, state.speed, dt);

    let events = collide::evaluate(state, tuning);
    effects::dispatch(state, tuning, &events, presentation);

    output
}

fn apply_command(
    state: &mut GameState,
    tuning: &Tuning,
    command: Command,
    presentation: &mut dyn Presentation,
) {
    match command {
        Command::Connect => {
            state.connected = true;
            log::info!("input device connected");
        }
        Command::Disconnect => {
            state.connected = false;
            log::info!("input device disconnected");
        }
        Command::UnlockAudio => {
            if !state.audio_unlocked {
                state.audio_unlocked = true;
                log::debug!("audio unlocked");
            }
        }
        Command::JetModelReady => {
            state.jet_model_ready = Some(true);
            log::info!("jet model loaded");
        }
        Command::JetModelFailed => {
            state.jet_model_ready = Some(false);
            log::warn!("jet model failed to load; jet spawns degrade to clouds");
        }
        Command::TogglePause => match state.phase {
            GamePhase::Flying => {
                state.phase = GamePhase::Paused;
                presentation.pause();
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Flying;
                presentation.resume();
            }
            // Notices dismiss themselves; Game Over is terminal
            _ => {}
        },
        // Flight and speed commands need an active world and a connected device
        Command::SetAttitude { roll, pitch } => {
            if state.connected && state.world_active() {
                state
                    .player
                    .apply_attitude(roll, pitch, &tuning.flight, &tuning.world);
            }
        }
        Command::AdjustHeight(direction) => {
            if state.connected && state.world_active() {
                state.player.adjust_height(direction, &tuning.flight);
            }
        }
        Command::SpeedUp => adjust_speed(state, tuning, tuning.speed.step),
        Command::SpeedDown => adjust_speed(state, tuning, -tuning.speed.step),
        Command::SpeedNormal => {
            if state.connected && state.world_active() {
                state.speed = 1.0;
                log::info!("game speed reset to 1.0x");
            }
        }
    }
}

fn adjust_speed(state: &mut GameState, tuning: &Tuning, delta: f32) {
    if !state.connected || !state.world_active() {
        return;
    }
    state.speed = (state.speed + delta).clamp(tuning.speed.min, tuning.speed.max);
    log::info!("game speed {:.2}x", state.speed);
}
