//! Entity spawner and recycler
//!
//! Keeps the endless-world illusion alive: a fixed burst at session start,
//! per-category interval timers that each roll a weighted table, and a
//! recycle pass that removes anything crossing the behind-camera plane.
//! Recycled plain clouds are replaced immediately to hold density; the
//! other categories wait for their timers.

use glam::Vec3;
use rand::Rng;

use super::state::{Bolt, Category, Cloud, GameState, Hoop, Jet, Smog, Thunder};
use crate::consts::TICK_HZ;
use crate::tuning::{SpawnTuning, Tuning};

/// Countdown timers, one per spawn track
#[derive(Debug, Clone, Copy)]
pub struct SpawnTimers {
    cloud: u32,
    smog: u32,
    thunder: u32,
}

fn interval_ticks(ms: u32) -> u32 {
    ((ms as f32 / 1000.0) * TICK_HZ).round().max(1.0) as u32
}

impl SpawnTimers {
    pub fn new(spawn: &SpawnTuning) -> Self {
        Self {
            cloud: interval_ticks(spawn.cloud_interval_ms),
            smog: interval_ticks(spawn.smog_interval_ms),
            thunder: interval_ticks(spawn.thunder_interval_ms),
        }
    }
}

/// Where a new entity lands on the travel axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Session start: anywhere in the visible corridor
    Initial,
    /// Mid-session: far ahead of the player
    Ahead,
}

/// Fixed-count burst at session start
pub fn initial_burst(state: &mut GameState, tuning: &Tuning) {
    for _ in 0..tuning.spawn.initial_count {
        let category = tuning.spawn.initial_table.pick(&mut state.rng);
        spawn_entity(state, tuning, category, Placement::Initial);
    }
}

/// One tick of spawner work: fire due timers, advance the stream, recycle.
/// Only called while the world is active.
pub fn advance(state: &mut GameState, tuning: &Tuning, dt: f32) {
    fire_timers(state, tuning);

    let step = tuning.world.travel_speed * state.speed * dt;
    for cloud in &mut state.pools.clouds {
        cloud.pos.z += step;
    }
    for hoop in &mut state.pools.hoops {
        hoop.pos.z += step;
    }
    for jet in &mut state.pools.jets {
        jet.pos.z += step;
    }
    for smog in &mut state.pools.smog {
        smog.pos.z += step;
    }
    for thunder in &mut state.pools.thunder {
        thunder.pos.z += step;
    }

    recycle(state, tuning);
}

fn fire_timers(state: &mut GameState, tuning: &Tuning) {
    let spawn = &tuning.spawn;

    state.timers.cloud -= 1;
    if state.timers.cloud == 0 {
        state.timers.cloud = interval_ticks(spawn.cloud_interval_ms);
        let category = spawn.cloud_table.pick(&mut state.rng);
        spawn_entity(state, tuning, category, Placement::Ahead);
    }

    state.timers.smog -= 1;
    if state.timers.smog == 0 {
        state.timers.smog = interval_ticks(spawn.smog_interval_ms);
        let category = spawn.smog_table.pick(&mut state.rng);
        spawn_entity(state, tuning, category, Placement::Ahead);
    }

    state.timers.thunder -= 1;
    if state.timers.thunder == 0 {
        state.timers.thunder = interval_ticks(spawn.thunder_interval_ms);
        let category = spawn.thunder_table.pick(&mut state.rng);
        spawn_entity(state, tuning, category, Placement::Ahead);
    }
}

/// Drop everything past the behind-camera plane. Plain clouds spawn an
/// immediate replacement ahead; other categories rely on their timers.
fn recycle(state: &mut GameState, tuning: &Tuning) {
    let threshold = tuning.world.recycle_depth;

    let before = state.pools.clouds.len();
    state.pools.clouds.retain(|c| c.pos.z <= threshold);
    let recycled_clouds = before - state.pools.clouds.len();

    state.pools.hoops.retain(|h| h.pos.z <= threshold);
    state.pools.jets.retain(|j| j.pos.z <= threshold);
    state.pools.smog.retain(|s| s.pos.z <= threshold);
    state.pools.thunder.retain(|t| t.pos.z <= threshold);

    if tuning.spawn.replace_cloud_on_recycle {
        for _ in 0..recycled_clouds {
            let category = tuning.spawn.recycle_table.pick(&mut state.rng);
            spawn_entity(state, tuning, category, Placement::Ahead);
        }
    }
}

fn spawn_entity(state: &mut GameState, tuning: &Tuning, category: Category, placement: Placement) {
    // Jet spawns degrade to a plain cloud until the model is reported
    // loaded; a failed load keeps the degradation for the session.
    let category = if category == Category::Jet && state.jet_model_ready != Some(true) {
        log::debug!("jet model unavailable, spawning cloud instead");
        Category::Cloud
    } else {
        category
    };

    let world = &tuning.world;
    let x = state.rng.random_range(-world.lane_half_width..world.lane_half_width);
    let z = match placement {
        Placement::Initial => state.rng.random_range(-world.spawn_depth_max..world.recycle_depth),
        Placement::Ahead => -state.rng.random_range(world.spawn_depth_min..world.spawn_depth_max),
    };
    // Smog and thunder target the player's altitude to guarantee encounters
    let targeted_y = state.player.pos.y
        + state
            .rng
            .random_range(-world.altitude_jitter..world.altitude_jitter);
    let band_y = state.rng.random_range(world.band_min..world.band_max);

    let id = state.next_entity_id();
    match category {
        Category::Cloud => {
            let scale = state.rng.random_range(1.0..3.0);
            state.pools.clouds.push(Cloud {
                id,
                pos: Vec3::new(x, band_y, z),
                scale,
            });
        }
        Category::Hoop => {
            state.pools.hoops.push(Hoop {
                id,
                pos: Vec3::new(x, band_y, z),
                scale: 1.0,
                collected: false,
            });
        }
        Category::Jet => {
            let scale = state.rng.random_range(1.0..4.0);
            state.pools.jets.push(Jet {
                id,
                pos: Vec3::new(x, band_y, z),
                scale,
                hit_by_bird: false,
            });
        }
        Category::Smog => {
            let scale = state.rng.random_range(1.5..3.0);
            state.pools.smog.push(Smog {
                id,
                pos: Vec3::new(x, targeted_y, z),
                scale,
            });
        }
        Category::Thunder => {
            let scale = state.rng.random_range(1.0..2.0);
            let bolt = state
                .rng
                .random_bool(f64::from(tuning.spawn.bolt_chance))
                .then(|| Bolt {
                    offset: Vec3::new(state.rng.random_range(-3.0..3.0), -12.0, 0.0),
                });
            state.pools.thunder.push(Thunder {
                id,
                pos: Vec3::new(x, targeted_y, z),
                scale,
                bolt,
                hit_by_bird: false,
                bolt_hit: false,
            });
        }
    }
}
