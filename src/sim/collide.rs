//! Collision and proximity evaluation
//!
//! Once per tick, the player position is measured against every live
//! entity. Category radii decide what fires: hoops collect, jets and
//! thunderclouds hit, smog and jet proximity bands produce scaled soft
//! effects. Hits are one-shot via per-entity flags; harmful checks are
//! skipped entirely while the invincibility window is open. Evaluation
//! order is hoops first, then harmful categories.

use super::state::GameState;
use crate::tuning::Tuning;

/// Discrete evaluator output, consumed by the effect dispatcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    HoopCollected { id: u32 },
    JetStruck { id: u32 },
    ThunderStruck { id: u32, by_bolt: bool },
    /// Jet inside the interference band; intensity grows as it closes in
    JetNearby { intensity: f32 },
    /// Smog inside the warning band; intensity grows as it closes in
    SmogNearby { intensity: f32 },
    /// Thundercloud inside the warning radius (first occurrence only)
    ThunderNearby { id: u32 },
}

/// Scan the pool against the player. Flags are set here so an entity can
/// never fire twice; consequences (score, lives, removal) belong to the
/// dispatcher.
pub fn evaluate(state: &mut GameState, tuning: &Tuning) -> Vec<GameEvent> {
    // No device, no game: matches the original's connection gating
    if !state.connected {
        return Vec::new();
    }

    let mut events = Vec::new();
    let player = state.player.pos;
    let radii = &tuning.radii;
    let harmful_enabled = !state.is_invincible();

    // Hoop collection first
    for hoop in &mut state.pools.hoops {
        if hoop.collected {
            continue;
        }
        if player.distance(hoop.pos) < radii.hoop_collect {
            hoop.collected = true;
            events.push(GameEvent::HoopCollected { id: hoop.id });
        }
    }

    // Jets: contact hit plus interference band
    let mut closest_jet = f32::INFINITY;
    for jet in &mut state.pools.jets {
        let distance = player.distance(jet.pos);
        closest_jet = closest_jet.min(distance);
        if harmful_enabled && !jet.hit_by_bird && distance < radii.jet_hit {
            jet.hit_by_bird = true;
            events.push(GameEvent::JetStruck { id: jet.id });
        }
    }
    if closest_jet > radii.jet_warn_floor && closest_jet < radii.jet_warn {
        let ratio = (radii.jet_warn - closest_jet) / (radii.jet_warn - radii.jet_warn_floor);
        events.push(GameEvent::JetNearby {
            intensity: ratio * radii.jet_shake_max,
        });
    }

    // Thunderclouds: body and bolt are independent hit spheres
    for thunder in &mut state.pools.thunder {
        let body_distance = player.distance(thunder.pos);

        if harmful_enabled && !thunder.hit_by_bird && body_distance < radii.thunder_body * thunder.scale
        {
            thunder.hit_by_bird = true;
            events.push(GameEvent::ThunderStruck {
                id: thunder.id,
                by_bolt: false,
            });
            continue;
        }

        if harmful_enabled && !thunder.bolt_hit {
            if let Some(bolt_pos) = thunder.bolt_world_pos() {
                if player.distance(bolt_pos) < radii.thunder_bolt * thunder.scale {
                    thunder.bolt_hit = true;
                    events.push(GameEvent::ThunderStruck {
                        id: thunder.id,
                        by_bolt: true,
                    });
                    continue;
                }
            }
        }

        // One-time warning band, wider than either hit sphere
        if !state.warned.lightning && body_distance < radii.thunder_warn * thunder.scale {
            events.push(GameEvent::ThunderNearby { id: thunder.id });
        }
    }

    // Smog: proximity band only, never a hit
    let mut closest_smog_ratio: Option<f32> = None;
    for smog in &state.pools.smog {
        let warn = radii.smog_warn * smog.scale;
        let distance = player.distance(smog.pos);
        if distance < warn {
            let ratio = (warn - distance) / warn;
            closest_smog_ratio = Some(closest_smog_ratio.map_or(ratio, |r: f32| r.max(ratio)));
        }
    }
    if let Some(ratio) = closest_smog_ratio {
        events.push(GameEvent::SmogNearby {
            intensity: ratio * radii.smog_distort_max,
        });
    }

    events
}
