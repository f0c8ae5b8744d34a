//! Data-driven game balance
//!
//! Every constant that varied across gameplay builds (spawn tables, collision
//! radii, speeds) lives here as configuration. Loaded best-effort from a JSON
//! file; missing or malformed files fall back to defaults with a logged warning.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::state::Category;

/// World geometry and motion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Half-width of the spawn lane on the horizontal axis
    pub lane_half_width: f32,
    /// Horizontal clamp applied to the player position
    pub max_horizontal: f32,
    /// Entities past this depth are behind the camera and get recycled
    pub recycle_depth: f32,
    /// Replacement spawns land this far ahead of the player (min..max)
    pub spawn_depth_min: f32,
    pub spawn_depth_max: f32,
    /// Vertical band for clouds/hoops/jets (min..max)
    pub band_min: f32,
    pub band_max: f32,
    /// Altitude jitter for player-targeted spawns (smog, thunder)
    pub altitude_jitter: f32,
    /// Entity travel speed toward the camera, units per second at speed 1.0
    pub travel_speed: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            lane_half_width: 200.0,
            max_horizontal: 100.0,
            recycle_depth: 50.0,
            spawn_depth_min: 400.0,
            spawn_depth_max: 600.0,
            band_min: -20.0,
            band_max: 60.0,
            altitude_jitter: 10.0,
            travel_speed: 30.0,
        }
    }
}

/// Flight model: height steps and the gravity integrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub min_height: f32,
    pub max_height: f32,
    /// Instant rise per height-adjust command
    pub height_step: f32,
    /// Sink rate toward `min_height`, units per second at speed 1.0
    pub gravity_rate: f32,
    /// Attitude-to-position sensitivities
    pub roll_sensitivity: f32,
    pub pitch_sensitivity: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            min_height: -25.0,
            max_height: 50.0,
            height_step: 10.0,
            gravity_rate: 12.0,
            roll_sensitivity: 2.0,
            pitch_sensitivity: 2.0,
        }
    }
}

/// Game-speed bounds and the voice-command step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTuning {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 3.0,
            step: 0.25,
        }
    }
}

/// Category weights for one spawn roll. Zero-weight entries never win;
/// a roll over an all-zero table degrades to a plain cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTable {
    pub cloud: f32,
    pub hoop: f32,
    pub jet: f32,
    pub smog: f32,
    pub thunder: f32,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            cloud: 1.0,
            hoop: 0.0,
            jet: 0.0,
            smog: 0.0,
            thunder: 0.0,
        }
    }
}

impl SpawnTable {
    /// Weighted random category pick; plain cloud is the fallback
    pub fn pick(&self, rng: &mut impl Rng) -> Category {
        let entries = [
            (Category::Cloud, self.cloud),
            (Category::Hoop, self.hoop),
            (Category::Jet, self.jet),
            (Category::Smog, self.smog),
            (Category::Thunder, self.thunder),
        ];
        let total: f32 = entries.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return Category::Cloud;
        }
        let mut roll = rng.random_range(0.0..total);
        for (category, weight) in entries {
            let weight = weight.max(0.0);
            if roll < weight {
                return category;
            }
            roll -= weight;
        }
        Category::Cloud
    }
}

/// Spawner timers, burst sizes and per-timer weight tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Entities created up-front at session start
    pub initial_count: u32,
    /// Weights used for the initial burst
    pub initial_table: SpawnTable,
    /// Weights used when a recycled cloud is immediately replaced
    pub recycle_table: SpawnTable,
    /// Per-category timers, in milliseconds, and the table each fire rolls on
    pub cloud_interval_ms: u32,
    pub cloud_table: SpawnTable,
    pub smog_interval_ms: u32,
    pub smog_table: SpawnTable,
    pub thunder_interval_ms: u32,
    pub thunder_table: SpawnTable,
    /// Whether a recycled entity of each kind triggers an immediate replacement
    pub replace_cloud_on_recycle: bool,
    /// Chance a thundercloud carries a lightning bolt child
    pub bolt_chance: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_count: 10,
            initial_table: SpawnTable {
                cloud: 0.9,
                jet: 0.1,
                ..SpawnTable::default()
            },
            recycle_table: SpawnTable {
                cloud: 0.99,
                jet: 0.01,
                ..SpawnTable::default()
            },
            cloud_interval_ms: 1200,
            cloud_table: SpawnTable {
                cloud: 0.7,
                hoop: 0.2,
                jet: 0.1,
                ..SpawnTable::default()
            },
            smog_interval_ms: 2600,
            smog_table: SpawnTable {
                cloud: 0.2,
                smog: 0.8,
                ..SpawnTable::default()
            },
            thunder_interval_ms: 4200,
            thunder_table: SpawnTable {
                cloud: 0.25,
                thunder: 0.75,
                ..SpawnTable::default()
            },
            replace_cloud_on_recycle: true,
            bolt_chance: 0.6,
        }
    }
}

/// Collision and proximity radii. Thunder radii scale with the entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusTuning {
    pub hoop_collect: f32,
    pub jet_hit: f32,
    /// Proximity band for jet interference: shake scales from zero at
    /// `jet_warn` down to full strength at `jet_warn_floor`
    pub jet_warn: f32,
    pub jet_warn_floor: f32,
    /// Shake strength at the inner edge of the jet band
    pub jet_shake_max: f32,
    pub thunder_body: f32,
    pub thunder_bolt: f32,
    pub thunder_warn: f32,
    pub smog_warn: f32,
    /// Distortion strength when fully inside the smog band
    pub smog_distort_max: f32,
}

impl Default for RadiusTuning {
    fn default() -> Self {
        Self {
            hoop_collect: 50.0,
            jet_hit: 25.0,
            jet_warn: 100.0,
            jet_warn_floor: 20.0,
            jet_shake_max: 2.0,
            thunder_body: 18.0,
            thunder_bolt: 8.0,
            thunder_warn: 25.0,
            smog_warn: 45.0,
            smog_distort_max: 2.0,
        }
    }
}

/// Lives, windows and visual-effect decay rates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub starting_lives: u8,
    /// Harmful triggers are suppressed for this long after a life loss
    pub invincibility_secs: f32,
    /// How long an educational notice pauses the game
    pub notice_secs: f32,
    pub lightning_notice_secs: f32,
    /// Per-tick multiplicative decay of shake intensity
    pub shake_decay: f32,
    /// Per-tick multiplicative decay of distortion intensity
    pub distortion_decay: f32,
    /// Cap on how far the scene tints toward the polluted color (0..1)
    pub max_tint: f32,
    /// Maximum fraction of ambient light removed by distortion (0..1)
    pub max_ambient_drop: f32,
    /// Shake fired on a lightning strike
    pub strike_shake_intensity: f32,
    pub strike_shake_secs: f32,
    /// Shake fired on losing a life to a jet
    pub hit_shake_intensity: f32,
    pub hit_shake_secs: f32,
    /// Jet drone cue only plays above this interference intensity
    pub drone_threshold: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            invincibility_secs: 1.2,
            notice_secs: 3.0,
            lightning_notice_secs: 3.5,
            shake_decay: 0.95,
            distortion_decay: 0.98,
            max_tint: 0.6,
            max_ambient_drop: 0.5,
            strike_shake_intensity: 2.5,
            strike_shake_secs: 0.6,
            hit_shake_intensity: 2.0,
            hit_shake_secs: 0.3,
            drone_threshold: 0.5,
        }
    }
}

/// Complete balance document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub flight: FlightTuning,
    pub speed: SpeedTuning,
    pub spawn: SpawnTuning,
    pub radii: RadiusTuning,
    pub effects: EffectTuning,
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No tuning file at {} ({e}); using defaults", path.display());
                Self::default()
            }
        }
    }
}
