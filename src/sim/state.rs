//! Entity pool and core game state
//!
//! Entities live in per-category collections so the per-frame scans never
//! type-test. Each category carries exactly the one-shot flags its
//! collision rules need; an entity never outlives removal from its
//! collection.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::fx::{CameraShake, ScreenDistortion};
use super::player::Player;
use super::spawn::{self, SpawnTimers};
use crate::tuning::Tuning;

/// Spawnable entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Cloud,
    Hoop,
    Jet,
    Smog,
    Thunder,
}

/// Scenery cloud; no gameplay flags, pure stream filler
#[derive(Debug, Clone)]
pub struct Cloud {
    pub id: u32,
    pub pos: Vec3,
    pub scale: f32,
}

/// Score hoop
#[derive(Debug, Clone)]
pub struct Hoop {
    pub id: u32,
    pub pos: Vec3,
    pub scale: f32,
    /// One-shot: set the frame the hoop is flown through, so it can never
    /// score twice even if it survives into the next evaluation pass
    pub collected: bool,
}

/// Background jet; harmful on contact, interferes at range
#[derive(Debug, Clone)]
pub struct Jet {
    pub id: u32,
    pub pos: Vec3,
    pub scale: f32,
    pub hit_by_bird: bool,
}

/// Smog bank; proximity-only, never costs a life
#[derive(Debug, Clone)]
pub struct Smog {
    pub id: u32,
    pub pos: Vec3,
    pub scale: f32,
}

/// Lightning bolt hanging under a thundercloud, with its own hit sphere
#[derive(Debug, Clone)]
pub struct Bolt {
    /// Offset from the parent cloud, in the parent's local units
    pub offset: Vec3,
}

/// Thundercloud, optionally carrying a bolt child
#[derive(Debug, Clone)]
pub struct Thunder {
    pub id: u32,
    pub pos: Vec3,
    pub scale: f32,
    pub bolt: Option<Bolt>,
    pub hit_by_bird: bool,
    pub bolt_hit: bool,
}

impl Thunder {
    /// World-space position of the bolt tip, accounting for parent scale
    pub fn bolt_world_pos(&self) -> Option<Vec3> {
        self.bolt.as_ref().map(|b| self.pos + b.offset * self.scale)
    }
}

/// Per-category entity collections. Insertion order only; no cross-category
/// ordering is meaningful.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub clouds: Vec<Cloud>,
    pub hoops: Vec<Hoop>,
    pub jets: Vec<Jet>,
    pub smog: Vec<Smog>,
    pub thunder: Vec<Thunder>,
}

impl Pools {
    /// Total live entities across all categories
    pub fn len(&self) -> usize {
        self.clouds.len()
            + self.hoops.len()
            + self.jets.len()
            + self.smog.len()
            + self.thunder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active flight
    Flying,
    /// World paused while an educational notice shows; auto-resumes
    Notice {
        kind: crate::presentation::NoticeKind,
        ticks_left: u32,
    },
    /// Explicit pause
    Paused,
    /// Terminal; only a fresh `GameState` recovers
    GameOver,
}

/// One-time warning latches, per session
#[derive(Debug, Clone, Copy, Default)]
pub struct Warnings {
    pub jet: bool,
    pub smog: bool,
    pub lightning: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Game-speed multiplier, bounded by tuning
    pub speed: f32,
    /// Harmful triggers are suppressed while this is nonzero
    pub invincible_ticks: u32,
    pub player: Player,
    pub pools: Pools,
    pub timers: SpawnTimers,
    pub shake: CameraShake,
    pub distortion: ScreenDistortion,
    pub warned: Warnings,
    /// Input device connected; collisions and flight commands gate on this
    pub connected: bool,
    /// Sound cues are dropped until the first user interaction unlocks audio
    pub audio_unlocked: bool,
    /// Jet model availability; `None` while still loading
    pub jet_model_ready: Option<bool>,
    next_id: u32,
}

impl GameState {
    /// Fresh session: seeded RNG, full lives, initial entity burst
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Flying,
            score: 0,
            lives: tuning.effects.starting_lives,
            speed: 1.0,
            invincible_ticks: 0,
            player: Player::new(&tuning.flight),
            pools: Pools::default(),
            timers: SpawnTimers::new(&tuning.spawn),
            shake: CameraShake::default(),
            distortion: ScreenDistortion::default(),
            warned: Warnings::default(),
            connected: false,
            audio_unlocked: false,
            jet_model_ready: None,
            next_id: 1,
        };
        spawn::initial_burst(&mut state, tuning);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Whether the world advances this tick (spawner, gravity, collisions)
    pub fn world_active(&self) -> bool {
        matches!(self.phase, GamePhase::Flying)
    }
}
