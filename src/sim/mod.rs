//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies (those sit behind
//!   `Presentation`)

pub mod collide;
pub mod effects;
pub mod fx;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collide::{GameEvent, evaluate};
pub use effects::dispatch;
pub use fx::{CameraShake, DistortionFrame, ScreenDistortion};
pub use player::Player;
pub use state::{Category, GamePhase, GameState, Pools};
pub use tick::{FrameOutput, tick};
