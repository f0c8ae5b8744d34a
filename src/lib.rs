//! Sky Runner - an endless-flight arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity stream, collisions, effects)
//! - `input`: Command queue and device adapters (serial attitude, voice, gesture)
//! - `tuning`: Data-driven game balance
//! - `presentation`: Trait the dispatcher drives the frontend through

pub mod input;
pub mod presentation;
pub mod sim;
pub mod tuning;

pub use presentation::{NoticeKind, NullPresentation, Presentation, SoundCue};
pub use tuning::Tuning;

/// Fixed-loop configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the frame-driven original)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation rate in ticks per second
    pub const TICK_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs * consts::TICK_HZ).round() as u32
}
