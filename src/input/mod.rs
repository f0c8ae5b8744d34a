//! Input command queue and device adapters
//!
//! Every input source (serial attitude stream, voice transcripts, hand
//! gestures) runs asynchronously and converges on one [`CommandQueue`].
//! The frame loop drains the queue exactly once per tick, which serializes
//! all shared-state mutation onto the sim thread and keeps ordering
//! deterministic for tests.

pub mod gesture;
pub mod serial;
pub mod voice;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A discrete input command, produced by an adapter and consumed by the tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Smoothed attitude sample from the accelerometer device
    SetAttitude { roll: f32, pitch: f32 },
    /// Instant height step, +1 up / -1 down
    AdjustHeight(i8),
    /// Voice speed controls
    SpeedUp,
    SpeedDown,
    SpeedNormal,
    /// Explicit pause toggle
    TogglePause,
    /// Input device lifecycle
    Connect,
    Disconnect,
    /// First user interaction arrived; sound cues may play from now on
    UnlockAudio,
    /// The frontend finished loading the jet model
    JetModelReady,
    /// The jet model failed to load; jet spawns degrade to clouds for good
    JetModelFailed,
}

/// Single-consumer command queue shared with producer threads
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<Command>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command from any producer
    pub fn push(&self, command: Command) {
        match self.inner.lock() {
            Ok(mut queue) => queue.push_back(command),
            Err(poisoned) => poisoned.into_inner().push_back(command),
        }
    }

    /// Drain everything queued since the last tick, in arrival order
    pub fn drain(&self) -> Vec<Command> {
        match self.inner.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}
