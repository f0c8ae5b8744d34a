//! Hand gesture adapter
//!
//! A camera-based recognizer (external) reduces hand landmarks to discrete
//! up/down signals. Each signal maps 1:1 to a height-adjust command, rate
//! limited so a held gesture repeats at a steady interval instead of
//! firing every camera frame.

use super::Command;

/// Minimum gap between repeated gesture actions
const ACTION_INTERVAL_MS: u64 = 150;

/// Discrete signal from the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSignal {
    ThumbsUp,
    ThumbsDown,
}

/// Rate-limited signal-to-command mapper
#[derive(Debug, Default)]
pub struct GestureMapper {
    last_action_ms: u64,
}

impl GestureMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a signal to a command, or `None` while inside the cooldown
    pub fn map(&mut self, signal: GestureSignal, now_ms: u64) -> Option<Command> {
        if now_ms.saturating_sub(self.last_action_ms) < ACTION_INTERVAL_MS {
            return None;
        }
        self.last_action_ms = now_ms;
        Some(match signal {
            GestureSignal::ThumbsUp => Command::AdjustHeight(1),
            GestureSignal::ThumbsDown => Command::AdjustHeight(-1),
        })
    }
}
