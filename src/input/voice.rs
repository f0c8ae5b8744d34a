//! Voice command adapter
//!
//! Transcripts arrive as lowercase strings from an external speech
//! recognizer; substring matching maps them to speed commands.

use super::Command;

/// Map a transcript to a speed command, if it contains one
pub fn parse_transcript(transcript: &str) -> Option<Command> {
    let t = transcript.to_lowercase();
    if t.contains("faster") || t.contains("speed up") || t.contains("fast") {
        Some(Command::SpeedUp)
    } else if t.contains("slower") || t.contains("slow down") || t.contains("slow") {
        Some(Command::SpeedDown)
    } else if t.contains("normal") || t.contains("reset") {
        Some(Command::SpeedNormal)
    } else {
        None
    }
}
