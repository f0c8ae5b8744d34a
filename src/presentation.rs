//! Frontend-facing trait driven by the effect dispatcher
//!
//! The sim never renders or plays audio itself; it calls into whatever
//! implements [`Presentation`]. The dispatcher owns the call direction:
//! core calls presentation, never the reverse.

/// Educational notices, each shown at most once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Jet,
    Smog,
    Lightning,
}

impl NoticeKind {
    /// The message displayed while the game is paused for this notice
    pub fn message(&self) -> &'static str {
        match self {
            NoticeKind::Jet => {
                "Jets can distract the flight of birds, causing them to lose \
                 balance, temperament, and sight"
            }
            NoticeKind::Smog => {
                "Smog and human air pollution can affect bird's breathing and vision"
            }
            NoticeKind::Lightning => {
                "Extreme weather events, made worse by climate change, can disorient \
                 and endanger birds.\n\nLightning, hail, and storms are a growing \
                 threat to bird migration and survival."
            }
        }
    }
}

/// Short sound cues; playback is best-effort and may be dropped
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundCue {
    /// Hoop collected
    Score,
    /// Jet interference, volume scaled with proximity (0.0 - 1.0)
    JetDrone { volume: f32 },
    /// Lightning strike
    Thunderclap,
    /// Run ended
    GameOver,
}

/// Side-effect sink the dispatcher writes to
pub trait Presentation {
    /// World updates are about to stop (notice shown, or explicit pause)
    fn pause(&mut self);
    /// World updates resume
    fn resume(&mut self);
    /// Display an educational notice (the world is paused while it shows)
    fn show_notice(&mut self, notice: NoticeKind);
    /// Play a short sound; implementations swallow playback failures
    fn play_cue(&mut self, cue: SoundCue);
    /// Score display refresh
    fn score_changed(&mut self, score: u32);
    /// Life-indicator refresh
    fn lives_changed(&mut self, lives: u8);
    /// Terminal state reached; a restart means building a fresh `GameState`
    fn game_over(&mut self, score: u32);
}

/// No-op presentation for tests and headless runs
#[derive(Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn show_notice(&mut self, _notice: NoticeKind) {}
    fn play_cue(&mut self, _cue: SoundCue) {}
    fn score_changed(&mut self, _score: u32) {}
    fn lives_changed(&mut self, _lives: u8) {}
    fn game_over(&mut self, _score: u32) {}
}
