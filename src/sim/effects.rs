//! Effect and notification dispatch
//!
//! Turns evaluator events into observable consequences: score and lives,
//! the invincibility window, shake/distortion requests, one-time
//! educational notices (which pause the world), and best-effort sound
//! cues. The dispatcher is the only writer of lives and score.

use super::collide::GameEvent;
use super::state::{GamePhase, GameState};
use crate::presentation::{NoticeKind, Presentation, SoundCue};
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// Apply one tick's worth of events, then prune consumed entities
pub fn dispatch(
    state: &mut GameState,
    tuning: &Tuning,
    events: &[GameEvent],
    presentation: &mut dyn Presentation,
) {
    for event in events {
        match *event {
            GameEvent::HoopCollected { id } => {
                state.score += 1;
                log::info!("hoop {id} collected, score {}", state.score);
                presentation.score_changed(state.score);
                play_cue(state, presentation, SoundCue::Score);
            }
            GameEvent::JetStruck { id } => {
                log::info!("bird struck jet {id}");
                state
                    .shake
                    .start(tuning.effects.hit_shake_intensity, tuning.effects.hit_shake_secs);
                lose_life(state, tuning, presentation);
            }
            GameEvent::ThunderStruck { id, by_bolt } => {
                log::info!("bird struck thundercloud {id} (bolt: {by_bolt})");
                // Lightning flash: hard shake plus the thunderclap
                state.shake.start(
                    tuning.effects.strike_shake_intensity,
                    tuning.effects.strike_shake_secs,
                );
                play_cue(state, presentation, SoundCue::Thunderclap);
                lose_life(state, tuning, presentation);
            }
            GameEvent::JetNearby { intensity } => {
                state.shake.start(intensity, 0.1);
                if intensity > tuning.effects.drone_threshold {
                    let volume = (intensity / 2.0).min(0.3);
                    play_cue(state, presentation, SoundCue::JetDrone { volume });
                }
                if !state.warned.jet {
                    state.warned.jet = true;
                    show_notice(state, tuning, presentation, NoticeKind::Jet);
                }
            }
            GameEvent::SmogNearby { intensity } => {
                state.distortion.start(intensity, 3.0);
                if !state.warned.smog {
                    state.warned.smog = true;
                    show_notice(state, tuning, presentation, NoticeKind::Smog);
                }
            }
            GameEvent::ThunderNearby { id } => {
                log::debug!("thundercloud {id} close, warning");
                state.warned.lightning = true;
                show_notice(state, tuning, presentation, NoticeKind::Lightning);
            }
        }
    }

    // Terminal collisions consume their entity immediately
    state.pools.hoops.retain(|h| !h.collected);
    state.pools.jets.retain(|j| !j.hit_by_bird);
    state.pools.thunder.retain(|t| !t.hit_by_bird && !t.bolt_hit);
}

/// One life down, invincibility window open; Game Over fires exactly once.
/// A window already open (two strikes resolved in the same frame) absorbs
/// the loss.
fn lose_life(state: &mut GameState, tuning: &Tuning, presentation: &mut dyn Presentation) {
    if state.phase == GamePhase::GameOver || state.is_invincible() {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    state.invincible_ticks = secs_to_ticks(tuning.effects.invincibility_secs);
    presentation.lives_changed(state.lives);
    log::info!("life lost, {} remaining", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        play_cue(state, presentation, SoundCue::GameOver);
        presentation.game_over(state.score);
        log::info!("game over, final score {}", state.score);
    }
}

/// Pause the world behind an educational notice; auto-resume is handled by
/// the tick when the countdown runs out.
fn show_notice(
    state: &mut GameState,
    tuning: &Tuning,
    presentation: &mut dyn Presentation,
    kind: NoticeKind,
) {
    if !matches!(state.phase, GamePhase::Flying) {
        return;
    }
    let secs = match kind {
        NoticeKind::Lightning => tuning.effects.lightning_notice_secs,
        _ => tuning.effects.notice_secs,
    };
    state.phase = GamePhase::Notice {
        kind,
        ticks_left: secs_to_ticks(secs),
    };
    presentation.pause();
    presentation.show_notice(kind);
}

/// Best-effort cue playback: dropped (and logged) while audio is locked
fn play_cue(state: &GameState, presentation: &mut dyn Presentation, cue: SoundCue) {
    if state.audio_unlocked {
        presentation.play_cue(cue);
    } else {
        log::debug!("audio locked, dropping cue {cue:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Presentation double that records every call
    #[derive(Debug, Default)]
    pub struct Recording {
        pub pauses: u32,
        pub resumes: u32,
        pub notices: Vec<NoticeKind>,
        pub cues: Vec<SoundCue>,
        pub game_overs: Vec<u32>,
        pub scores: Vec<u32>,
        pub lives: Vec<u8>,
    }

    impl Presentation for Recording {
        fn pause(&mut self) {
            self.pauses += 1;
        }
        fn resume(&mut self) {
            self.resumes += 1;
        }
        fn show_notice(&mut self, notice: NoticeKind) {
            self.notices.push(notice);
        }
        fn play_cue(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
        fn score_changed(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn lives_changed(&mut self, lives: u8) {
            self.lives.push(lives);
        }
        fn game_over(&mut self, score: u32) {
            self.game_overs.push(score);
        }
    }

    fn setup() -> (GameState, Tuning, Recording) {
        let tuning = Tuning::default();
        let mut state = GameState::new(21, &tuning);
        state.connected = true;
        state.audio_unlocked = true;
        (state, tuning, Recording::default())
    }

    #[test]
    fn test_hoop_event_scores_and_cues() {
        let (mut state, tuning, mut pres) = setup();
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::HoopCollected { id: 1 }],
            &mut pres,
        );
        assert_eq!(state.score, 1);
        assert_eq!(pres.scores, vec![1]);
        assert_eq!(pres.cues, vec![SoundCue::Score]);
    }

    #[test]
    fn test_locked_audio_drops_cues() {
        let (mut state, tuning, mut pres) = setup();
        state.audio_unlocked = false;
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::HoopCollected { id: 1 }],
            &mut pres,
        );
        assert_eq!(state.score, 1);
        assert!(pres.cues.is_empty());
    }

    #[test]
    fn test_two_strikes_same_frame_cost_one_life() {
        let (mut state, tuning, mut pres) = setup();
        dispatch(
            &mut state,
            &tuning,
            &[
                GameEvent::JetStruck { id: 1 },
                GameEvent::ThunderStruck { id: 2, by_bolt: false },
            ],
            &mut pres,
        );
        assert_eq!(state.lives, 2);
        assert!(state.is_invincible());
    }

    #[test]
    fn test_game_over_fires_exactly_once() {
        let (mut state, tuning, mut pres) = setup();
        state.lives = 1;
        dispatch(&mut state, &tuning, &[GameEvent::JetStruck { id: 1 }], &mut pres);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(pres.game_overs.len(), 1);

        // Further harmful events change nothing
        state.invincible_ticks = 0;
        dispatch(&mut state, &tuning, &[GameEvent::JetStruck { id: 9 }], &mut pres);
        assert_eq!(state.lives, 0);
        assert_eq!(pres.game_overs.len(), 1);
    }

    #[test]
    fn test_jet_nearby_shakes_and_warns_once() {
        let (mut state, tuning, mut pres) = setup();
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::JetNearby { intensity: 1.5 }],
            &mut pres,
        );
        assert_eq!(state.shake.intensity, 1.5);
        assert_eq!(pres.notices, vec![NoticeKind::Jet]);
        assert_eq!(pres.pauses, 1);
        assert!(matches!(
            state.phase,
            GamePhase::Notice { kind: NoticeKind::Jet, .. }
        ));
        assert_eq!(pres.cues, vec![SoundCue::JetDrone { volume: 0.3 }]);

        // Second encounter: shake again, but no new notice
        state.phase = GamePhase::Flying;
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::JetNearby { intensity: 0.4 }],
            &mut pres,
        );
        assert_eq!(pres.notices.len(), 1);
        assert_eq!(pres.pauses, 1);
        // Below the drone threshold: no second cue either
        assert_eq!(pres.cues.len(), 1);
    }

    #[test]
    fn test_smog_distorts_and_warns_once() {
        let (mut state, tuning, mut pres) = setup();
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::SmogNearby { intensity: 1.0 }],
            &mut pres,
        );
        assert!(state.distortion.is_active());
        assert_eq!(pres.notices, vec![NoticeKind::Smog]);

        state.phase = GamePhase::Flying;
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::SmogNearby { intensity: 1.0 }],
            &mut pres,
        );
        assert_eq!(pres.notices.len(), 1);
    }

    #[test]
    fn test_thunder_nearby_pauses_without_life_loss() {
        let (mut state, tuning, mut pres) = setup();
        dispatch(
            &mut state,
            &tuning,
            &[GameEvent::ThunderNearby { id: 3 }],
            &mut pres,
        );
        assert_eq!(state.lives, 3);
        assert!(state.warned.lightning);
        assert_eq!(pres.notices, vec![NoticeKind::Lightning]);
        assert_eq!(pres.pauses, 1);
    }

    #[test]
    fn test_consumed_entities_are_pruned() {
        use crate::sim::state::{Hoop, Jet};
        use glam::Vec3;

        let (mut state, tuning, mut pres) = setup();
        state.pools = Default::default();
        state.pools.hoops.push(Hoop {
            id: 1,
            pos: Vec3::ZERO,
            scale: 1.0,
            collected: true,
        });
        state.pools.jets.push(Jet {
            id: 2,
            pos: Vec3::ZERO,
            scale: 1.0,
            hit_by_bird: true,
        });
        dispatch(&mut state, &tuning, &[], &mut pres);
        assert!(state.pools.hoops.is_empty());
        assert!(state.pools.jets.is_empty());
    }
}
