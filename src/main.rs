//! Sky Runner entry point
//!
//! Headless frontend: stdin stands in for the device inputs (attitude
//! records, voice transcripts, control words), the sim runs at a fixed
//! timestep on the main thread, and presentation output goes to the log.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use skyrunner::consts::{MAX_SUBSTEPS, SIM_DT};
use skyrunner::input::serial::AttitudeFilter;
use skyrunner::input::{Command, CommandQueue, voice};
use skyrunner::sim::{GamePhase, GameState, tick};
use skyrunner::{NoticeKind, Presentation, SoundCue, Tuning};

/// Presentation that narrates to the log
#[derive(Debug, Default)]
struct LogPresentation;

impl Presentation for LogPresentation {
    fn pause(&mut self) {
        log::info!("[paused]");
    }

    fn resume(&mut self) {
        log::info!("[resumed]");
    }

    fn show_notice(&mut self, notice: NoticeKind) {
        log::info!("NOTICE: {}", notice.message());
    }

    fn play_cue(&mut self, cue: SoundCue) {
        log::debug!("cue: {cue:?}");
    }

    fn score_changed(&mut self, score: u32) {
        log::info!("score: {score}");
    }

    fn lives_changed(&mut self, lives: u8) {
        log::info!("lives: {lives}");
    }

    fn game_over(&mut self, score: u32) {
        log::info!("GAME OVER - final score {score}");
    }
}

struct Args {
    seed: u64,
    tuning: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: 0xB12D,
        tuning: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    args.seed = value;
                } else {
                    log::warn!("--seed needs a number; keeping default");
                }
            }
            "--tuning" => args.tuning = iter.next().map(PathBuf::from),
            other => log::warn!("ignoring unknown argument {other}"),
        }
    }
    args
}

/// Feed stdin lines into the command queue. Lines with commas are treated
/// as attitude records; bare words are control or voice input.
fn spawn_input_thread(queue: CommandQueue, running: Arc<AtomicBool>) {
    let start = Instant::now();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut filter = AttitudeFilter::new();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let now_ms = start.elapsed().as_millis() as u64;
            let trimmed = line.trim();

            if trimmed.contains(',') {
                for command in filter.ingest_line(trimmed, now_ms) {
                    queue.push(command);
                }
                continue;
            }

            match trimmed {
                "" => {}
                "quit" => {
                    running.store(false, Ordering::Relaxed);
                    break;
                }
                "connect" => queue.push(Command::Connect),
                "disconnect" => queue.push(Command::Disconnect),
                "pause" => queue.push(Command::TogglePause),
                "up" => {
                    queue.push(Command::UnlockAudio);
                    queue.push(Command::AdjustHeight(1));
                }
                "down" => queue.push(Command::AdjustHeight(-1)),
                transcript => match voice::parse_transcript(transcript) {
                    Some(command) => queue.push(command),
                    None => log::info!("say \"faster\", \"slower\" or \"normal\""),
                },
            }
        }
        running.store(false, Ordering::Relaxed);
    });
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let tuning = match &args.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };

    let queue = CommandQueue::new();
    let running = Arc::new(AtomicBool::new(true));
    spawn_input_thread(queue.clone(), running.clone());

    let mut state = GameState::new(args.seed, &tuning);
    let mut presentation = LogPresentation;

    // The headless build has no model loader; report the jet available so
    // spawn tables behave as configured.
    queue.push(Command::JetModelReady);

    log::info!("seed {}; type \"connect\" to start flying", args.seed);

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    while running.load(Ordering::Relaxed) {
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let commands = queue.drain();
            tick(&mut state, &tuning, &commands, &mut presentation, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if state.phase == GamePhase::GameOver {
            break;
        }

        if state.time_ticks % 300 == 0 {
            log::debug!(
                "t={} pos=({:.1}, {:.1}, {:.1}) entities={} score={} lives={}",
                state.time_ticks,
                state.player.pos.x,
                state.player.pos.y,
                state.player.pos.z,
                state.pools.len(),
                state.score,
                state.lives,
            );
        }

        std::thread::sleep(frame);
    }

    log::info!("session ended: score {} after {} ticks", state.score, state.time_ticks);
}
