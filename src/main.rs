//! Dark Skies entry point
//!
//! Headless runner: resolves flags, settings and trivia once, then drives the
//! simulation at a fixed tick rate, routing events to audio and trivia.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use dark_skies::audio::{AudioManager, LogSink};
use dark_skies::driver::FrameClock;
use dark_skies::sim::{
    GameEvent, GameOverReason, GamePhase, GameState, InputTape, SimConfig, TickInput, tick,
};
use dark_skies::{FlagSnapshot, Settings, StaticFlags, TriviaDeck};

/// Side-scrolling obstacle dodger with trivia breaks (headless runner).
#[derive(Debug, Parser)]
#[command(name = "dark-skies", version, about)]
struct Args {
    /// Seed for obstacle gaps and trivia picks
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Rounds to play before quitting
    #[arg(long, default_value_t = 3, value_name = "N")]
    rounds: u32,

    /// Hard limit on simulated ticks
    #[arg(long, default_value_t = 36_000, value_name = "N")]
    max_ticks: u64,

    /// Simulation config (JSON, missing fields use defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Trivia deck (JSON array of {text, difficulty})
    #[arg(long, value_name = "FILE", default_value = "assets/trivia.json")]
    trivia: PathBuf,

    /// Feature flag values (JSON object of flag key to bool)
    #[arg(long, value_name = "FILE")]
    flags: Option<PathBuf>,

    /// Audio settings file
    #[arg(long, value_name = "FILE", default_value = "settings.json")]
    settings: PathBuf,

    /// Disable the autopilot (the actor will just fall)
    #[arg(long)]
    no_autopilot: bool,

    /// Start with background music paused (sound effects still play)
    #[arg(long)]
    no_music: bool,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the recorded input tape here
    #[arg(long, value_name = "FILE")]
    tape: Option<PathBuf>,
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    SimConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimConfig::default(),
    };

    let flags = args
        .flags
        .as_deref()
        .map(StaticFlags::load_or_default)
        .unwrap_or_default();
    let snapshot = FlagSnapshot::resolve(&flags);

    let mut settings = Settings::load_or_default(&args.settings);
    settings.apply_flags(&snapshot);
    let mut audio = AudioManager::new(LogSink, &settings);
    if args.no_music {
        audio.toggle_music();
    }

    let deck = TriviaDeck::load_or_builtin(&args.trivia).filtered(&snapshot.trivia_difficulties);

    let mut tape = InputTape::new(config.clone(), args.seed, deck.len());
    let mut state = GameState::new(config, args.seed)
        .context("invalid simulation config")?
        .with_trivia_pool(deck.len());

    log::info!(
        "Dark Skies starting: seed={} rounds={} obstacles={} muted={}",
        args.seed,
        args.rounds,
        state.stream.target_count(),
        audio.is_muted()
    );

    let idle = TickInput {
        idle_mode: !args.no_autopilot,
        ..Default::default()
    };
    let mut pending = idle;
    let mut clock = FrameClock::default();
    let mut last_frame = Instant::now();
    let mut ticks = 0u64;
    let mut finished = 0u32;
    let mut best_score = 0u32;

    'run: loop {
        let due = if args.realtime {
            thread::sleep(Duration::from_secs_f32(clock.step()));
            let now = Instant::now();
            let due = clock.advance((now - last_frame).as_secs_f32());
            last_frame = now;
            due
        } else {
            1
        };

        for _ in 0..due {
            if ticks >= args.max_ticks {
                log::warn!("Tick limit {} reached", args.max_ticks);
                pending.quit = true;
            }

            let input = pending;
            tape.record(input);
            if input.quit {
                break 'run;
            }

            let events = tick(&mut state, &input);
            ticks += 1;
            pending = idle;

            for event in &events {
                audio.handle(event);
                match *event {
                    GameEvent::Hit { hit_count, .. } => {
                        log::info!("Hit! {}/{}", hit_count, state.config.hit_threshold);
                    }
                    GameEvent::Score { score, .. } => log::debug!("Score: {}", score),
                    GameEvent::TriviaRequested { index } => {
                        if let Some(item) = deck.get(index) {
                            log::info!("Trivia ({}): {}", item.difficulty_name(), item.text);
                        }
                    }
                    GameEvent::GameOver { reason } => {
                        finished += 1;
                        best_score = best_score.max(state.board.score);
                        match reason {
                            GameOverReason::HitLimit => log::info!(
                                "{} Hits Reached! Round {} score {}",
                                state.config.hit_threshold,
                                state.round,
                                state.board.score
                            ),
                            GameOverReason::OutOfBounds => log::info!(
                                "Game Over! Round {} score {}",
                                state.round,
                                state.board.score
                            ),
                        }
                        if finished >= args.rounds {
                            pending.quit = true;
                        } else {
                            pending.restart = true;
                        }
                    }
                    GameEvent::Jump
                    | GameEvent::TriviaDismissed
                    | GameEvent::Restart => {}
                }
            }

            // Dismiss trivia cards on the following tick
            if state.phase == GamePhase::Paused {
                pending.acknowledge = true;
            }
        }
    }

    println!(
        "rounds={} ticks={} best_score={} last_score={} last_hits={}",
        finished, ticks, best_score, state.board.score, state.board.hit_count
    );

    if let Some(path) = &args.tape {
        let json = serde_json::to_string(&tape).context("serializing tape")?;
        fs::write(path, json).with_context(|| format!("writing tape {}", path.display()))?;
        log::info!("Tape with {} frames written to {}", tape.len(), path.display());
    }

    Ok(())
}
