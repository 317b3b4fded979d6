//! blockfall binary - wires the core to the terminal in a fixed-step loop.
//!
//! Controls: arrows or wasd to move and rotate, space to hard drop,
//! p to pause (easy/medium), g to save a snapshot, q/Esc to quit.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event};

use blockfall::core::Session;
use blockfall::input;
use blockfall::persist;
use blockfall::term::{game_view, Terminal};
use blockfall::types::{Difficulty, TICK_MS};

struct Config {
    player: String,
    difficulty: Difficulty,
    load: Option<PathBuf>,
    snapshot_path: PathBuf,
    scores_path: PathBuf,
}

fn print_usage() {
    println!("usage: blockfall [--player NAME] [--difficulty easy|medium|hard] [--load FILE]");
    println!();
    println!("environment:");
    println!("  BLOCKFALL_SNAPSHOT  snapshot file path (default blockfall-save.json)");
    println!("  BLOCKFALL_SCORES    leaderboard file path (default blockfall-scores.json)");
}

fn parse_args() -> Result<Config> {
    let mut player = String::from("Player");
    let mut difficulty = Difficulty::Medium;
    let mut load = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--player" => {
                player = args.next().context("--player needs a value")?;
            }
            "--difficulty" => {
                let value = args.next().context("--difficulty needs a value")?;
                difficulty = Difficulty::from_str(&value)
                    .with_context(|| format!("unknown difficulty '{}'", value))?;
            }
            "--load" => {
                load = Some(PathBuf::from(args.next().context("--load needs a path")?));
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument '{}' (try --help)", other),
        }
    }

    let snapshot_path = std::env::var("BLOCKFALL_SNAPSHOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("blockfall-save.json"));
    let scores_path = std::env::var("BLOCKFALL_SCORES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("blockfall-scores.json"));

    Ok(Config {
        player,
        difficulty,
        load,
        snapshot_path,
        scores_path,
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let config = parse_args()?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut session = match &config.load {
        Some(path) => {
            let snap = persist::load_snapshot(path)?;
            Session::restore(&snap, seed)
        }
        None => Session::new(&config.player, config.difficulty, seed),
    };

    let mut terminal = Terminal::enter()?;
    // A reloaded finished game was already recorded.
    let mut recorded = session.is_game_over();
    let mut last = Instant::now();

    loop {
        terminal.draw(&game_view::render(&session))?;

        if event::poll(Duration::from_millis(u64::from(TICK_MS)))? {
            if let Event::Key(key) = event::read()? {
                if input::should_quit(&key) {
                    break;
                }
                if input::is_save_key(&key) {
                    persist::save_snapshot(&config.snapshot_path, &session.export())?;
                } else if let Some(action) = input::action_for_key(&key) {
                    session.apply_action(action);
                }
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis() as u32;
        last = now;
        session.tick(elapsed);

        if session.is_game_over() && !recorded {
            persist::append_score(&config.scores_path, session.score_record())?;
            recorded = true;
        }
    }

    session.stop_timers();
    drop(terminal);

    println!(
        "{} scored {} on {} ({} lines, level {})",
        session.player(),
        session.score(),
        session.difficulty().as_str(),
        session.lines(),
        session.level()
    );
    let scores = persist::load_scores(&config.scores_path)?;
    if !scores.is_empty() {
        println!();
        println!("leaderboard:");
        for (i, rec) in scores.iter().enumerate() {
            println!(
                "{:>2}. {:<16} {:>8}  {}",
                i + 1,
                rec.player,
                rec.score,
                rec.difficulty.as_str()
            );
        }
    }
    Ok(())
}
