//! Headless auto-play runner (default binary).
//!
//! Drives the engine the way a UI's "auto" toggle would: one `auto_move` (or
//! `random_move`) per tick until the board locks up, then reports the result.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use merge_2048::core::Model;
use merge_2048::types::GameAction;

#[derive(Parser, Debug)]
#[command(name = "merge-2048")]
#[command(author, version, about = "Play 2048 automatically with the greedy or random policy")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Seed for reproducible runs (game i uses seed + i); entropy if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Move selection policy
    #[arg(short, long, value_enum, default_value = "auto")]
    policy: Policy,

    /// Maximum moves per game (0 = until no move is possible)
    #[arg(short, long, default_value_t = 0)]
    max_moves: u32,

    /// Delay between auto-play ticks in milliseconds
    #[arg(long, default_value_t = 0)]
    tick_ms: u64,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Tracing filter, e.g. "merge_2048_core=debug"
    #[arg(long, default_value = "warn")]
    log: String,
}

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Policy {
    /// Greedy one-ply evaluator
    Auto,
    /// Uniformly random direction
    Random,
}

impl Policy {
    fn action(self) -> GameAction {
        match self {
            Policy::Auto => GameAction::AutoMove,
            Policy::Random => GameAction::RandomMove,
        }
    }
}

#[derive(Debug, Serialize)]
struct GameResult {
    game: u32,
    seed: Option<u64>,
    moves: u32,
    score: u32,
    max_tile: u32,
    undo_depth: usize,
    finished: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    policy: Policy,
    games: Vec<GameResult>,
    mean_score: f64,
    best_score: u32,
    best_tile: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&args.log).with_context(|| {
            format!("invalid --log filter: {}", args.log)
        })?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.games == 0 {
        return Err(anyhow!("--games must be at least 1"));
    }

    let results: Vec<GameResult> = (0..args.games).map(|i| play(&args, i)).collect();
    let summary = summarize(args.policy, results);

    if args.json {
        let out = serde_json::to_string_pretty(&summary).context("encode summary")?;
        println!("{out}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn play(args: &Args, game: u32) -> GameResult {
    let seed = args.seed.map(|s| s.wrapping_add(game as u64));
    let mut model = match seed {
        Some(seed) => Model::with_seed(seed),
        None => Model::new(),
    };
    info!(game, ?seed, "game started");

    let tick = Duration::from_millis(args.tick_ms);
    let action = args.policy.action();
    let mut moves = 0;

    while model.can_move() && (args.max_moves == 0 || moves < args.max_moves) {
        if !model.apply_action(action) {
            // A random policy can pick a blocked direction; that still costs a tick.
            debug!(game, moves, "move had no effect");
        }
        moves += 1;

        if args.verbose {
            println!("game {} move {}: score {}", game + 1, moves, model.score());
            print!("{}", model.game_tiles());
        }
        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }

    let snap = model.snapshot();
    info!(game, moves, score = snap.score, max_tile = snap.max_tile, "game finished");

    GameResult {
        game: game + 1,
        seed,
        moves,
        score: snap.score,
        max_tile: snap.max_tile,
        undo_depth: snap.undo_depth,
        finished: snap.game_over(),
    }
}

fn summarize(policy: Policy, games: Vec<GameResult>) -> Summary {
    let total: u64 = games.iter().map(|g| g.score as u64).sum();
    let mean_score = total as f64 / games.len().max(1) as f64;
    let best_score = games.iter().map(|g| g.score).max().unwrap_or(0);
    let best_tile = games.iter().map(|g| g.max_tile).max().unwrap_or(0);

    Summary {
        policy,
        games,
        mean_score,
        best_score,
        best_tile,
    }
}

fn print_summary(summary: &Summary) {
    println!("=== Auto-play Results ===");
    println!("policy={:?}", summary.policy);
    for g in &summary.games {
        println!(
            "game={} moves={} score={} max_tile={} finished={}",
            g.game, g.moves, g.score, g.max_tile, g.finished
        );
    }
    println!("mean_score={:.2}", summary.mean_score);
    println!("best_score={}", summary.best_score);
    println!("best_tile={}", summary.best_tile);
}
