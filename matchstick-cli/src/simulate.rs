//! Simulate command - random playouts from the configured opening
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: summarize()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use matchstick_core::{random_playout, GameConfig, GameState};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Maximum moves per game
    #[arg(long, default_value = "500")]
    pub max_turns: u32,

    /// Base random seed; game `i` uses `seed + i`
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single playout
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub seed: u64,
    pub winner: Option<usize>,
    pub turns: u32,
    pub stalled: bool,
}

/// Aggregated simulation results
#[derive(Clone, Debug, Serialize)]
pub struct SimulationReport {
    pub games: usize,
    pub wins: [usize; 2],
    pub unfinished: usize,
    pub stalled: usize,
    pub avg_turns: f32,
    pub records: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Play the games in parallel
/// 2. Summarize
/// 3. Report
pub fn run(args: SimulateArgs, config: GameConfig) -> Result<()> {
    let base_seed = args.seed;
    let state = config.to_game_state();

    tracing::info!(
        "Simulating {} games (max {} turns, seed {})",
        args.games,
        args.max_turns,
        base_seed
    );

    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:40}] {pos}/{len} games ({eta})",
    )?);

    let records = play_games(&state, args.games, args.max_turns, base_seed, &progress);
    progress.finish_and_clear();

    let report = summarize(records);
    report_results(&report, args.json)?;

    tracing::info!("Simulation finished");
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play independent games; game `i` uses seed `base_seed + i`
pub fn play_games(
    state: &GameState,
    games: usize,
    max_turns: u32,
    base_seed: u64,
    progress: &ProgressBar,
) -> Vec<GameRecord> {
    (0..games)
        .into_par_iter()
        .map(|game_number| {
            let seed = base_seed.wrapping_add(game_number as u64);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = random_playout(state, max_turns, &mut rng);
            progress.inc(1);

            GameRecord {
                game_number,
                seed,
                winner: outcome.winner(),
                turns: outcome.final_state.turn(),
                stalled: outcome.stalled,
            }
        })
        .collect()
}

fn report_results(report: &SimulationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Games:        {}", report.games);
    println!(
        "Player 0:     {} wins ({})",
        report.wins[0],
        format_percent(report.wins[0], report.games)
    );
    println!(
        "Player 1:     {} wins ({})",
        report.wins[1],
        format_percent(report.wins[1], report.games)
    );
    println!("Unfinished:   {} ({} stalled)", report.unfinished, report.stalled);
    println!("Avg turns:    {:.1}", report.avg_turns);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

pub fn summarize(records: Vec<GameRecord>) -> SimulationReport {
    let mut wins = [0usize; 2];
    let mut unfinished = 0;
    let mut stalled = 0;

    for record in &records {
        match record.winner {
            Some(index) => wins[index] += 1,
            None => unfinished += 1,
        }
        if record.stalled {
            stalled += 1;
        }
    }

    let avg_turns = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.turns as f32).sum::<f32>() / records.len() as f32
    };

    SimulationReport {
        games: records.len(),
        wins,
        unfinished,
        stalled,
        avg_turns,
        records,
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", 100.0 * count as f32 / total as f32)
}
