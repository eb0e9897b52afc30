use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::replay::replay_demo_to_end;
use game_core::{Game, InputJournal, InputSnapshot, TileCoord};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the skirmish engine", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded demo-match journal to its outcome.
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: String,
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,
    },
    /// Drive the demo match with seeded random input and report the result.
    Simulate {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 5_000)]
        ticks: u64,
        /// Write the generated input journal to this path
        #[arg(long)]
        journal_out: Option<String>,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Replay { journal, max_ticks } => replay(&journal, max_ticks),
        Command::Simulate { seed, ticks, journal_out } => {
            simulate(seed, ticks, journal_out.as_deref())
        }
    }
}

fn replay(path: &str, max_ticks: u64) -> Result<()> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read journal file: {path}"))?;
    let journal: InputJournal =
        serde_json::from_str(&text).context("failed to deserialize journal JSON")?;

    let result = replay_demo_to_end(&journal, max_ticks)
        .map_err(|error| anyhow::anyhow!("replay did not finish: {error:?}"))?;

    println!("Replay complete.");
    println!("Final tick: {}", result.final_tick);
    println!("Outcome: {:?}", result.outcome);
    println!("Snapshot hash: {}", result.final_snapshot_hash);
    Ok(())
}

fn simulate(seed: u64, ticks: u64, journal_out: Option<&str>) -> Result<()> {
    let mut game = Game::demo(seed);
    let mut journal = InputJournal::new(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

    for tick in 0..ticks {
        let input = random_input(&mut rng);
        journal.record(tick, input);
        game.tick(input);
        if game.outcome().is_some() {
            break;
        }
    }

    println!("Simulated {} ticks.", game.current_tick());
    println!("Outcome: {:?}", game.outcome());
    println!("State: {}", game.current_state_name());
    println!("Snapshot hash: {}", game.snapshot_hash());

    if let Some(path) = journal_out {
        let text = serde_json::to_string_pretty(&journal).context("failed to serialize journal")?;
        fs::write(path, text).with_context(|| format!("failed to write journal file: {path}"))?;
        println!("Journal written to {path}.");
    }
    Ok(())
}

fn random_input(rng: &mut ChaCha8Rng) -> InputSnapshot {
    match rng.next_u64() % 10 {
        0..=4 => InputSnapshot::default(),
        5..=7 => {
            let x = (rng.next_u64() % 8) as i32;
            let z = (rng.next_u64() % 8) as i32;
            let y = (rng.next_u64() % 2) as i32;
            InputSnapshot::click(TileCoord::new(x, y, z))
        }
        8 => InputSnapshot::pick_action((rng.next_u64() % 3) as usize),
        _ => InputSnapshot { cancel: true, ..InputSnapshot::default() },
    }
}
