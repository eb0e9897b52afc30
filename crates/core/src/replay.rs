//! Headless re-execution of a journaled match.

use crate::content::ContentPack;
use crate::game::{Game, StartingPoint, demo_map_data, demo_starting_points};
use crate::journal::InputJournal;
use crate::mapfile::MapData;
use crate::types::{InputSnapshot, MatchOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The journal ran dry without the match reaching an outcome.
    NeverFinished { ticks: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub outcome: MatchOutcome,
    pub final_snapshot_hash: u64,
    pub final_tick: u64,
}

/// Replays a journal against the content, board, and spawns the match was
/// recorded with. The journal's seed drives the RNG, so a faithful setup
/// reproduces the run tick for tick.
pub fn replay_to_end(
    content: &ContentPack,
    map_data: &MapData,
    spawns: &[StartingPoint],
    journal: &InputJournal,
    max_ticks: u64,
) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.seed, content, map_data, spawns);
    let mut records = journal.inputs.iter().peekable();

    for tick in 0..max_ticks {
        let input = match records.peek() {
            Some(record) if record.tick == tick => {
                let record = records.next().expect("peeked record exists");
                record.input
            }
            _ => InputSnapshot::default(),
        };
        game.tick(input);
        if let Some(outcome) = game.outcome() {
            return Ok(ReplayResult {
                outcome,
                final_snapshot_hash: game.snapshot_hash(),
                final_tick: game.current_tick(),
            });
        }
    }
    Err(ReplayError::NeverFinished { ticks: max_ticks })
}

/// Replay against the bundled demo setup, the counterpart of `Game::demo`.
pub fn replay_demo_to_end(
    journal: &InputJournal,
    max_ticks: u64,
) -> Result<ReplayResult, ReplayError> {
    let content = ContentPack::build_default();
    replay_to_end(&content, &demo_map_data(), &demo_starting_points(), journal, max_ticks)
}
