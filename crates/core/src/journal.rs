//! Recorded per-tick inputs for deterministic match replay.

use serde::{Deserialize, Serialize};

use crate::types::InputSnapshot;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub tick: u64,
    pub input: InputSnapshot,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: 1, build_id: "dev".to_string(), seed, inputs: Vec::new() }
    }

    /// Empty snapshots are not worth recording; replay fills the silent ticks
    /// with default input.
    pub fn record(&mut self, tick: u64, input: InputSnapshot) {
        if !input.is_empty() {
            self.inputs.push(InputRecord { tick, input });
        }
    }
}
