//! Match orchestration: two players, their state machines, and the per-tick
//! engine that alternates turns until one side is wiped out.

use crate::fsm::StateMachine;
use crate::state::World;
use crate::types::{LogEvent, MatchOutcome, Side};

mod actions;
mod bootstrap;
mod enemy_turn;
mod engine;
mod hash;
mod human_turn;

#[cfg(test)]
mod tests;

pub use bootstrap::{StartingPoint, demo_map_data, demo_starting_points};

pub struct Game {
    seed: u64,
    tick: u64,
    world: World,
    hero_machine: StateMachine<Side, World>,
    invader_machine: StateMachine<Side, World>,
    outcome: Option<MatchOutcome>,
}

impl Game {
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.world.log
    }

    pub fn current_side(&self) -> Side {
        self.world.current_side
    }

    /// Name of the state the active player's machine is in; handy for
    /// embedders showing flow and for tests.
    pub fn current_state_name(&self) -> &'static str {
        match self.world.current_side {
            Side::Heroes => self.hero_machine.current_name(),
            Side::Invaders => self.invader_machine.current_name(),
        }
    }
}
