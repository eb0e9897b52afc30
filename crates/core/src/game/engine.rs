//! Per-tick advancement: motion tasks first, then the active player's state
//! machine, then turn-end and match-end bookkeeping. Everything runs on the
//! single logical tick thread.

use super::Game;
use super::enemy_turn::{EnemySelectUnitState, WaitForTurnState};
use super::human_turn::SelectUnitState;
use crate::motion::MotionEvent;
use crate::types::{InputSnapshot, LogEvent, MatchOutcome, Side};

impl Game {
    /// Advances the match by one frame with the given input snapshot.
    /// A finished match ignores further ticks.
    pub fn tick(&mut self, input: InputSnapshot) {
        if self.outcome.is_some() {
            return;
        }
        self.world.input = input;
        self.route_motion_events();
        self.update_current_machine();
        self.check_human_turn_over();
        self.rotate_turn_if_finished();
        self.check_match_end();
        self.tick += 1;
    }

    /// Runs up to `ticks` frames of empty input, stopping early on match end.
    pub fn run_idle(&mut self, ticks: u64) {
        for _ in 0..ticks {
            if self.outcome.is_some() {
                return;
            }
            self.tick(InputSnapshot::default());
        }
    }

    fn route_motion_events(&mut self) {
        for event in self.world.motion.advance() {
            match event {
                MotionEvent::GlideFinished { unit } => {
                    if let Some(unit) = self.world.units.get_mut(unit) {
                        unit.has_moved = true;
                        // An invader's micro-turn is its move.
                        if unit.side == Side::Invaders {
                            unit.has_acted = true;
                        }
                    }
                }
                MotionEvent::ActionDelayFinished { .. }
                | MotionEvent::CameraPanFinished { .. } => {}
            }
        }
    }

    fn update_current_machine(&mut self) {
        let mut side = self.world.current_side;
        match side {
            Side::Heroes => self.hero_machine.update(&mut side, &mut self.world),
            Side::Invaders => self.invader_machine.update(&mut side, &mut self.world),
        }
    }

    /// The human turn ends on its own once every hero has taken its action.
    fn check_human_turn_over(&mut self) {
        if self.world.current_side != Side::Heroes || self.world.heroes.turn_finished {
            return;
        }
        let heroes = &self.world.heroes.units;
        if heroes.is_empty() {
            return;
        }
        let all_acted = heroes
            .iter()
            .all(|&id| self.world.units.get(id).is_some_and(|unit| unit.has_acted));
        if all_acted {
            self.world.end_turn(Side::Heroes);
        }
    }

    fn rotate_turn_if_finished(&mut self) {
        if !self.world.current_player().turn_finished {
            return;
        }
        let finished = self.world.current_side;
        self.world.player_mut(finished).turn_finished = false;
        let next = finished.opponent();
        self.world.current_side = next;
        self.world.log.push(LogEvent::TurnStarted { side: next });

        let mut side = next;
        match next {
            Side::Heroes => {
                self.hero_machine.change_state(
                    Box::new(SelectUnitState),
                    &mut side,
                    &mut self.world,
                );
                let mut parked = finished;
                self.invader_machine.change_state(
                    Box::new(WaitForTurnState),
                    &mut parked,
                    &mut self.world,
                );
            }
            Side::Invaders => {
                self.invader_machine.change_state(
                    Box::new(EnemySelectUnitState::default()),
                    &mut side,
                    &mut self.world,
                );
            }
        }
    }

    fn check_match_end(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        for side in [Side::Heroes, Side::Invaders] {
            if self.world.side_defeated(side) {
                let winner = side.opponent();
                self.outcome = Some(MatchOutcome::Winner(winner));
                self.world.log.push(LogEvent::MatchEnded { winner });
                return;
            }
        }
    }
}
