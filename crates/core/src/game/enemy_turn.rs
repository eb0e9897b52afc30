//! Invader turn flow: each short-range unit takes one micro-turn marching
//! toward a randomly chosen hero; long-range units hold their ground. The
//! camera pans to a unit before it moves, the same way a human player would
//! be shown whose turn it is.

use rand_chacha::rand_core::Rng;

use crate::fsm::{State, Transition};
use crate::map::TileFilter;
use crate::motion::{CAMERA_PAN_SECONDS, MotionTask};
use crate::state::World;
use crate::types::{EnemyReach, LogEvent, MoveMode, Side, TileCoord, UnitId};

/// Parked state while the opponent plays.
pub(super) struct WaitForTurnState;

impl State<Side, World> for WaitForTurnState {
    fn name(&self) -> &'static str {
        "wait_for_turn"
    }

    fn update(&mut self, _side: &mut Side, _world: &mut World) -> Transition<Side, World> {
        Transition::Stay
    }
}

/// Picks the next unit that can still move, in roster order, and pans the
/// camera to it. No movable unit left means the turn is over.
#[derive(Default)]
pub(super) struct EnemySelectUnitState {
    chosen: Option<UnitId>,
}

impl State<Side, World> for EnemySelectUnitState {
    fn name(&self) -> &'static str {
        "enemy_select_unit"
    }

    fn enter(&mut self, side: &mut Side, world: &mut World) -> Transition<Side, World> {
        let side = *side;
        let next = world
            .player(side)
            .units
            .iter()
            .copied()
            .find(|&id| world.units.get(id).is_some_and(|unit| unit.can_move()));
        let Some(unit_id) = next else {
            world.end_turn(side);
            return Transition::Stay;
        };

        self.chosen = Some(unit_id);
        let tile = world.units[unit_id].position;
        world.motion.push(MotionTask::CameraPan { target: tile, duration: CAMERA_PAN_SECONDS });
        world.log.push(LogEvent::CameraFocus { tile });
        Transition::Stay
    }

    fn update(&mut self, _side: &mut Side, world: &mut World) -> Transition<Side, World> {
        match self.chosen {
            Some(unit) if !world.motion.is_camera_panning() => {
                Transition::To(Box::new(EnemyWatchUnitState { unit }))
            }
            _ => Transition::Stay,
        }
    }
}

/// Moves the focused unit next to a randomly chosen opposing unit, capped by
/// its movement range, and watches the glide play out.
pub(super) struct EnemyWatchUnitState {
    pub(super) unit: UnitId,
}

impl State<Side, World> for EnemyWatchUnitState {
    fn name(&self) -> &'static str {
        "enemy_watch_unit"
    }

    fn enter(&mut self, side: &mut Side, world: &mut World) -> Transition<Side, World> {
        let side = *side;
        let Some(unit) = world.units.get(self.unit) else {
            return Transition::To(Box::new(EnemySelectUnitState::default()));
        };
        if unit.stats.reach == EnemyReach::LongRange {
            return self.finish_micro_turn(world);
        }
        let start = unit.position;
        let range = unit.stats.movement_range as usize;

        let Some(goal) = pick_goal(side, world) else {
            return self.finish_micro_turn(world);
        };
        let filter = TileFilter::movement(side);
        let path = world.map.find_path(start, goal, &filter, Some(range));
        let Some(&landing) = path.last() else {
            world.log.push(LogEvent::PathNotFound { from: start, to: goal });
            return self.finish_micro_turn(world);
        };
        if !world.move_unit(self.unit, landing, MoveMode::Glide) {
            return self.finish_micro_turn(world);
        }
        Transition::Stay
    }

    fn update(&mut self, _side: &mut Side, world: &mut World) -> Transition<Side, World> {
        if world.motion.is_unit_gliding(self.unit) {
            Transition::Stay
        } else {
            // Arrival routing already marked the unit's micro-turn spent.
            Transition::To(Box::new(EnemySelectUnitState::default()))
        }
    }
}

impl EnemyWatchUnitState {
    /// A unit with nowhere to go still spends its micro-turn.
    fn finish_micro_turn(&self, world: &mut World) -> Transition<Side, World> {
        if let Some(unit) = world.units.get_mut(self.unit) {
            unit.has_moved = true;
            unit.has_acted = true;
        }
        Transition::To(Box::new(EnemySelectUnitState::default()))
    }
}

/// Goal tile: the first open neighbor of a randomly chosen opposing unit,
/// under the shared movement policy. Randomness is confined to the target
/// pick so replays stay deterministic under the seeded generator.
fn pick_goal(side: Side, world: &mut World) -> Option<TileCoord> {
    let opponent_count = world.player(side.opponent()).units.len();
    if opponent_count == 0 {
        return None;
    }
    let pick = (world.rng.next_u64() as usize) % opponent_count;
    let target = world.player(side.opponent()).units[pick];
    let target_position = world.units.get(target)?.position;

    let filter = TileFilter::movement(side);
    world.map.neighbors(target_position, &filter).first().copied()
}
