//! Human turn flow: pick a unit, move it, aim and fire its actions. Each
//! state polls the tick's input snapshot; nothing subscribes to events.

use crate::fsm::{State, Transition};
use crate::map::TileFilter;
use crate::state::{UnitAction, World};
use crate::types::{HighlightState, LogEvent, MoveMode, Side, TileCoord, UnitId};

/// Hub state of the human loop. Clicking an actable own unit selects it,
/// clicking a highlighted destination moves the selection, picking an action
/// index starts aiming, anything else deselects.
pub(super) struct SelectUnitState;

impl State<Side, World> for SelectUnitState {
    fn name(&self) -> &'static str {
        "select_unit"
    }

    fn update(&mut self, side: &mut Side, world: &mut World) -> Transition<Side, World> {
        let side = *side;
        if let Some(index) = world.input.action_index {
            return try_select_action(side, index, world);
        }
        let Some(tile) = world.input.clicked_tile else {
            return Transition::Stay;
        };

        if let Some(clicked_unit) = world.map.unit_at(tile)
            && world
                .units
                .get(clicked_unit)
                .is_some_and(|unit| unit.side == side && unit.can_act())
        {
            world.select_unit(side, clicked_unit);
            return Transition::Stay;
        }

        if world.map.highlight_at(tile) == HighlightState::Friendly
            && let Some(mover) = world.player(side).selected_unit
        {
            return start_move(side, mover, tile, world);
        }

        world.deselect_unit(side);
        Transition::Stay
    }
}

fn try_select_action(side: Side, index: usize, world: &mut World) -> Transition<Side, World> {
    let Some(unit_id) = world.player(side).selected_unit else {
        return Transition::Stay;
    };
    let Some(unit) = world.units.get(unit_id) else {
        return Transition::Stay;
    };
    if !unit.can_act() {
        return Transition::Stay;
    }
    // An out-of-range index is rejected without any state change.
    let Some(&action) = unit.actions.get(index) else {
        return Transition::Stay;
    };
    world.player_mut(side).selected_action = Some(index);
    action.on_selected(world, unit_id);
    Transition::To(Box::new(AimActionState { unit: unit_id, action }))
}

fn start_move(
    side: Side,
    mover: UnitId,
    destination: TileCoord,
    world: &mut World,
) -> Transition<Side, World> {
    let Some(unit) = world.units.get(mover) else {
        return Transition::Stay;
    };
    let start = unit.position;
    let range = unit.stats.movement_range as usize;
    let filter = TileFilter::movement(side);
    let path = world.map.find_path(start, destination, &filter, Some(range));
    let Some(&landing) = path.last() else {
        world.log.push(LogEvent::PathNotFound { from: start, to: destination });
        return Transition::Stay;
    };

    world.map.clear_highlights();
    if world.move_unit(mover, landing, MoveMode::Glide) {
        Transition::To(Box::new(WatchUnitMoveState { unit: mover }))
    } else {
        Transition::Stay
    }
}

/// Waits out the selected unit's glide, then hands control back.
pub(super) struct WatchUnitMoveState {
    pub(super) unit: UnitId,
}

impl State<Side, World> for WatchUnitMoveState {
    fn name(&self) -> &'static str {
        "watch_unit_move"
    }

    fn update(&mut self, _side: &mut Side, world: &mut World) -> Transition<Side, World> {
        if world.motion.is_unit_gliding(self.unit) {
            Transition::Stay
        } else {
            Transition::To(Box::new(SelectUnitState))
        }
    }
}

/// Polls the action's aim against the hovered tile every tick. A click fires
/// when the aim is valid and cancels back to selection when it is not.
pub(super) struct AimActionState {
    pub(super) unit: UnitId,
    pub(super) action: UnitAction,
}

impl State<Side, World> for AimActionState {
    fn name(&self) -> &'static str {
        "aim_action"
    }

    fn update(&mut self, side: &mut Side, world: &mut World) -> Transition<Side, World> {
        let side = *side;
        if world.player(side).selected_action.is_none() || world.units.get(self.unit).is_none() {
            return Transition::To(Box::new(SelectUnitState));
        }

        let target = self.action.aim(world, self.unit);

        if world.input.cancel {
            self.action.cancel(world);
            world.player_mut(side).selected_action = None;
            return Transition::To(Box::new(SelectUnitState));
        }
        if world.input.clicked_tile.is_none() {
            return Transition::Stay;
        }

        match target {
            Some(target) => {
                self.action.execute(world, self.unit, target);
                if let Some(unit) = world.units.get_mut(self.unit) {
                    unit.has_acted = true;
                }
                world.player_mut(side).selected_action = None;
                Transition::To(Box::new(WatchActionState { unit: self.unit }))
            }
            None => {
                self.action.cancel(world);
                world.player_mut(side).selected_action = None;
                Transition::To(Box::new(SelectUnitState))
            }
        }
    }
}

/// Waits out the post-action pause before returning to selection.
pub(super) struct WatchActionState {
    pub(super) unit: UnitId,
}

impl State<Side, World> for WatchActionState {
    fn name(&self) -> &'static str {
        "watch_action"
    }

    fn update(&mut self, _side: &mut Side, world: &mut World) -> Transition<Side, World> {
        if world.motion.has_action_delay(self.unit) {
            Transition::Stay
        } else {
            Transition::To(Box::new(SelectUnitState))
        }
    }
}
