//! The three-phase action protocol: selecting shows targets, aiming validates
//! the hovered tile each tick, executing applies the effect and schedules the
//! post-action pause. Behavior dispatches on the action's kind tag.

use crate::map::TileFilter;
use crate::motion::{ACTION_DELAY_SECONDS, MotionTask};
use crate::state::{UnitAction, World};
use crate::types::{ActionKind, HighlightState, LogEvent, TileCoord, UnitId};

impl UnitAction {
    pub(crate) fn on_selected(&self, world: &mut World, actor: UnitId) {
        let Some(unit) = world.units.get(actor) else {
            return;
        };
        let origin = unit.position;
        let side = unit.side;
        match self.kind {
            // The beam aims freely; there is nothing to mark.
            ActionKind::Laser => world.map.clear_highlights(),
            ActionKind::Strike => {
                let filter = TileFilter::strike_targeting(side);
                world.map.highlight_action_range(origin, self.shape, self.range, &filter);
            }
            ActionKind::RaiseTerrain => {
                let filter = TileFilter::terrain_targeting(side);
                world.map.highlight_action_range(origin, self.shape, self.range, &filter);
            }
        }
    }

    /// Valid-aim check against the current input snapshot. Returns the tile a
    /// click would fire at, or `None` while the aim is invalid.
    pub(crate) fn aim(&self, world: &World, actor: UnitId) -> Option<TileCoord> {
        let hovered = world.input.hovered_tile?;
        match self.kind {
            ActionKind::Strike | ActionKind::RaiseTerrain => matches!(
                world.map.highlight_at(hovered),
                HighlightState::Attack | HighlightState::TargetEnemy
            )
            .then_some(hovered),
            ActionKind::Laser => {
                let unit = world.units.get(actor)?;
                (hovered != unit.position && world.map.tile_exists(hovered)).then_some(hovered)
            }
        }
    }

    pub(crate) fn execute(&self, world: &mut World, actor: UnitId, target: TileCoord) {
        match self.kind {
            ActionKind::Strike => {
                if let Some(victim) = world.map.unit_at(target) {
                    world.apply_damage(victim, self.damage);
                }
            }
            ActionKind::Laser => {
                if let Some(origin) = world.units.get(actor).map(|unit| unit.position)
                    && let Some(victim) = beam_first_hit(world, actor, origin, target, self.range)
                {
                    world.apply_damage(victim, self.damage);
                }
            }
            ActionKind::RaiseTerrain => {
                if world.map.create_tile_above(target).is_none() {
                    world.log.push(LogEvent::TileCreationBlocked { at: target });
                }
            }
        }
        world.map.clear_highlights();
        world
            .motion
            .push(MotionTask::ActionDelay { unit: actor, duration: ACTION_DELAY_SECONDS });
        world.log.push(LogEvent::ActionExecuted { unit: actor, action: self.name, target });
    }

    pub(crate) fn cancel(&self, world: &mut World) {
        world.map.clear_highlights();
    }
}

/// Walks the beam one cardinal tile at a time toward the aimed tile and
/// returns the first unit hit within range. Columns are hit at any elevation;
/// the dominant planar axis of the aim decides the beam's direction.
fn beam_first_hit(
    world: &World,
    actor: UnitId,
    from: TileCoord,
    toward: TileCoord,
    range: u32,
) -> Option<UnitId> {
    let dx = toward.x - from.x;
    let dz = toward.z - from.z;
    if dx == 0 && dz == 0 {
        return None;
    }
    let step = if dx.abs() >= dz.abs() { (dx.signum(), 0) } else { (0, dz.signum()) };

    for distance in 1..=range as i32 {
        let x = from.x + step.0 * distance;
        let z = from.z + step.1 * distance;
        let hit = world
            .map
            .occupancy()
            .iter()
            .find(|(coord, occupant)| coord.x == x && coord.z == z && occupant.unit != actor)
            .map(|(_, occupant)| occupant.unit);
        if hit.is_some() {
            return hit;
        }
    }
    None
}
