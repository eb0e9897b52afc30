//! Units, players, and the world context every state update threads through.
//! Nothing here is reachable through globals; the world is passed explicitly.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use crate::content::UnitTemplate;
use crate::map::{GameMap, TileFilter};
use crate::motion::{MotionQueue, MotionTask};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitStats {
    pub display_name: &'static str,
    pub max_health: i32,
    pub movement_range: u32,
    pub reach: EnemyReach,
}

/// A command prototype bound to one unit. Pure data; the three-phase
/// select/aim/execute protocol lives with the game flow and dispatches on
/// `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitAction {
    pub name: &'static str,
    pub damage: i32,
    pub shape: ActionShape,
    pub range: u32,
    pub kind: ActionKind,
}

#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub side: Side,
    pub stats: UnitStats,
    pub actions: Vec<UnitAction>,
    pub health: i32,
    pub position: TileCoord,
    /// Where the unit stood before its last move, kept for undo.
    pub previous_position: TileCoord,
    pub has_moved: bool,
    pub has_acted: bool,
}

impl Unit {
    pub fn can_move(&self) -> bool {
        !self.has_moved
    }

    pub fn can_act(&self) -> bool {
        !self.has_acted
    }

    pub fn on_turn_end(&mut self) {
        self.has_moved = false;
        self.has_acted = false;
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub side: Side,
    pub kind: PlayerKind,
    /// Exactly the live units this player controls.
    pub units: Vec<UnitId>,
    pub selected_unit: Option<UnitId>,
    pub selected_action: Option<usize>,
    pub turn_finished: bool,
}

impl Player {
    pub fn new(side: Side, kind: PlayerKind) -> Self {
        Self {
            side,
            kind,
            units: Vec::new(),
            selected_unit: None,
            selected_action: None,
            turn_finished: false,
        }
    }
}

/// Shared context: board, unit arena, both players, in-flight motion tasks,
/// the seeded RNG, and the event log.
pub struct World {
    pub map: GameMap,
    pub units: SlotMap<UnitId, Unit>,
    pub heroes: Player,
    pub invaders: Player,
    pub current_side: Side,
    pub motion: MotionQueue,
    pub rng: ChaCha8Rng,
    pub log: Vec<LogEvent>,
    pub input: InputSnapshot,
}

impl World {
    pub fn new(map: GameMap, seed: u64) -> Self {
        Self {
            map,
            units: SlotMap::with_key(),
            heroes: Player::new(Side::Heroes, PlayerKind::Human),
            invaders: Player::new(Side::Invaders, PlayerKind::Ai),
            current_side: Side::Heroes,
            motion: MotionQueue::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: Vec::new(),
            input: InputSnapshot::default(),
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Heroes => &self.heroes,
            Side::Invaders => &self.invaders,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Heroes => &mut self.heroes,
            Side::Invaders => &mut self.invaders,
        }
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current_side)
    }

    /// Creates a unit from a template and claims its starting tile. Returns
    /// `None` when the tile is missing or already taken.
    pub fn spawn_unit(
        &mut self,
        template: &UnitTemplate,
        side: Side,
        position: TileCoord,
    ) -> Option<UnitId> {
        if !self.map.tile_exists(position) || self.map.unit_at(position).is_some() {
            return None;
        }
        let id = self.units.insert(Unit {
            id: UnitId::default(),
            side,
            stats: UnitStats {
                display_name: template.display_name,
                max_health: template.max_health,
                movement_range: template.movement_range,
                reach: template.reach,
            },
            actions: template
                .actions
                .iter()
                .map(|action| UnitAction {
                    name: action.name,
                    damage: action.damage,
                    shape: action.shape,
                    range: action.range,
                    kind: action.kind,
                })
                .collect(),
            health: template.max_health,
            position,
            previous_position: position,
            has_moved: false,
            has_acted: false,
        });
        self.units[id].id = id;
        self.map.claim(position, id, side);
        self.player_mut(side).units.push(id);
        Some(id)
    }

    /// Moves a unit. Occupancy flips synchronously here, before any glide
    /// starts, so queries issued right after already see the destination as
    /// taken. Invalid targets log and leave everything untouched.
    pub fn move_unit(&mut self, id: UnitId, destination: TileCoord, mode: MoveMode) -> bool {
        let Some(unit) = self.units.get(id) else {
            return false;
        };
        let from = unit.position;
        let side = unit.side;
        if from == destination
            || !self.map.tile_exists(destination)
            || self.map.unit_at(destination).is_some()
        {
            self.log.push(LogEvent::InvalidMoveTarget { unit: id, target: destination });
            return false;
        }

        self.map.release(from);
        self.map.claim(destination, id, side);
        let unit = &mut self.units[id];
        unit.previous_position = from;
        unit.position = destination;
        self.log.push(LogEvent::UnitMoved { unit: id, from, to: destination });

        if mode == MoveMode::Glide {
            let duration = MotionQueue::glide_duration(from.planar_manhattan(destination));
            self.motion.push(MotionTask::Glide { unit: id, duration });
        }
        true
    }

    /// Walks a unit back to where it stood before its last move and lets it
    /// move again. Refused once the unit has acted or while it is gliding.
    pub fn undo_move(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.units.get(id) else {
            return false;
        };
        if !unit.has_moved || unit.has_acted || self.motion.is_unit_gliding(id) {
            return false;
        }
        let back = unit.previous_position;
        let from = unit.position;
        let side = unit.side;
        if back == from || !self.map.tile_exists(back) || self.map.unit_at(back).is_some() {
            return false;
        }

        self.map.release(from);
        self.map.claim(back, id, side);
        let unit = &mut self.units[id];
        unit.position = back;
        unit.has_moved = false;
        self.log.push(LogEvent::MoveUndone { unit: id, to: back });
        true
    }

    /// Applies damage; a unit dropping to zero health leaves the board and
    /// its owner's roster before this call returns.
    pub fn apply_damage(&mut self, target: UnitId, amount: i32) {
        let Some(unit) = self.units.get_mut(target) else {
            return;
        };
        unit.health -= amount;
        let remaining = unit.health;
        let at = unit.position;
        let side = unit.side;
        self.log.push(LogEvent::UnitDamaged { unit: target, amount, remaining });

        if remaining <= 0 {
            self.map.release(at);
            self.units.remove(target);
            self.player_mut(side).units.retain(|&unit| unit != target);
            self.log.push(LogEvent::UnitDestroyed { unit: target, at });
        }
    }

    /// Selecting an actable unit shows its movement range; a unit that has
    /// already moved is still selectable for actions, with nothing to
    /// highlight. Units of another side are silently refused.
    pub fn select_unit(&mut self, side: Side, id: UnitId) {
        let Some(unit) = self.units.get(id) else {
            return;
        };
        if unit.side != side {
            return;
        }
        let origin = unit.position;
        let range = unit.stats.movement_range;
        let can_move = unit.can_move();
        let marker = match side {
            Side::Heroes => HighlightState::Friendly,
            Side::Invaders => HighlightState::Enemy,
        };

        if can_move {
            let filter = TileFilter::movement(side);
            self.map.highlight_movement_range(origin, range, &filter, marker);
        } else {
            self.map.clear_highlights();
        }
        let player = self.player_mut(side);
        player.selected_unit = Some(id);
        player.selected_action = None;
        self.log.push(LogEvent::UnitSelected { unit: id });
    }

    pub fn deselect_unit(&mut self, side: Side) {
        let player = self.player_mut(side);
        player.selected_unit = None;
        player.selected_action = None;
        self.map.clear_highlights();
    }

    /// Resets every owned unit's per-turn flags and hands the turn back to
    /// the orchestrator.
    pub fn end_turn(&mut self, side: Side) {
        let owned = self.player(side).units.clone();
        for id in owned {
            if let Some(unit) = self.units.get_mut(id) {
                unit.on_turn_end();
            }
        }
        let player = self.player_mut(side);
        player.turn_finished = true;
        player.selected_unit = None;
        player.selected_action = None;
        self.map.clear_highlights();
        self.log.push(LogEvent::TurnEnded { side });
    }

    pub fn side_defeated(&self, side: Side) -> bool {
        self.player(side).units.is_empty()
    }
}
