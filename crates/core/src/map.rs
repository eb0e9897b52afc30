//! The board: tile existence, occupancy, and every filtered spatial query the
//! turn flow is built on. Mutation here is synchronous; only the visual glide
//! that follows a move spans ticks.

use std::collections::{BTreeMap, BTreeSet};

use crate::mapfile::MapData;
use crate::types::{ActionShape, HighlightState, Side, TileCoord, UnitId};

mod filter;
mod pathfinder;

pub use filter::TileFilter;

/// Default elevation cap, matching the tallest column a height digit can
/// describe plus one raised tile.
pub const MAX_MAP_HEIGHT: i32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapTile {
    pub highlight: HighlightState,
}

/// Occupancy entry. The side is cached from the unit so ally/enemy filter
/// checks never need the unit arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub unit: UnitId,
    pub side: Side,
}

#[derive(Clone, Debug)]
pub struct GameMap {
    width: i32,
    depth: i32,
    max_height: i32,
    tiles: BTreeMap<TileCoord, MapTile>,
    occupancy: BTreeMap<TileCoord, Occupant>,
    highlighted: Vec<TileCoord>,
}

impl GameMap {
    pub fn new(width: i32, depth: i32, max_height: i32) -> Self {
        Self {
            width,
            depth,
            max_height,
            tiles: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            highlighted: Vec::new(),
        }
    }

    /// Builds a board from parsed height data: each cell gets a column of
    /// tiles from elevation zero up to its height digit.
    pub fn from_map_data(data: &MapData) -> Self {
        let mut map = Self::new(data.width, data.depth, MAX_MAP_HEIGHT);
        for (&(x, z), &height) in &data.heights {
            for y in 0..height as i32 {
                map.insert_tile(TileCoord::new(x, y, z));
            }
        }
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_in_bounds(&self, coord: TileCoord) -> bool {
        coord.x >= 0
            && coord.x < self.width
            && coord.y >= 0
            && coord.y < self.max_height
            && coord.z >= 0
            && coord.z < self.depth
    }

    pub fn tile_exists(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Registers a tile. Out-of-bounds coordinates are rejected; registering
    /// an existing coordinate is a no-op.
    pub fn insert_tile(&mut self, coord: TileCoord) -> bool {
        if !self.is_in_bounds(coord) {
            return false;
        }
        self.tiles.entry(coord).or_default();
        true
    }

    pub fn remove_tile(&mut self, coord: TileCoord) {
        self.tiles.remove(&coord);
    }

    /// Registers a new tile directly above an existing one. Fails when the
    /// base tile is occupied or the new elevation is out of bounds.
    pub fn create_tile_above(&mut self, base: TileCoord) -> Option<TileCoord> {
        if !self.tile_exists(base) || self.occupancy.contains_key(&base) {
            return None;
        }
        let raised = base.above();
        if !self.insert_tile(raised) {
            return None;
        }
        Some(raised)
    }

    pub fn unit_at(&self, coord: TileCoord) -> Option<UnitId> {
        self.occupancy.get(&coord).map(|occupant| occupant.unit)
    }

    pub fn occupant_at(&self, coord: TileCoord) -> Option<Occupant> {
        self.occupancy.get(&coord).copied()
    }

    pub fn occupancy(&self) -> &BTreeMap<TileCoord, Occupant> {
        &self.occupancy
    }

    /// Claims a cell for a unit. Fails when the tile is absent or taken.
    pub fn claim(&mut self, coord: TileCoord, unit: UnitId, side: Side) -> bool {
        if !self.tile_exists(coord) || self.occupancy.contains_key(&coord) {
            return false;
        }
        self.occupancy.insert(coord, Occupant { unit, side });
        true
    }

    /// Clears a cell, returning whoever stood there. The tile itself stays.
    pub fn release(&mut self, coord: TileCoord) -> Option<Occupant> {
        self.occupancy.remove(&coord)
    }

    /// Composite destination predicate. An occupied tile must satisfy the
    /// filter's passability and required-presence rules; an empty tile must
    /// not sit under another tile (the ceiling rule). Occupied tiles are
    /// exempt from the ceiling rule unless the filter says otherwise.
    pub fn is_valid_destination(&self, coord: TileCoord, filter: &TileFilter) -> bool {
        if !self.is_in_bounds(coord) || !self.tile_exists(coord) {
            return false;
        }
        match self.occupancy.get(&coord) {
            Some(occupant) => {
                let ally = occupant.side == filter.side;
                let passable =
                    if ally { filter.allies_passable } else { filter.enemies_passable };
                if !passable {
                    return false;
                }
                if filter.allies_required && !ally {
                    return false;
                }
                if filter.enemies_required && ally {
                    return false;
                }
                if filter.ceiling_blocks_occupied && self.tile_exists(coord.above()) {
                    return false;
                }
                true
            }
            None => {
                if filter.allies_required || filter.enemies_required {
                    return false;
                }
                !self.tile_exists(coord.above())
            }
        }
    }

    /// Whether a path may end here. Checked only at path-consumption time;
    /// passing through is governed by `is_valid_destination`.
    pub fn can_stop_on(&self, coord: TileCoord, filter: &TileFilter) -> bool {
        match self.occupancy.get(&coord) {
            Some(occupant) if occupant.side == filter.side => !filter.no_stopping_on_allies,
            Some(_) => !filter.no_stopping_on_enemies,
            None => true,
        }
    }

    /// Valid destinations one planar step away, at any elevation within the
    /// filter's height tolerance. No diagonals; a stacked column can
    /// contribute several neighbors in the same direction.
    pub fn neighbors(&self, coord: TileCoord, filter: &TileFilter) -> Vec<TileCoord> {
        let mut result = Vec::new();
        if !self.tile_exists(coord) {
            return result;
        }
        let tolerance = filter.height_difference_allowed.max(0);
        for (dx, dz) in [(-1, 0), (1, 0), (0, 1), (0, -1)] {
            for dy in -tolerance..=tolerance {
                let candidate = TileCoord::new(coord.x + dx, coord.y + dy, coord.z + dz);
                if self.is_valid_destination(candidate, filter) {
                    result.push(candidate);
                }
            }
        }
        result
    }

    /// Every tile visitable in at most `range` filtered hops from `origin`
    /// (the origin itself counts at depth zero), reduced to tiles that can
    /// actually be landed on.
    pub fn tiles_in_range(
        &self,
        origin: TileCoord,
        range: u32,
        filter: &TileFilter,
    ) -> BTreeSet<TileCoord> {
        let mut visited = BTreeSet::new();
        self.collect_in_range(origin, 0, range, filter, &mut visited);
        visited.retain(|&coord| self.can_stop_on(coord, filter));
        visited
    }

    fn collect_in_range(
        &self,
        coord: TileCoord,
        depth: u32,
        max_depth: u32,
        filter: &TileFilter,
        visited: &mut BTreeSet<TileCoord>,
    ) {
        if self.is_valid_destination(coord, filter) {
            visited.insert(coord);
        }
        if depth == max_depth {
            return;
        }
        for neighbor in self.neighbors(coord, filter) {
            self.collect_in_range(neighbor, depth + 1, max_depth, filter, visited);
        }
    }

    /// Targetable tiles for an action shape. `SkipOneTile` is an annulus: the
    /// full radius minus everything adjacent.
    pub fn tiles_in_action_range(
        &self,
        origin: TileCoord,
        shape: ActionShape,
        radius: u32,
        filter: &TileFilter,
    ) -> BTreeSet<TileCoord> {
        match shape {
            ActionShape::SelfTile => BTreeSet::from([origin]),
            ActionShape::Adjacent => self.tiles_in_range(origin, radius, filter),
            ActionShape::SkipOneTile => {
                let mut tiles = self.tiles_in_range(origin, radius, filter);
                for inner in self.tiles_in_range(origin, 1, filter) {
                    tiles.remove(&inner);
                }
                tiles
            }
        }
    }

    /// A* route from `start` to `goal`, truncated to `max_steps` hops when
    /// given, then trimmed from the tail until it ends on a stoppable tile.
    /// A non-empty result therefore always has a legal landing tile; an empty
    /// result means "cannot move". With the non-admissible straight-line
    /// heuristic and uniform step cost, routes over strongly varying terrain
    /// heights are not guaranteed hop-minimal.
    pub fn find_path(
        &self,
        start: TileCoord,
        goal: TileCoord,
        filter: &TileFilter,
        max_steps: Option<usize>,
    ) -> Vec<TileCoord> {
        let mut path = pathfinder::astar(self, start, goal, filter);
        if let Some(limit) = max_steps {
            path.truncate(limit);
        }
        while let Some(&last) = path.last() {
            if self.can_stop_on(last, filter) {
                break;
            }
            path.pop();
        }
        path
    }

    pub fn highlight_at(&self, coord: TileCoord) -> HighlightState {
        self.tiles.get(&coord).map(|tile| tile.highlight).unwrap_or_default()
    }

    /// Marks a unit's reachable movement tiles. Friendly or enemy coloring is
    /// purely a view signal.
    pub fn highlight_movement_range(
        &mut self,
        origin: TileCoord,
        range: u32,
        filter: &TileFilter,
        state: HighlightState,
    ) {
        self.clear_highlights();
        let tiles = self.tiles_in_range(origin, range, filter);
        for coord in tiles {
            self.set_highlight(coord, state);
        }
    }

    /// Marks an action's targetable tiles. Tiles holding an opposing unit get
    /// the stronger `TargetEnemy` marker.
    pub fn highlight_action_range(
        &mut self,
        origin: TileCoord,
        shape: ActionShape,
        radius: u32,
        filter: &TileFilter,
    ) {
        self.clear_highlights();
        let tiles = self.tiles_in_action_range(origin, shape, radius, filter);
        for coord in tiles {
            let state = match self.occupancy.get(&coord) {
                Some(occupant) if occupant.side != filter.side => HighlightState::TargetEnemy,
                _ => HighlightState::Attack,
            };
            self.set_highlight(coord, state);
        }
    }

    pub fn clear_highlights(&mut self) {
        let coords = std::mem::take(&mut self.highlighted);
        for coord in coords {
            if let Some(tile) = self.tiles.get_mut(&coord) {
                tile.highlight = HighlightState::None;
            }
        }
    }

    fn set_highlight(&mut self, coord: TileCoord, state: HighlightState) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.highlight = state;
            self.highlighted.push(coord);
        }
    }
}
