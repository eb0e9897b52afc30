//! A* search over the map's filter-restricted neighbor graph.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use super::GameMap;
use crate::map::TileFilter;
use crate::types::TileCoord;

const STEP_COST: f32 = 1.0;

/// Heap entry ordered by f-score. Ties fall back to coordinate order, but
/// callers must not depend on tie order between equal-cost routes.
#[derive(Clone, Copy, Debug)]
struct OpenNode {
    f: f32,
    coord: TileCoord,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f.total_cmp(&other.f).then_with(|| self.coord.cmp(&other.coord))
    }
}

/// Runs A* from `start` to `goal`, expanding only neighbors the filter admits.
/// The heuristic is straight-line distance over the coordinate triple with a
/// uniform step cost of 1, so routes across tall terrain are good but not
/// guaranteed hop-minimal. Returns the hops after `start` up to and including
/// `goal`, or an empty path when the open set exhausts.
pub(super) fn astar(
    map: &GameMap,
    start: TileCoord,
    goal: TileCoord,
    filter: &TileFilter,
) -> Vec<TileCoord> {
    if start == goal || !map.tile_exists(start) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut closed = BTreeSet::new();
    let mut came_from: BTreeMap<TileCoord, TileCoord> = BTreeMap::new();
    let mut g_score: BTreeMap<TileCoord, f32> = BTreeMap::new();

    g_score.insert(start, 0.0);
    open.push(Reverse(OpenNode { f: start.euclidean(goal), coord: start }));

    while let Some(Reverse(node)) = open.pop() {
        let current = node.coord;
        if current == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        if !closed.insert(current) {
            // Stale heap entry for an already-settled node.
            continue;
        }

        let current_g = g_score.get(&current).copied().expect("open node has a g-score");
        for neighbor in map.neighbors(current, filter) {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current_g + STEP_COST;
            let known_g = g_score.get(&neighbor).copied().unwrap_or(f32::INFINITY);
            if tentative_g >= known_g {
                continue;
            }
            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative_g);
            open.push(Reverse(OpenNode { f: tentative_g + neighbor.euclidean(goal), coord: neighbor }));
        }
    }

    Vec::new()
}

fn reconstruct_path(
    came_from: &BTreeMap<TileCoord, TileCoord>,
    start: TileCoord,
    goal: TileCoord,
) -> Vec<TileCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(prev) = came_from.get(&current).copied() else {
            return Vec::new();
        };
        current = prev;
        path.push(current);
    }
    path.reverse();
    path.remove(0);
    path
}
