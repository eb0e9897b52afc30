//! Traversal and stop-legality policy applied to every map query.
//! A filter is a plain value rebuilt per action; the map never stores one.

use crate::types::Side;

/// Who may pass through, stop on, or must be present on a tile, resolved
/// against the querying player's allegiance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileFilter {
    /// Allegiance of the player issuing the query.
    pub side: Side,
    pub allies_passable: bool,
    pub enemies_passable: bool,
    pub allies_required: bool,
    pub enemies_required: bool,
    pub no_stopping_on_allies: bool,
    pub no_stopping_on_enemies: bool,
    /// Maximum elevation difference a single step may bridge.
    pub height_difference_allowed: i32,
    /// When set, a tile stacked directly above blocks a destination even if a
    /// unit already stands there; by default occupied tiles are exempt.
    pub ceiling_blocks_occupied: bool,
}

impl TileFilter {
    /// Everything closed: occupied tiles block, empty tiles are fair game.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            allies_passable: false,
            enemies_passable: false,
            allies_required: false,
            enemies_required: false,
            no_stopping_on_allies: false,
            no_stopping_on_enemies: false,
            height_difference_allowed: 1,
            ceiling_blocks_occupied: false,
        }
    }

    /// Default movement policy: allies can be passed through, nobody may be
    /// landed on.
    pub fn movement(side: Side) -> Self {
        Self {
            allies_passable: true,
            no_stopping_on_allies: true,
            no_stopping_on_enemies: true,
            ..Self::new(side)
        }
    }

    /// Targeting for direct attacks: occupied tiles are aimable, allied tiles
    /// cannot be the landing spot of the blow.
    pub fn strike_targeting(side: Side) -> Self {
        Self {
            allies_passable: true,
            enemies_passable: true,
            no_stopping_on_allies: true,
            ..Self::new(side)
        }
    }

    /// Targeting for terrain creation. The tall height tolerance lets towers
    /// be aimed up steep columns while still bounding them.
    pub fn terrain_targeting(side: Side) -> Self {
        Self {
            allies_passable: true,
            enemies_passable: true,
            no_stopping_on_allies: true,
            no_stopping_on_enemies: true,
            height_difference_allowed: 8,
            ..Self::new(side)
        }
    }

    pub fn with_height_tolerance(mut self, tolerance: i32) -> Self {
        self.height_difference_allowed = tolerance;
        self
    }
}
