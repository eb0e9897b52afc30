//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from the tick engine.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Game;
use crate::types::{MatchOutcome, Side};

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u8(side_tag(self.world.current_side));
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(MatchOutcome::Winner(side)) => 1 + side_tag(side),
        });
        hasher.write_u64(self.world.map.tile_count() as u64);

        // Occupancy iterates in coordinate order, so the digest is stable for
        // identical board states.
        for (coord, occupant) in self.world.map.occupancy() {
            hasher.write_i32(coord.x);
            hasher.write_i32(coord.y);
            hasher.write_i32(coord.z);
            hasher.write_u8(side_tag(occupant.side));
            if let Some(unit) = self.world.units.get(occupant.unit) {
                hasher.write_i32(unit.health);
                hasher.write_u8(u8::from(unit.has_moved));
                hasher.write_u8(u8::from(unit.has_acted));
            }
        }
        hasher.finish()
    }
}

fn side_tag(side: Side) -> u8 {
    match side {
        Side::Heroes => 0,
        Side::Invaders => 1,
    }
}
