//! Starting board construction for a new match.
//! This module exists to keep setup details away from the tick engine; once a
//! match is running it plays no further part.

use super::Game;
use super::enemy_turn::WaitForTurnState;
use super::human_turn::SelectUnitState;
use crate::content::{ContentPack, keys};
use crate::fsm::StateMachine;
use crate::map::GameMap;
use crate::mapfile::{self, MapData};
use crate::state::World;
use crate::types::{LogEvent, Side, TileCoord};

/// Where a unit template enters the board at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartingPoint {
    pub template: &'static str,
    pub side: Side,
    pub position: TileCoord,
}

const DEMO_LEVEL: &str = "\
# demo skirmish level
11111111
11111111
11211211
11111111
11111111
11211211
11111111
11111111
";

impl Game {
    pub fn new(
        seed: u64,
        content: &ContentPack,
        map_data: &MapData,
        spawns: &[StartingPoint],
    ) -> Self {
        let map = GameMap::from_map_data(map_data);
        let mut world = World::new(map, seed);

        for spawn in spawns {
            match content.template(spawn.template) {
                Some(template) => {
                    world.spawn_unit(template, spawn.side, spawn.position);
                }
                None => world.log.push(LogEvent::UnknownTemplate { key: spawn.template }),
            }
        }

        let mut hero_side = Side::Heroes;
        let hero_machine =
            StateMachine::new(Box::new(SelectUnitState), &mut hero_side, &mut world);
        let mut invader_side = Side::Invaders;
        let invader_machine =
            StateMachine::new(Box::new(WaitForTurnState), &mut invader_side, &mut world);

        world.log.push(LogEvent::TurnStarted { side: Side::Heroes });
        Self { seed, tick: 0, world, hero_machine, invader_machine, outcome: None }
    }

    /// The bundled demo skirmish: default content on the built-in height map.
    pub fn demo(seed: u64) -> Self {
        let content = ContentPack::build_default();
        Self::new(seed, &content, &demo_map_data(), &demo_starting_points())
    }
}

pub fn demo_map_data() -> MapData {
    mapfile::parse_height_map(DEMO_LEVEL).expect("bundled demo level parses")
}

pub fn demo_starting_points() -> Vec<StartingPoint> {
    vec![
        StartingPoint {
            template: keys::HERO_VANGUARD,
            side: Side::Heroes,
            position: TileCoord::new(1, 0, 1),
        },
        StartingPoint {
            template: keys::HERO_SAPPER,
            side: Side::Heroes,
            position: TileCoord::new(3, 0, 1),
        },
        StartingPoint {
            template: keys::HERO_LANCER,
            side: Side::Heroes,
            position: TileCoord::new(5, 0, 1),
        },
        StartingPoint {
            template: keys::INVADER_CHARGER,
            side: Side::Invaders,
            position: TileCoord::new(2, 0, 6),
        },
        StartingPoint {
            template: keys::INVADER_CHARGER,
            side: Side::Invaders,
            position: TileCoord::new(4, 0, 6),
        },
        StartingPoint {
            template: keys::INVADER_WATCHER,
            side: Side::Invaders,
            position: TileCoord::new(6, 0, 6),
        },
    ]
}
