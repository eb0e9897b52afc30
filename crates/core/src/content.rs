//! Static unit templates and the default skirmish content pack.

use crate::types::{ActionKind, ActionShape, EnemyReach};

pub mod keys {
    pub const HERO_VANGUARD: &str = "hero_vanguard";
    pub const HERO_SAPPER: &str = "hero_sapper";
    pub const HERO_LANCER: &str = "hero_lancer";

    pub const INVADER_CHARGER: &str = "invader_charger";
    pub const INVADER_WATCHER: &str = "invader_watcher";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionTemplate {
    pub name: &'static str,
    pub damage: i32,
    pub shape: ActionShape,
    pub range: u32,
    pub kind: ActionKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitTemplate {
    pub id: &'static str,
    pub display_name: &'static str,
    pub max_health: i32,
    pub movement_range: u32,
    /// Approach gating for AI ownership; ignored for human-owned units.
    pub reach: EnemyReach,
    pub actions: Vec<ActionTemplate>,
}

pub struct ContentPack {
    pub heroes: Vec<UnitTemplate>,
    pub invaders: Vec<UnitTemplate>,
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self {
            heroes: vec![
                UnitTemplate {
                    id: keys::HERO_VANGUARD,
                    display_name: "Vanguard",
                    max_health: 12,
                    movement_range: 3,
                    reach: EnemyReach::ShortRange,
                    actions: vec![ActionTemplate {
                        name: "Strike",
                        damage: 6,
                        shape: ActionShape::Adjacent,
                        range: 1,
                        kind: ActionKind::Strike,
                    }],
                },
                UnitTemplate {
                    id: keys::HERO_SAPPER,
                    display_name: "Sapper",
                    max_health: 8,
                    movement_range: 2,
                    reach: EnemyReach::ShortRange,
                    actions: vec![
                        ActionTemplate {
                            name: "Strike",
                            damage: 3,
                            shape: ActionShape::Adjacent,
                            range: 1,
                            kind: ActionKind::Strike,
                        },
                        ActionTemplate {
                            name: "Raise Terrain",
                            damage: 0,
                            shape: ActionShape::Adjacent,
                            range: 2,
                            kind: ActionKind::RaiseTerrain,
                        },
                    ],
                },
                UnitTemplate {
                    id: keys::HERO_LANCER,
                    display_name: "Lancer",
                    max_health: 9,
                    movement_range: 2,
                    reach: EnemyReach::ShortRange,
                    actions: vec![
                        ActionTemplate {
                            name: "Arc Shot",
                            damage: 4,
                            shape: ActionShape::SkipOneTile,
                            range: 2,
                            kind: ActionKind::Strike,
                        },
                        ActionTemplate {
                            name: "Beam",
                            damage: 4,
                            shape: ActionShape::Adjacent,
                            range: 4,
                            kind: ActionKind::Laser,
                        },
                    ],
                },
            ],
            invaders: vec![
                UnitTemplate {
                    id: keys::INVADER_CHARGER,
                    display_name: "Charger",
                    max_health: 10,
                    movement_range: 3,
                    reach: EnemyReach::ShortRange,
                    actions: vec![ActionTemplate {
                        name: "Claw",
                        damage: 4,
                        shape: ActionShape::Adjacent,
                        range: 1,
                        kind: ActionKind::Strike,
                    }],
                },
                UnitTemplate {
                    id: keys::INVADER_WATCHER,
                    display_name: "Watcher",
                    max_health: 6,
                    movement_range: 2,
                    reach: EnemyReach::LongRange,
                    actions: vec![ActionTemplate {
                        name: "Gaze",
                        damage: 3,
                        shape: ActionShape::Adjacent,
                        range: 3,
                        kind: ActionKind::Laser,
                    }],
                },
            ],
        }
    }

    /// Registry lookup; a miss is the caller's problem to log and skip.
    pub fn template(&self, id: &str) -> Option<&UnitTemplate> {
        self.heroes.iter().chain(self.invaders.iter()).find(|template| template.id == id)
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::build_default()
    }
}
