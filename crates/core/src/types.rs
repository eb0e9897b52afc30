use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct UnitId;
}

/// Grid address. `x` and `z` are planar indices, `y` is the elevation layer;
/// several tiles may share an `(x, z)` column at different heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn above(self) -> Self {
        Self { x: self.x, y: self.y + 1, z: self.z }
    }

    /// Manhattan distance over the planar axes, ignoring elevation.
    pub fn planar_manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.z.abs_diff(other.z)
    }

    /// Straight-line distance over the full integer triple.
    pub fn euclidean(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        let dz = (self.z - other.z) as f32;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Allegiance of a player and every unit it owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Heroes,
    Invaders,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Heroes => Side::Invaders,
            Side::Invaders => Side::Heroes,
        }
    }
}

/// What drives a player's state machine each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// How an AI-owned unit closes distance. Short-range units advance toward
/// opponents; long-range units hold their ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyReach {
    ShortRange,
    LongRange,
}

/// View-only tile marker. Game rules never read it except to resolve what a
/// click on a previously highlighted tile means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightState {
    #[default]
    None,
    Friendly,
    Enemy,
    Attack,
    TargetEnemy,
}

/// Geometric pattern used to compute targetable tiles from an actor's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionShape {
    SelfTile,
    Adjacent,
    SkipOneTile,
}

/// Behavior tag for an action; dispatch is a `match`, not a class hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Strike,
    Laser,
    RaiseTerrain,
}

/// Whether a move lands instantly or glides over several ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveMode {
    Immediate,
    Glide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Side),
}

/// Per-tick input as sampled by the embedder. States poll this snapshot
/// instead of subscribing to click events, so nothing can dangle on exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub hovered_tile: Option<TileCoord>,
    pub clicked_tile: Option<TileCoord>,
    pub action_index: Option<usize>,
    pub cancel: bool,
}

impl InputSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn click(tile: TileCoord) -> Self {
        Self { hovered_tile: Some(tile), clicked_tile: Some(tile), ..Self::default() }
    }

    pub fn hover(tile: TileCoord) -> Self {
        Self { hovered_tile: Some(tile), ..Self::default() }
    }

    pub fn pick_action(index: usize) -> Self {
        Self { action_index: Some(index), ..Self::default() }
    }
}

/// Deterministic event log. This is the engine's logging surface: recoverable
/// failures and UI notifications both land here, and tests assert against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    UnitSelected { unit: UnitId },
    UnitMoved { unit: UnitId, from: TileCoord, to: TileCoord },
    MoveUndone { unit: UnitId, to: TileCoord },
    ActionExecuted { unit: UnitId, action: &'static str, target: TileCoord },
    UnitDamaged { unit: UnitId, amount: i32, remaining: i32 },
    UnitDestroyed { unit: UnitId, at: TileCoord },
    TurnStarted { side: Side },
    TurnEnded { side: Side },
    CameraFocus { tile: TileCoord },
    MatchEnded { winner: Side },
    InvalidMoveTarget { unit: UnitId, target: TileCoord },
    PathNotFound { from: TileCoord, to: TileCoord },
    TileCreationBlocked { at: TileCoord },
    UnknownTemplate { key: &'static str },
}
