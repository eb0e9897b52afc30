pub mod content;
pub mod fsm;
pub mod game;
pub mod journal;
pub mod map;
pub mod mapfile;
pub mod motion;
pub mod replay;
pub mod state;
pub mod types;

pub use content::ContentPack;
pub use game::{Game, StartingPoint};
pub use journal::{InputJournal, InputRecord};
pub use map::{GameMap, TileFilter};
pub use mapfile::{MapData, parse_height_map};
pub use replay::*;
pub use state::{Player, Unit, UnitAction, World};
pub use types::*;
