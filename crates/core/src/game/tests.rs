//! Scripted end-to-end turn flows against small fixed boards.

use super::*;
use crate::content::{ActionTemplate, ContentPack, UnitTemplate};
use crate::mapfile::parse_height_map;
use crate::types::*;

const FLAT_FIVE: &str = "11111\n11111\n11111\n11111\n11111\n";

fn duel_content(hero_damage: i32) -> ContentPack {
    ContentPack {
        heroes: vec![UnitTemplate {
            id: "slayer",
            display_name: "Slayer",
            max_health: 12,
            movement_range: 3,
            reach: EnemyReach::ShortRange,
            actions: vec![
                ActionTemplate {
                    name: "Strike",
                    damage: hero_damage,
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
        }],
        invaders: vec![UnitTemplate {
            id: "brute",
            display_name: "Brute",
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
        }],
    }
}

fn duel_game(hero_at: TileCoord, invader_at: TileCoord, hero_damage: i32) -> Game {
    let content = duel_content(hero_damage);
    let data = parse_height_map(FLAT_FIVE).expect("flat board parses");
    Game::new(
        7,
        &content,
        &data,
        &[
            StartingPoint { template: "slayer", side: Side::Heroes, position: hero_at },
            StartingPoint { template: "brute", side: Side::Invaders, position: invader_at },
        ],
    )
}

#[test]
fn clicking_an_own_unit_selects_it_and_shows_movement_range() {
    let mut game = duel_game(TileCoord::new(0, 0, 0), TileCoord::new(4, 0, 4), 6);
    let hero = game.world.heroes.units[0];

    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    assert_eq!(game.world.heroes.selected_unit, Some(hero));
    assert_eq!(game.world.map.highlight_at(TileCoord::new(1, 0, 0)), HighlightState::Friendly);
    assert!(game.log().iter().any(|event| matches!(event, LogEvent::UnitSelected { .. })));
}

#[test]
fn clicking_a_highlighted_tile_moves_the_selection_and_returns_to_select() {
    let mut game = duel_game(TileCoord::new(0, 0, 0), TileCoord::new(4, 0, 4), 6);
    let hero = game.world.heroes.units[0];
    let destination = TileCoord::new(2, 0, 0);

    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    game.tick(InputSnapshot::click(destination));

    // Occupancy flips at issue time, while the glide is still playing.
    assert_eq!(game.current_state_name(), "watch_unit_move");
    assert_eq!(game.world.map.unit_at(destination), Some(hero));
    assert_eq!(game.world.map.unit_at(TileCoord::new(0, 0, 0)), None);
    assert!(!game.world.units[hero].has_moved);

    game.run_idle(30);
    assert!(game.world.units[hero].has_moved);
    assert_eq!(game.current_state_name(), "select_unit");
    assert_eq!(game.world.units[hero].previous_position, TileCoord::new(0, 0, 0));
}

#[test]
fn clicking_elsewhere_deselects() {
    let mut game = duel_game(TileCoord::new(0, 0, 0), TileCoord::new(4, 0, 4), 6);
    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    assert!(game.world.heroes.selected_unit.is_some());

    // An unhighlighted empty tile outside the movement range.
    game.tick(InputSnapshot::click(TileCoord::new(4, 0, 0)));
    assert_eq!(game.world.heroes.selected_unit, None);
    assert_eq!(game.world.map.highlight_at(TileCoord::new(1, 0, 0)), HighlightState::None);
}

#[test]
fn aimed_strike_kills_and_ends_the_match_in_the_same_tick() {
    let mut game = duel_game(TileCoord::new(1, 0, 0), TileCoord::new(2, 0, 0), 12);
    let invader = game.world.invaders.units[0];

    game.tick(InputSnapshot::click(TileCoord::new(1, 0, 0)));
    game.tick(InputSnapshot::pick_action(0));
    assert_eq!(game.current_state_name(), "aim_action");
    assert_eq!(
        game.world.map.highlight_at(TileCoord::new(2, 0, 0)),
        HighlightState::TargetEnemy
    );

    game.tick(InputSnapshot::default()); // transition-skip tick
    game.tick(InputSnapshot::click(TileCoord::new(2, 0, 0)));

    assert!(game.world.units.get(invader).is_none());
    assert_eq!(game.world.map.unit_at(TileCoord::new(2, 0, 0)), None);
    assert!(game.world.invaders.units.is_empty());
    assert_eq!(game.outcome(), Some(MatchOutcome::Winner(Side::Heroes)));
    assert!(game.log().iter().any(|event| matches!(event, LogEvent::UnitDestroyed { .. })));
    assert!(
        game.log()
            .iter()
            .any(|event| matches!(event, LogEvent::MatchEnded { winner: Side::Heroes }))
    );
}

#[test]
fn clicking_outside_the_aim_pattern_cancels_back_to_selection() {
    let mut game = duel_game(TileCoord::new(1, 0, 0), TileCoord::new(4, 0, 4), 6);

    game.tick(InputSnapshot::click(TileCoord::new(1, 0, 0)));
    game.tick(InputSnapshot::pick_action(0));
    game.tick(InputSnapshot::default());
    assert_eq!(game.world.map.highlight_at(TileCoord::new(2, 0, 0)), HighlightState::Attack);

    game.tick(InputSnapshot::click(TileCoord::new(4, 0, 0)));
    game.tick(InputSnapshot::default());
    assert_eq!(game.current_state_name(), "select_unit");
    assert_eq!(game.world.heroes.selected_action, None);
    assert_eq!(game.world.map.highlight_at(TileCoord::new(2, 0, 0)), HighlightState::None);
    // Nobody was hurt and nothing executed.
    assert!(!game.log().iter().any(|event| matches!(event, LogEvent::ActionExecuted { .. })));
}

#[test]
fn out_of_range_action_index_is_rejected_without_state_change() {
    let mut game = duel_game(TileCoord::new(1, 0, 0), TileCoord::new(4, 0, 4), 6);
    game.tick(InputSnapshot::click(TileCoord::new(1, 0, 0)));
    game.tick(InputSnapshot::pick_action(5));
    assert_eq!(game.current_state_name(), "select_unit");
    assert_eq!(game.world.heroes.selected_action, None);
}

#[test]
fn clicking_an_opposing_unit_does_not_select_it() {
    let mut game = duel_game(TileCoord::new(0, 0, 0), TileCoord::new(4, 0, 4), 6);
    game.tick(InputSnapshot::click(TileCoord::new(4, 0, 4)));
    assert_eq!(game.world.heroes.selected_unit, None);
}

#[test]
fn invader_turn_marches_a_unit_toward_the_hero_and_hands_back_the_turn() {
    let mut game = duel_game(TileCoord::new(0, 0, 0), TileCoord::new(4, 0, 4), 6);
    let brute = game.world.invaders.units[0];

    // Spend the lone hero's action raising terrain so the turn auto-ends.
    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    game.tick(InputSnapshot::pick_action(1));
    game.tick(InputSnapshot::default());
    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 1)));

    assert!(game.world.map.tile_exists(TileCoord::new(0, 1, 1)));
    assert_eq!(game.current_side(), Side::Invaders);
    assert!(game.log().iter().any(|event| matches!(event, LogEvent::TurnEnded { side: Side::Heroes })));

    // Camera pan, march capped at movement range, glide, then turn rotation.
    game.run_idle(120);
    assert_eq!(game.current_side(), Side::Heroes);
    let marched = game.world.units[brute].position;
    assert_eq!(marched.planar_manhattan(TileCoord::new(4, 0, 4)), 3);
    assert!(marched.planar_manhattan(TileCoord::new(0, 0, 0)) < 7);
    // Flags were reset when the invader turn ended.
    assert!(game.world.units[brute].can_move());
    assert!(game.log().iter().any(|event| matches!(event, LogEvent::CameraFocus { .. })));
    assert!(
        game.log()
            .iter()
            .any(|event| matches!(event, LogEvent::TurnEnded { side: Side::Invaders }))
    );
}

#[test]
fn long_range_invaders_hold_their_ground() {
    let mut content = duel_content(6);
    content.invaders[0].reach = EnemyReach::LongRange;
    let data = parse_height_map(FLAT_FIVE).expect("flat board parses");
    let mut game = Game::new(
        7,
        &content,
        &data,
        &[
            StartingPoint {
                template: "slayer",
                side: Side::Heroes,
                position: TileCoord::new(0, 0, 0),
            },
            StartingPoint {
                template: "brute",
                side: Side::Invaders,
                position: TileCoord::new(4, 0, 4),
            },
        ],
    );
    let watcher = game.world.invaders.units[0];

    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    game.tick(InputSnapshot::pick_action(1));
    game.tick(InputSnapshot::default());
    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 1)));
    assert_eq!(game.current_side(), Side::Invaders);

    game.run_idle(120);
    assert_eq!(game.current_side(), Side::Heroes);
    assert_eq!(game.world.units[watcher].position, TileCoord::new(4, 0, 4));
}

#[test]
fn demo_setup_spawns_both_rosters_and_hashes_deterministically() {
    let mut game = Game::demo(42);
    assert_eq!(game.world.heroes.units.len(), 3);
    assert_eq!(game.world.invaders.units.len(), 3);

    game.tick(InputSnapshot::default());
    assert_eq!(game.current_state_name(), "select_unit");

    let mut twin = Game::demo(42);
    twin.tick(InputSnapshot::default());
    assert_eq!(game.snapshot_hash(), twin.snapshot_hash());

    let mut other_seed = Game::demo(43);
    other_seed.tick(InputSnapshot::default());
    assert_ne!(game.snapshot_hash(), other_seed.snapshot_hash());
}

#[test]
fn unknown_spawn_template_is_logged_and_skipped() {
    let content = duel_content(6);
    let data = parse_height_map(FLAT_FIVE).expect("flat board parses");
    let game = Game::new(
        7,
        &content,
        &data,
        &[StartingPoint {
            template: "no_such_template",
            side: Side::Heroes,
            position: TileCoord::new(0, 0, 0),
        }],
    );
    assert!(game.world.heroes.units.is_empty());
    assert!(
        game.log()
            .iter()
            .any(|event| matches!(event, LogEvent::UnknownTemplate { key: "no_such_template" }))
    );
}
