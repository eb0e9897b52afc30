use core::content::{ActionTemplate, ContentPack, UnitTemplate};
use core::game::StartingPoint;
use core::{
    ActionKind, ActionShape, EnemyReach, Game, InputSnapshot, LogEvent, MatchOutcome, Side,
    TileCoord, parse_height_map,
};

fn duel_content() -> ContentPack {
    ContentPack {
        heroes: vec![UnitTemplate {
            id: "duelist",
            display_name: "Duelist",
            max_health: 12,
            movement_range: 3,
            reach: EnemyReach::ShortRange,
            actions: vec![ActionTemplate {
                name: "Strike",
                damage: 10,
                shape: ActionShape::Adjacent,
                range: 1,
                kind: ActionKind::Strike,
            }],
        }],
        invaders: vec![UnitTemplate {
            id: "raider",
            display_name: "Raider",
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

fn duel_game(seed: u64) -> Game {
    let content = duel_content();
    let data = parse_height_map("11111\n11111\n11111\n11111\n11111\n").expect("board parses");
    Game::new(
        seed,
        &content,
        &data,
        &[
            StartingPoint {
                template: "duelist",
                side: Side::Heroes,
                position: TileCoord::new(1, 0, 0),
            },
            StartingPoint {
                template: "raider",
                side: Side::Invaders,
                position: TileCoord::new(2, 0, 0),
            },
        ],
    )
}

#[test]
fn scripted_duel_runs_to_a_heroes_victory() {
    let mut game = duel_game(7);

    game.tick(InputSnapshot::click(TileCoord::new(1, 0, 0)));
    game.tick(InputSnapshot::pick_action(0));
    game.tick(InputSnapshot::default());
    game.tick(InputSnapshot::click(TileCoord::new(2, 0, 0)));

    assert_eq!(game.outcome(), Some(MatchOutcome::Winner(Side::Heroes)));
    assert!(game.snapshot_hash() != 0);
    assert!(
        game.log()
            .iter()
            .any(|event| matches!(event, LogEvent::MatchEnded { winner: Side::Heroes }))
    );
    // The raider left both the board and its owner's roster.
    assert!(game.world().invaders.units.is_empty());
    assert_eq!(game.world().map.unit_at(TileCoord::new(2, 0, 0)), None);
}

#[test]
fn finished_matches_ignore_further_input() {
    let mut game = duel_game(7);
    game.tick(InputSnapshot::click(TileCoord::new(1, 0, 0)));
    game.tick(InputSnapshot::pick_action(0));
    game.tick(InputSnapshot::default());
    game.tick(InputSnapshot::click(TileCoord::new(2, 0, 0)));
    let decided_at = game.current_tick();
    let hash = game.snapshot_hash();

    game.tick(InputSnapshot::click(TileCoord::new(0, 0, 0)));
    game.run_idle(20);
    assert_eq!(game.current_tick(), decided_at);
    assert_eq!(game.snapshot_hash(), hash);
}

#[test]
fn idle_demo_matches_stay_in_the_first_human_turn() {
    let mut a = Game::demo(1);
    let mut b = Game::demo(2);
    for _ in 0..120 {
        a.tick(InputSnapshot::default());
        b.tick(InputSnapshot::default());
    }
    // Nobody acted, so both matches still sit in the first human turn.
    assert_eq!(a.current_side(), Side::Heroes);
    assert_eq!(b.current_side(), Side::Heroes);
    assert_eq!(a.world().heroes.units.len(), 3);
    assert_eq!(b.world().heroes.units.len(), 3);
}
