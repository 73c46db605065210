use tile_blast_core::{
    BoosterKind, Command, DestructionOrigin, Event, GameConfig, Position, SpecialKind, TileState,
};
use tile_blast_system_boosters::ActivationError;
use tile_blast_system_gameplay::{Gameplay, Request};
use tile_blast_world::{self as world, query, scaffolding, World};

const CHECKER: [&str; 8] = [
    "BGBGBGBG", "GBGBGBGB", "BGBGBGBG", "GBGBGBGB", "BGBGBGBG", "GBGBGBGB", "BGBGBGBG",
    "GBGBGBGB",
];

fn world_with(rows: &[&str]) -> World {
    let mut world = World::new();
    scaffolding::load_layout(&mut world, rows);
    world
}

fn submit(gameplay: &mut Gameplay, world: &World, request: Request) -> Vec<Command> {
    let mut commands = Vec::new();
    gameplay
        .handle_request(request, query::grid_view(world), &mut commands, &mut Vec::new())
        .expect("request accepted");
    commands
}

fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn click(x: u32, y: u32) -> Request {
    Request::TileClicked {
        position: Position::new(x, y),
    }
}

#[test]
fn clicking_a_red_triple_burns_exactly_that_group() {
    let mut rows = CHECKER;
    rows[0] = "RRRGBGBG";
    let mut world = world_with(&rows);
    let mut gameplay = Gameplay::new();
    let below = query::tile_at(&world, Position::new(0, 1)).expect("tile below");

    let commands = submit(&mut gameplay, &world, click(0, 0));

    let Some(Command::Burn { positions, origin }) = commands.first() else {
        panic!("expected a burn, got {commands:?}");
    };
    assert_eq!(*origin, DestructionOrigin::Match);
    assert_eq!(positions.first(), Some(&Position::new(0, 0)));
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(
        sorted,
        vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
    );
    assert_eq!(
        &commands[1..],
        &[Command::ApplyGravity, Command::Refill, Command::Settle]
    );

    let events = run(&mut world, commands);

    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::SuperTileSpawned { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::MoveConsumed))
            .count(),
        1
    );
    assert_eq!(query::grid_view(&world).occupied_count(), 64);
    let after = query::tile_at(&world, Position::new(0, 1)).expect("tile below");
    assert_eq!(after.id(), below.id());
}

#[test]
fn group_of_five_spawns_a_line_clear_at_the_clicked_cell() {
    let mut rows = CHECKER;
    rows[7] = "RRRRRBGB";
    let mut world = world_with(&rows);
    let mut gameplay = Gameplay::new();

    let commands = submit(&mut gameplay, &world, click(2, 7));
    let events = run(&mut world, commands);

    let spawned: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::SuperTileSpawned { position, kind, .. } => Some((*position, *kind)),
            _ => None,
        })
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].0, Position::new(2, 7));
    assert!(matches!(
        spawned[0].1,
        SpecialKind::RowClear | SpecialKind::ColumnClear
    ));
    let tile = query::tile_at(&world, Position::new(2, 7)).expect("super tile in place");
    assert_eq!(tile.kind().special(), Some(spawned[0].1));
}

#[test]
fn isolated_tile_click_is_a_no_op() {
    let world = world_with(&CHECKER);
    let mut gameplay = Gameplay::new();

    assert!(submit(&mut gameplay, &world, click(3, 3)).is_empty());
}

#[test]
fn out_of_range_and_empty_clicks_are_ignored() {
    let world = world_with(&["BB.", "GBG"]);
    let mut gameplay = Gameplay::new();

    assert!(submit(&mut gameplay, &world, click(2, 0)).is_empty());
    assert!(submit(&mut gameplay, &world, click(9, 9)).is_empty());
}

#[test]
fn clicks_on_moving_tiles_are_ignored() {
    let mut world = world_with(&["BBG", "GBG"]);
    scaffolding::set_state(&mut world, Position::new(0, 0), TileState::Falling);
    let mut gameplay = Gameplay::new();

    assert!(submit(&mut gameplay, &world, click(0, 0)).is_empty());
    assert!(!submit(&mut gameplay, &world, click(1, 1)).is_empty());
}

#[test]
fn super_tile_click_detonates_instead_of_matching() {
    let mut rows = CHECKER;
    rows[3] = "GBG+GBGB";
    let mut world = world_with(&rows);
    let mut gameplay = Gameplay::new();

    let commands = submit(&mut gameplay, &world, click(3, 3));
    assert_eq!(
        commands,
        vec![
            Command::TriggerSuperTile {
                position: Position::new(3, 3),
            },
            Command::ApplyGravity,
            Command::Refill,
            Command::Settle,
        ]
    );

    let events = run(&mut world, commands);
    let destroyed = events.iter().find_map(|event| match event {
        Event::TilesDestroyed { positions, .. } => Some(positions.len()),
        _ => None,
    });
    assert_eq!(destroyed, Some(15));
    assert!(!events.contains(&Event::MoveConsumed));
    assert_eq!(query::grid_view(&world).occupied_count(), 64);
}

#[test]
fn armed_booster_captures_clicks_meant_for_matching() {
    let mut rows = CHECKER;
    rows[0] = "RRRGBGBG";
    let world = world_with(&rows);
    let mut gameplay = Gameplay::new();

    let _ = submit(
        &mut gameplay,
        &world,
        Request::ActivateBooster {
            kind: BoosterKind::Teleport,
        },
    );
    let commands = submit(&mut gameplay, &world, click(0, 0));

    assert!(commands.is_empty());
    assert_eq!(gameplay.boosters().selection(), &[Position::new(0, 0)]);

    let _ = submit(&mut gameplay, &world, Request::CancelBooster);
    let commands = submit(&mut gameplay, &world, click(0, 0));
    assert!(matches!(commands.first(), Some(Command::Burn { .. })));
}

#[test]
fn bomb_click_burns_without_spending_a_move() {
    let mut world = world_with(&CHECKER);
    let mut gameplay = Gameplay::new();

    let _ = submit(
        &mut gameplay,
        &world,
        Request::ActivateBooster {
            kind: BoosterKind::Bomb,
        },
    );
    let commands = submit(&mut gameplay, &world, click(4, 4));
    let events = run(&mut world, commands);

    assert_eq!(
        events.first(),
        Some(&Event::TilesDestroyed {
            positions: query::field_size(&world).square_around(Position::new(4, 4), 1),
            origin: DestructionOrigin::Booster,
        })
    );
    assert!(!events.contains(&Event::MoveConsumed));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::SuperTileSpawned { .. })));
}

#[test]
fn second_activation_surfaces_the_refusal() {
    let world = World::new();
    let mut gameplay = Gameplay::new();
    let _ = submit(
        &mut gameplay,
        &world,
        Request::ActivateBooster {
            kind: BoosterKind::Bomb,
        },
    );

    let mut commands = Vec::new();
    let mut events = Vec::new();
    let refused = gameplay.handle_request(
        Request::ActivateBooster {
            kind: BoosterKind::Bomb,
        },
        query::grid_view(&world),
        &mut commands,
        &mut events,
    );

    assert_eq!(
        refused,
        Err(ActivationError::AlreadyArmed {
            armed: BoosterKind::Bomb,
        })
    );
    assert!(commands.is_empty());
    assert!(events.is_empty());
}

#[test]
fn new_game_and_shuffle_pass_through_and_reset_boosters() {
    let mut world = World::new();
    let mut gameplay = Gameplay::new();
    let config = GameConfig::default();

    let _ = submit(
        &mut gameplay,
        &world,
        Request::ActivateBooster {
            kind: BoosterKind::Bomb,
        },
    );
    assert_eq!(
        submit(&mut gameplay, &world, Request::Shuffle),
        vec![Command::Shuffle]
    );

    let commands = submit(&mut gameplay, &world, Request::NewGame { config });
    assert_eq!(commands, vec![Command::NewGame { config }]);

    let events = run(&mut world, commands);
    let mut booster_events = Vec::new();
    gameplay.handle_events(&events, &mut booster_events);

    assert!(!gameplay.boosters().is_armed());
    assert_eq!(
        booster_events,
        vec![
            Event::BoosterStateChanged {
                kind: BoosterKind::Bomb,
                remaining_uses: 3,
                armed: false,
            },
            Event::BoosterStateChanged {
                kind: BoosterKind::Teleport,
                remaining_uses: 5,
                armed: false,
            },
        ]
    );
}
