//! Engine facade tests - the new game / activate / restart interface and
//! observer dispatch.

use tui_match3::core::{find_all_matches, EngineError, GameConfig, GameEvent};
use tui_match3::engine::{Engine, EventLog};
use tui_match3::types::Coord;

fn small_config(moves: u32) -> GameConfig {
    GameConfig {
        board_size: 5,
        initial_moves: moves,
        ..GameConfig::default()
    }
    .with_kind_count(4)
}

/// Swap pairs across the board until `moves` swaps have been committed.
fn spend_moves(engine: &mut Engine, moves: u32) {
    let mut spent = 0;
    'outer: for row in 0..5u8 {
        for col in 0..4u8 {
            engine.activate_tile(Coord::new(row, col)).unwrap();
            let t = engine.activate_tile(Coord::new(row, col + 1)).unwrap();
            if t
                .iter()
                .any(|t| matches!(t.event, GameEvent::SwapCommitted { .. }))
            {
                spent += 1;
                if spent == moves {
                    break 'outer;
                }
            }
        }
    }
    assert_eq!(spent, moves);
}

#[test]
fn new_game_returns_settled_snapshot() {
    let mut engine = Engine::new(2024);
    let snap = engine.new_game(GameConfig::default()).unwrap();

    assert_eq!(snap.size, 8);
    assert_eq!(snap.board.len(), 8);
    assert!(snap.board.iter().all(|row| row.len() == 8));
    assert!(snap.board.iter().flatten().all(|c| c.is_some()));
    assert_eq!(snap.score, 0);
    assert_eq!(snap.moves_remaining, 20);
    assert_eq!(snap.selected, None);
    assert!(snap.playable());
    assert!(find_all_matches(engine.state().unwrap().board()).is_empty());
}

#[test]
fn new_game_rejects_invalid_config() {
    let mut engine = Engine::new(1);
    let config = GameConfig {
        tile_types: vec!["a".into(), "b".into()],
        ..GameConfig::default()
    };
    assert!(matches!(
        engine.new_game(config),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(engine.snapshot().is_none());
}

#[test]
fn out_of_bounds_activation_is_an_error_without_effect() {
    let mut engine = Engine::new(3);
    engine.new_game(small_config(5)).unwrap();
    engine.activate_tile(Coord::new(1, 1)).unwrap();

    let err = engine.activate_tile(Coord::new(0, 5)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidCoordinate { size: 5, .. }));
    assert_eq!(engine.snapshot().unwrap().selected, Some(Coord::new(1, 1)));
}

#[test]
fn diagonal_pick_moves_selection() {
    let mut engine = Engine::new(4);
    engine.new_game(GameConfig::default()).unwrap();
    engine.activate_tile(Coord::new(2, 2)).unwrap();
    let t = engine.activate_tile(Coord::new(3, 3)).unwrap();

    assert!(t
        .iter()
        .all(|t| !matches!(t.event, GameEvent::SwapCommitted { .. })));
    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.selected, Some(Coord::new(3, 3)));
    assert_eq!(snap.moves_remaining, 20);
}

#[test]
fn same_seed_same_transitions() {
    let run = || {
        let mut engine = Engine::new(555);
        engine.new_game(small_config(10)).unwrap();
        let mut all = Vec::new();
        for (a, b) in [((0, 0), (0, 1)), ((2, 2), (3, 2)), ((4, 4), (4, 3))] {
            all.extend(engine.activate_tile(Coord::new(a.0, a.1)).unwrap());
            all.extend(engine.activate_tile(Coord::new(b.0, b.1)).unwrap());
        }
        (all, engine.snapshot())
    };
    assert_eq!(run(), run());
}

#[test]
fn game_over_reported_once_then_restart_unlocks() {
    let mut engine = Engine::new(8);
    let log = EventLog::new();
    engine.subscribe(Box::new(log.clone()));
    engine.new_game(small_config(2)).unwrap();

    spend_moves(&mut engine, 2);
    let snap = engine.snapshot().unwrap();
    assert!(snap.game_over);
    assert_eq!(snap.moves_remaining, 0);

    // Locked: clicks produce nothing.
    assert!(engine.activate_tile(Coord::new(0, 0)).unwrap().is_empty());
    let game_overs = log
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    let snap = engine.restart().unwrap();
    assert!(!snap.game_over);
    assert_eq!(snap.moves_remaining, 2);
    assert_eq!(snap.score, 0);
    assert_eq!(log.names().last(), Some(&"gameStarted"));
    assert!(!engine.activate_tile(Coord::new(0, 0)).unwrap().is_empty());
}

#[test]
fn transitions_serialize_for_collaborators() {
    let mut engine = Engine::new(6);
    let log = EventLog::new();
    engine.subscribe(Box::new(log.clone()));
    engine.new_game(small_config(5)).unwrap();

    let started = &log.transitions()[0];
    let json = serde_json::to_value(started).unwrap();
    assert_eq!(json["event"]["type"], "gameStarted");
    assert_eq!(json["changes"].as_array().map(|a| a.len()), Some(25));
    assert_eq!(json["movesRemaining"], 5);
    assert_eq!(json["terminal"], false);
    assert_eq!(json["hintMs"], 500);
}
