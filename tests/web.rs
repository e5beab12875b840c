// Browser-side checks, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use zigzag_stairs::{StairGame, wasm_start};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn new_game_starts_running() {
    let game = StairGame::new(Some(7)).expect("reference config");
    assert_eq!(game.score(), 0);
    assert_eq!(game.state(), "running");
    assert_eq!(game.facing(), "right");
    assert_eq!(game.outcome(), None);
    assert_eq!(game.banner(), None);
}

#[wasm_bindgen_test]
fn first_input_goes_through() {
    let mut game = StairGame::new(Some(7)).expect("reference config");
    let report = game.advance().expect("serializable").expect("gate open");
    assert!(report.contains("\"score\":"));
    assert!(game.outcome().is_some());
    assert!(game.is_busy());
}

#[wasm_bindgen_test]
fn reset_reopens_the_gate() {
    let mut game = StairGame::new(Some(7)).expect("reference config");
    game.advance().expect("serializable");
    assert_eq!(game.advance().expect("serializable"), None);
    let fresh = game.reset().expect("serializable");
    assert_eq!(fresh, r#"{"outcome":null,"facing":"right","score":0,"state":"running"}"#);
    assert_eq!(game.state(), "running");
    assert_eq!(game.score(), 0);
    assert!(game.turn().expect("serializable").is_some());
}

#[wasm_bindgen_test]
fn narrow_lane_is_an_error() {
    assert!(StairGame::with_config(2, 9, 30, Some(1)).is_err());
}

#[wasm_bindgen_test]
fn window_json_lists_visible_steps() {
    let game = StairGame::new(Some(11)).expect("reference config");
    let json = game.window_json().expect("serializable");
    assert!(json.starts_with('['));
    assert_eq!(json.matches("\"ordinal\"").count(), 9);
    assert!(json.starts_with(r#"[{"ordinal":0,"#));
}

#[wasm_bindgen_test]
fn second_start_keeps_the_console_logger() {
    wasm_start();
    wasm_start();
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
}
