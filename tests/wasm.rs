#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use othello_minimax::bindings::{advance, get_legal_moves, get_state, init_game, place};
use othello_minimax::wasm_ready;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).expect("field exists")
}

#[wasm_bindgen_test]
fn wasm_ready_returns_true() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn human_move_then_computer_reply() {
    let state = init_game(1, true, 0).expect("init");
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));

    let moves = Array::from(&get_legal_moves().expect("moves"));
    assert_eq!(moves.length(), 4);

    let state = place(2, 3).expect("d3 is legal");
    assert_eq!(field(&state, "current_player").as_f64(), Some(2.0));
    assert_eq!(Array::from(&field(&state, "flipped")).length(), 2);

    let state = advance().expect("computer replies");
    assert_eq!(field(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(Array::from(&field(&state, "board")).length(), 64);

    assert!(place(0, 0).is_err());
    assert!(get_state().is_ok());
}
