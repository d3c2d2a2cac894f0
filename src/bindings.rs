//! WebAssembly entry points. One game session lives in a process-wide slot.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::{ComputerPlayer, Game, Seat};
use crate::save::SavedGame;
use crate::types::PlayerId;

pub const HUMAN_ID: PlayerId = 1;
pub const COMPUTER_ID: PlayerId = 2;

static SESSION: Lazy<Mutex<Option<Game>>> = Lazy::new(|| Mutex::new(None));

/// Starts a new game against the computer searching `level` plies.
#[wasm_bindgen]
pub fn init_game(level: u8, human_first: bool, time_limit: u32) -> Result<JsValue, JsValue> {
    let game = new_session(level, human_first, time_limit).map_err(to_js_error)?;
    let state = game.to_game_state();
    replace_session(game)?;
    to_js(&state)
}

/// Restores a game from the text snapshot format; seat 1 is the human.
#[wasm_bindgen]
pub fn load_game(text: &str, level: u8) -> Result<JsValue, JsValue> {
    let game = load_session(text, level).map_err(to_js_error)?;
    let state = game.to_game_state();
    replace_session(game)?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn save_game() -> Result<String, JsValue> {
    with_session(|game| Ok(game.to_saved().to_string()))
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    let state = with_session(|game| Ok(game.to_game_state()))?;
    to_js(&state)
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    let moves = with_session(|game| Ok(game.legal_moves()))?;
    to_js(&moves)
}

/// Human move for the side to move.
#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    let state = with_session(|game| {
        game.play(row, col)?;
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}

/// Lets the computer move, or skips a side without legal moves.
#[wasm_bindgen]
pub fn advance() -> Result<JsValue, JsValue> {
    let state = with_session(|game| {
        game.step()?;
        Ok(game.to_game_state())
    })?;
    to_js(&state)
}

/// Current piece counts and winner; final once the game is over.
#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    let result = with_session(|game| Ok(game.to_game_result()))?;
    to_js(&result)
}

pub fn new_session(level: u8, human_first: bool, time_limit: u32) -> Result<Game, GameError> {
    let human = Seat::human(HUMAN_ID);
    let computer = Seat::computer(COMPUTER_ID, ComputerPlayer::new(level));
    if human_first {
        Game::new(human, computer, time_limit)
    } else {
        Game::new(computer, human, time_limit)
    }
}

pub fn load_session(text: &str, level: u8) -> Result<Game, GameError> {
    let saved: SavedGame = text.parse()?;
    Game::from_saved(
        &saved,
        Seat::human(HUMAN_ID),
        Seat::computer(COMPUTER_ID, ComputerPlayer::new(level)),
    )
}

fn replace_session(game: Game) -> Result<(), JsValue> {
    let mut slot = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("game session lock poisoned"))?;
    *slot = Some(game);
    Ok(())
}

fn with_session<T>(f: impl FnOnce(&mut Game) -> Result<T, GameError>) -> Result<T, JsValue> {
    let mut slot = SESSION
        .lock()
        .map_err(|_| JsValue::from_str("game session lock poisoned"))?;
    let game = slot
        .as_mut()
        .ok_or_else(|| JsValue::from_str("game is not initialized"))?;
    f(game).map_err(to_js_error)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
