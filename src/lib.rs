use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod error;
pub mod game;
pub mod save;
pub mod types;

pub use board::Board;
pub use error::GameError;
pub use game::{ComputerPlayer, Game, MoveSelector, Seat, Turn};
pub use types::{Direction, Location, PlayerId};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
