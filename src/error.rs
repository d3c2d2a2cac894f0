use thiserror::Error;

use crate::types::PlayerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },
    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },
    #[error("player {0} is a computer and moves through step")]
    NotHumanTurn(PlayerId),
    #[error("player {0} is human and has to move")]
    AwaitingHumanMove(PlayerId),
    #[error("player {0} could not select a move")]
    NoMoveSelected(PlayerId),
    #[error("player ids must be distinct and non-zero")]
    InvalidPlayerIds,
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
