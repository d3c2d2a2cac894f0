//! Plain-text game snapshot.
//!
//! ```text
//! 0 0 0 0 0 0 0 0
//! ...              (8 rows of 8 cells: 0 = empty, 1/2 = seat placeholder)
//! 1                (seat to move)
//! 30               (time limit)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::types::BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    /// Cells use seat placeholders, not runtime player ids.
    pub cells: [[u8; BOARD_SIZE]; BOARD_SIZE],
    /// 1 or 2.
    pub to_move: u8,
    pub time_limit: u32,
}

impl FromStr for SavedGame {
    type Err = GameError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let mut cells = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            let (line_no, line) = lines.next().ok_or_else(|| GameError::Parse {
                line: row + 1,
                reason: format!("expected {BOARD_SIZE} board rows, found {row}"),
            })?;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != BOARD_SIZE {
                return Err(GameError::Parse {
                    line: line_no,
                    reason: format!("expected {BOARD_SIZE} cells, found {}", tokens.len()),
                });
            }

            for (cell, token) in cells_row.iter_mut().zip(tokens) {
                *cell = match token.parse::<u8>() {
                    Ok(value @ 0..=2) => value,
                    _ => {
                        return Err(GameError::Parse {
                            line: line_no,
                            reason: format!("invalid cell value {token:?}"),
                        });
                    }
                };
            }
        }

        let (line_no, line) = lines.next().ok_or_else(|| GameError::Parse {
            line: BOARD_SIZE + 1,
            reason: "missing side to move".to_string(),
        })?;
        let to_move = match line.parse::<u8>() {
            Ok(value @ 1..=2) => value,
            _ => {
                return Err(GameError::Parse {
                    line: line_no,
                    reason: format!("side to move must be 1 or 2, got {line:?}"),
                });
            }
        };

        let (line_no, line) = lines.next().ok_or_else(|| GameError::Parse {
            line: BOARD_SIZE + 2,
            reason: "missing time limit".to_string(),
        })?;
        let time_limit = line.parse::<u32>().map_err(|err| GameError::Parse {
            line: line_no,
            reason: format!("invalid time limit {line:?}: {err}"),
        })?;

        Ok(Self {
            cells,
            to_move,
            time_limit,
        })
    }
}

impl fmt::Display for SavedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        writeln!(f, "{}", self.to_move)?;
        writeln!(f, "{}", self.time_limit)
    }
}
