use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Owner id stored in a board cell. `EMPTY` marks a free cell; any other
/// value identifies one of the two players.
pub type PlayerId = u32;

pub const EMPTY: PlayerId = 0;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    pub row: u8,
    pub col: u8,
}

impl Location {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Builds a location from signed coordinates, `None` when off the board.
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Neighbouring cell in `dir`, `None` past the edge.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        Self::checked(self.row as i32 + dr, self.col as i32 + dc)
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }
}

/// Compass direction from an anchor cell to one of its eight neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpLeft,
    UpRight,
    Down,
    DownLeft,
    DownRight,
    Left,
    Right,
}

impl Direction {
    /// Fixed scan order used by the adjacency scanner.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major owner ids, 0 = empty.
    pub board: Vec<PlayerId>,
    pub player_ids: [PlayerId; 2],
    pub current_player: PlayerId,
    pub counts: [u8; 2],
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a skipped turn.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: square indices (0..=63) that changed owner, the
    ///   placed disk included.
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<PlayerId>,
    pub player_ids: [PlayerId; 2],
    pub counts: [u8; 2],
}
