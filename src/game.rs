use log::{info, warn};

use crate::ai::search::Searcher;
use crate::board::Board;
use crate::error::GameError;
use crate::save::SavedGame;
use crate::types::{BOARD_SIZE, EMPTY, GameResult, GameState, Location, PlayerId};

pub const DEFAULT_LEVEL: u8 = 3;

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, me: PlayerId, enemy: PlayerId) -> Option<Location>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, me: PlayerId, _enemy: PlayerId) -> Option<Location> {
        board.legal_moves(me).into_iter().next()
    }
}

/// Computer opponent backed by minimax search to a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct ComputerPlayer {
    max_depth: u8,
}

impl ComputerPlayer {
    pub fn new(max_depth: u8) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl MoveSelector for ComputerPlayer {
    fn select_move(&self, board: &Board, me: PlayerId, enemy: PlayerId) -> Option<Location> {
        Searcher::new(self.max_depth).best_move(board, me, enemy)
    }
}

pub enum Controller {
    /// Moves arrive through [`Game::play`].
    Human,
    Computer(Box<dyn MoveSelector>),
}

pub struct Seat {
    id: PlayerId,
    controller: Controller,
}

impl Seat {
    pub fn human(id: PlayerId) -> Self {
        Self {
            id,
            controller: Controller::Human,
        }
    }

    pub fn computer(id: PlayerId, selector: impl MoveSelector + 'static) -> Self {
        Self {
            id,
            controller: Controller::Computer(Box::new(selector)),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human)
    }
}

/// Outcome of one call to [`Game::step`] or [`Game::play`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Moved {
        player: PlayerId,
        location: Location,
        flipped: Vec<Location>,
    },
    Skipped {
        player: PlayerId,
    },
    GameOver,
}

pub struct Game {
    board: Board,
    seats: [Seat; 2],
    current: usize,
    time_limit: u32,
    last_skipped: bool,
    is_over: bool,
    is_pass: bool,
    flipped: Vec<Location>,
}

impl Game {
    /// Starts from the opening position with `first` to move.
    pub fn new(first: Seat, second: Seat, time_limit: u32) -> Result<Self, GameError> {
        let board = Board::opening(first.id, second.id);
        Self::with_board(first, second, time_limit, board, 0)
    }

    /// Restores a snapshot, replacing the 1/2 placeholders with the seat ids.
    /// Cells outside 0..=2 are rejected.
    pub fn from_saved(saved: &SavedGame, first: Seat, second: Seat) -> Result<Self, GameError> {
        for (row, cells) in saved.cells.iter().enumerate() {
            if let Some(bad) = cells.iter().find(|&&cell| cell > 2) {
                return Err(GameError::Parse {
                    line: row + 1,
                    reason: format!("invalid cell value {bad}"),
                });
            }
        }

        let (first_id, second_id) = (first.id, second.id);
        let board = Board::from_rows(saved.cells.map(|row| row.map(PlayerId::from)))
            .map_owners(|cell| match cell {
                1 => first_id,
                2 => second_id,
                _ => EMPTY,
            });
        let current = if saved.to_move == 2 { 1 } else { 0 };
        Self::with_board(first, second, saved.time_limit, board, current)
    }

    fn with_board(
        first: Seat,
        second: Seat,
        time_limit: u32,
        board: Board,
        current: usize,
    ) -> Result<Self, GameError> {
        if first.id == EMPTY || second.id == EMPTY || first.id == second.id {
            return Err(GameError::InvalidPlayerIds);
        }

        Ok(Self {
            board,
            seats: [first, second],
            current,
            time_limit,
            last_skipped: false,
            is_over: false,
            is_pass: false,
            flipped: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> PlayerId {
        self.seats[self.current].id
    }

    pub fn enemy_player(&self) -> PlayerId {
        self.seats[1 - self.current].id
    }

    pub fn current_seat(&self) -> &Seat {
        &self.seats[self.current]
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    /// Cells changed by the last move, placed disk included.
    pub fn flipped(&self) -> &[Location] {
        &self.flipped
    }

    pub fn legal_moves(&self) -> Vec<Location> {
        self.board.legal_moves(self.current_player())
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_legal_move(self.current_player())
    }

    /// Plays `(row, col)` for the side to move, which must be a human seat.
    pub fn play(&mut self, row: u8, col: u8) -> Result<Turn, GameError> {
        if self.is_over {
            return Err(GameError::GameOver);
        }
        if !self.current_seat().is_human() {
            return Err(GameError::NotHumanTurn(self.current_player()));
        }
        let location = checked_location(row, col)?;
        if !self.legal_moves().contains(&location) {
            return Err(GameError::IllegalMove { row, col });
        }

        Ok(self.apply_move(location))
    }

    /// Advances the game by one turn.
    ///
    /// A side without legal moves is skipped; a second consecutive skip ends
    /// the game. Computer seats select and play their move here, human seats
    /// report [`GameError::AwaitingHumanMove`].
    pub fn step(&mut self) -> Result<Turn, GameError> {
        if self.is_over {
            return Err(GameError::GameOver);
        }

        let me = self.current_player();
        if !self.has_legal_moves_for_current() {
            if self.last_skipped {
                info!("player {me} has no legal moves after a skip; game over");
                self.is_over = true;
                return Ok(Turn::GameOver);
            }

            info!("player {me} has no legal moves; skipping turn");
            self.last_skipped = true;
            self.is_pass = true;
            self.flipped.clear();
            self.current = 1 - self.current;
            return Ok(Turn::Skipped { player: me });
        }

        let enemy = self.enemy_player();
        let selected = match &self.seats[self.current].controller {
            Controller::Human => return Err(GameError::AwaitingHumanMove(me)),
            Controller::Computer(selector) => selector.select_move(&self.board, me, enemy),
        };

        let location = selected.ok_or(GameError::NoMoveSelected(me))?;
        if !self.legal_moves().contains(&location) {
            warn!("player {me} selected illegal move {location:?}");
            return Err(GameError::IllegalMove {
                row: location.row,
                col: location.col,
            });
        }

        Ok(self.apply_move(location))
    }

    /// Steps until the game is over. Fails on a human seat.
    pub fn run_to_end(&mut self) -> Result<GameResult, GameError> {
        while !self.is_over {
            self.step()?;
        }
        Ok(self.to_game_result())
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.board.to_array().to_vec(),
            player_ids: self.player_ids(),
            current_player: self.current_player(),
            counts: self.counts(),
            is_game_over: self.is_over,
            is_pass: self.is_pass,
            flipped: self.flipped.iter().map(|loc| loc.index() as u8).collect(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let [first, second] = self.counts();
        let [first_id, second_id] = self.player_ids();
        GameResult {
            winner: if first > second {
                Some(first_id)
            } else if second > first {
                Some(second_id)
            } else {
                None
            },
            player_ids: [first_id, second_id],
            counts: [first, second],
        }
    }

    /// Snapshot with seat placeholders in place of runtime ids.
    pub fn to_saved(&self) -> SavedGame {
        let [first_id, second_id] = self.player_ids();
        let mut cells = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for (loc, owner) in self.board.cells() {
            cells[loc.row as usize][loc.col as usize] = if owner == first_id {
                1
            } else if owner == second_id {
                2
            } else {
                0
            };
        }
        SavedGame {
            cells,
            to_move: self.current as u8 + 1,
            time_limit: self.time_limit,
        }
    }

    fn player_ids(&self) -> [PlayerId; 2] {
        [self.seats[0].id, self.seats[1].id]
    }

    fn counts(&self) -> [u8; 2] {
        [
            self.board.count(self.seats[0].id),
            self.board.count(self.seats[1].id),
        ]
    }

    fn apply_move(&mut self, location: Location) -> Turn {
        let me = self.current_player();
        let enemy = self.enemy_player();

        let changed = self.board.changed_pieces(location, me, enemy);
        self.board = self.board.with_flips(&changed, me);

        let mut flipped = changed;
        flipped.sort();
        flipped.dedup();
        self.flipped = flipped;

        self.last_skipped = false;
        self.is_pass = false;
        self.current = 1 - self.current;

        if self.board.empty_count() == 0 {
            info!("board is full; game over");
            self.is_over = true;
        }

        Turn::Moved {
            player: me,
            location,
            flipped: self.flipped.clone(),
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current: usize) {
        self.board = board;
        self.current = current;
        self.is_over = false;
        self.is_pass = false;
        self.last_skipped = false;
        self.flipped.clear();
    }
}

fn checked_location(row: u8, col: u8) -> Result<Location, GameError> {
    if row as usize >= BOARD_SIZE || col as usize >= BOARD_SIZE {
        return Err(GameError::OutOfRange { row, col });
    }
    Ok(Location::new(row, col))
}
