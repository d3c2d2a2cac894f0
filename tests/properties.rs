use othello_minimax::ai::{heuristic, minimax};
use othello_minimax::save::SavedGame;
use othello_minimax::types::{BOARD_SIZE, EMPTY};
use othello_minimax::{Board, Game, Location, PlayerId, Seat, Turn};
use proptest::prelude::*;

const A: PlayerId = 3;
const B: PlayerId = 8;

/// Plays random legal moves from the opening, skipping a side without moves.
fn playout(choices: &[usize]) -> (Board, PlayerId) {
    let mut board = Board::opening(A, B);
    let (mut me, mut enemy) = (A, B);

    for &choice in choices {
        let moves = board.legal_moves(me);
        if moves.is_empty() {
            if !board.has_legal_move(enemy) {
                break;
            }
        } else {
            board = board.play(moves[choice % moves.len()], me, enemy);
        }
        std::mem::swap(&mut me, &mut enemy);
    }

    (board, me)
}

fn reachable_board() -> impl Strategy<Value = (Board, PlayerId)> {
    prop::collection::vec(0usize..64, 0..60).prop_map(|choices| playout(&choices))
}

fn other(id: PlayerId) -> PlayerId {
    if id == A { B } else { A }
}

proptest! {
    #[test]
    fn prop_legal_moves_are_empty_and_unique((board, me) in reachable_board()) {
        let moves = board.legal_moves(me);

        for (i, mv) in moves.iter().enumerate() {
            prop_assert_eq!(board.get(*mv), EMPTY);
            prop_assert!(!moves[i + 1..].contains(mv), "duplicate {:?}", mv);
        }
    }

    #[test]
    fn prop_legal_moves_match_cells_that_capture((board, me) in reachable_board()) {
        let moves = board.legal_moves(me);

        for (loc, owner) in board.cells() {
            let captures = owner == EMPTY && board.changed_pieces(loc, me, other(me)).len() > 1;
            prop_assert_eq!(moves.contains(&loc), captures, "at {:?}", loc);
        }
    }

    #[test]
    fn prop_move_increases_mover_count((board, me) in reachable_board()) {
        let enemy = other(me);
        for mv in board.legal_moves(me) {
            let next = board.play(mv, me, enemy);
            let gained = next.count(me) - board.count(me);

            prop_assert!(gained >= 2);
            prop_assert_eq!(board.count(enemy) - next.count(enemy), gained - 1);
            prop_assert_eq!(next.empty_count() + 1, board.empty_count());
        }
    }

    #[test]
    fn prop_reapplying_flips_is_idempotent((board, me) in reachable_board()) {
        let enemy = other(me);
        for mv in board.legal_moves(me) {
            let changed = board.changed_pieces(mv, me, enemy);
            let once = board.with_flips(&changed, me);

            prop_assert_eq!(once.with_flips(&changed, me), once);
        }
    }

    #[test]
    fn prop_heuristic_is_antisymmetric((board, _me) in reachable_board()) {
        prop_assert_eq!(heuristic(&board, A, B), -heuristic(&board, B, A));
    }

    #[test]
    fn prop_search_at_depth_limit_is_heuristic((board, _me) in reachable_board(), depth in 0u8..4) {
        prop_assert_eq!(minimax(&board, depth, depth, A, B), heuristic(&board, A, B));
    }
}

fn to_saved(board: &Board, to_move: u8) -> SavedGame {
    let mut cells = [[0u8; BOARD_SIZE]; BOARD_SIZE];
    for (loc, owner) in board.cells() {
        cells[loc.row as usize][loc.col as usize] = match owner {
            A => 1,
            B => 2,
            _ => 0,
        };
    }
    SavedGame {
        cells,
        to_move,
        time_limit: 0,
    }
}

#[test]
fn position_without_moves_for_either_side_ends_after_two_skips() {
    // A owns the top row, B the bottom row, nothing can be flanked.
    let mut cells = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
    cells[0] = [A; BOARD_SIZE];
    cells[7] = [B; BOARD_SIZE];
    let board = Board::from_rows(cells);
    assert!(board.legal_moves(A).is_empty());
    assert!(board.legal_moves(B).is_empty());

    let mut game =
        Game::from_saved(&to_saved(&board, 1), Seat::human(A), Seat::human(B)).expect("valid ids");

    assert_eq!(game.step(), Ok(Turn::Skipped { player: A }));
    assert_eq!(game.step(), Ok(Turn::GameOver));
    assert!(game.is_over());
    assert_eq!(game.to_game_result().winner, None);
}

#[test]
fn opening_moves_match_known_set() {
    let board = Board::opening(A, B);
    let mut moves = board.legal_moves(A);
    moves.sort();

    assert_eq!(
        moves,
        vec![
            Location::new(2, 3),
            Location::new(3, 2),
            Location::new(4, 5),
            Location::new(5, 4)
        ]
    );
}
