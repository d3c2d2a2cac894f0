use log::debug;
use web_time::Instant;

use crate::ai::heuristic::heuristic;
use crate::board::Board;
use crate::types::{Location, PlayerId};

/// Boards reachable by one move of `mover`, in `legal_moves` order.
pub fn children(board: &Board, mover: PlayerId, other: PlayerId) -> Vec<Board> {
    board
        .legal_moves(mover)
        .into_iter()
        .map(|mv| board.play(mv, mover, other))
        .collect()
}

/// Depth-limited minimax without pruning.
///
/// Children are always generated from `enemy`'s moves and the perspective
/// pair is never swapped between plies. Nodes at `max_depth`, or whose
/// child list is empty, are scored with [`heuristic`] on the node itself.
/// A node is maximising when `(depth + 1)` is even, so the root's
/// children (depth 0) form a minimising level.
pub fn minimax(board: &Board, depth: u8, max_depth: u8, current: PlayerId, enemy: PlayerId) -> f64 {
    let mut nodes = 0u64;
    minimax_counted(board, depth, max_depth, current, enemy, &mut nodes)
}

fn minimax_counted(
    board: &Board,
    depth: u8,
    max_depth: u8,
    current: PlayerId,
    enemy: PlayerId,
    nodes: &mut u64,
) -> f64 {
    *nodes += 1;

    if depth >= max_depth {
        return heuristic(board, current, enemy);
    }

    let next = children(board, enemy, current);
    if next.is_empty() {
        return heuristic(board, current, enemy);
    }

    let scores = next
        .iter()
        .map(|child| minimax_counted(child, depth + 1, max_depth, current, enemy, &mut *nodes));

    if (depth + 1) % 2 == 0 {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

/// Root driver: scores every legal move of `current` with [`minimax`] and
/// keeps the best one.
#[derive(Debug, Clone)]
pub struct Searcher {
    max_depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(max_depth: u8) -> Self {
        Self {
            max_depth,
            nodes: 0,
        }
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Nodes visited by the last [`Searcher::best_move`] call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Returns each legal move of `current` with its minimax score, in
    /// `legal_moves` order.
    pub fn score_moves(
        &mut self,
        board: &Board,
        current: PlayerId,
        enemy: PlayerId,
    ) -> Vec<(Location, f64)> {
        let moves = board.legal_moves(current);
        let scored = self.score_children(board, &moves, current, enemy);
        self.nodes = scored.iter().map(|&(_, _, nodes)| nodes).sum();
        scored.into_iter().map(|(mv, score, _)| (mv, score)).collect()
    }

    /// Picks the highest scoring move; ties go to the smaller `(row, col)`.
    /// Returns `None` when `current` has to skip.
    pub fn best_move(&mut self, board: &Board, current: PlayerId, enemy: PlayerId) -> Option<Location> {
        let start = Instant::now();
        let scored = self.score_moves(board, current, enemy);

        let mut best: Option<(Location, f64)> = None;
        for (mv, score) in scored {
            let better = match best {
                None => true,
                Some((best_mv, best_score)) => is_better_move(score, mv, best_score, best_mv),
            };
            if better {
                best = Some((mv, score));
            }
        }

        debug!(
            "minimax depth={} nodes={} elapsed={:?} best={:?}",
            self.max_depth,
            self.nodes,
            start.elapsed(),
            best
        );

        best.map(|(mv, _)| mv)
    }

    #[cfg(not(feature = "parallel"))]
    fn score_children(
        &self,
        board: &Board,
        moves: &[Location],
        current: PlayerId,
        enemy: PlayerId,
    ) -> Vec<(Location, f64, u64)> {
        moves
            .iter()
            .map(|&mv| self.score_child(board, mv, current, enemy))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_children(
        &self,
        board: &Board,
        moves: &[Location],
        current: PlayerId,
        enemy: PlayerId,
    ) -> Vec<(Location, f64, u64)> {
        use rayon::prelude::*;

        // `collect` keeps input order, so the reduction stays deterministic.
        moves
            .par_iter()
            .map(|&mv| self.score_child(board, mv, current, enemy))
            .collect()
    }

    fn score_child(
        &self,
        board: &Board,
        mv: Location,
        current: PlayerId,
        enemy: PlayerId,
    ) -> (Location, f64, u64) {
        let child = board.play(mv, current, enemy);
        let mut nodes = 0u64;
        let score = minimax_counted(&child, 0, self.max_depth, current, enemy, &mut nodes);
        (mv, score, nodes)
    }
}

fn is_better_move(score: f64, mv: Location, best_score: f64, best_move: Location) -> bool {
    score > best_score || (score == best_score && mv < best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::{A, B, board_from};

    #[test]
    fn depth_limit_reached_returns_heuristic_directly() {
        let board = Board::opening(A, B);

        assert_eq!(minimax(&board, 0, 0, A, B), heuristic(&board, A, B));
        assert_eq!(minimax(&board, 3, 3, A, B), heuristic(&board, A, B));
    }

    #[test]
    fn node_without_enemy_moves_is_a_leaf() {
        // B has nothing to flank, so no children exist.
        let board = board_from([
            "AAA.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".......B",
        ]);
        assert!(children(&board, B, A).is_empty());

        let mut nodes = 0;
        let score = minimax_counted(&board, 0, 4, A, B, &mut nodes);

        assert_eq!(score, heuristic(&board, A, B));
        assert_eq!(nodes, 1);
    }

    #[test]
    fn depth_one_takes_minimum_over_enemy_replies() {
        let board = Board::opening(A, B).play(Location::new(2, 3), A, B);

        let expected = children(&board, B, A)
            .iter()
            .map(|child| heuristic(child, A, B))
            .fold(f64::INFINITY, f64::min);

        assert_eq!(minimax(&board, 0, 1, A, B), expected);
    }

    #[test]
    fn depth_two_maximises_over_second_ply() {
        let board = Board::opening(A, B).play(Location::new(2, 3), A, B);

        // The second ply is again generated from B's moves.
        let expected = children(&board, B, A)
            .iter()
            .map(|child| {
                let grand = children(child, B, A);
                if grand.is_empty() {
                    heuristic(child, A, B)
                } else {
                    grand
                        .iter()
                        .map(|g| heuristic(g, A, B))
                        .fold(f64::NEG_INFINITY, f64::max)
                }
            })
            .fold(f64::INFINITY, f64::min);

        assert_eq!(minimax(&board, 0, 2, A, B), expected);
    }

    #[test]
    fn search_visits_every_node_without_pruning() {
        let board = Board::opening(A, B);
        let first = children(&board, B, A);
        let second: usize = first.iter().map(|c| children(c, B, A).len()).sum();

        let mut nodes = 0;
        minimax_counted(&board, 0, 2, A, B, &mut nodes);

        assert_eq!(nodes, 1 + first.len() as u64 + second as u64);
    }

    #[test]
    fn best_move_returns_none_without_legal_moves() {
        let board = board_from([
            "AAA.....",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".......B",
        ]);

        assert_eq!(Searcher::new(2).best_move(&board, B, A), None);
    }

    #[test]
    fn best_move_grabs_an_available_corner() {
        // A can take a1 by flanking b2 with c3, or play elsewhere.
        let board = board_from([
            "........",
            ".B......",
            "..A.....",
            "...BA...",
            "........",
            "........",
            "........",
            "........",
        ]);

        let mut searcher = Searcher::new(0);
        assert_eq!(searcher.max_depth(), 0);
        let mv = searcher.best_move(&board, A, B);

        assert_eq!(mv, Some(Location::new(0, 0)));
        assert!(searcher.nodes() > 0);
    }

    #[test]
    fn best_move_is_legal_and_matches_scored_maximum() {
        let board = Board::opening(A, B);
        let mut searcher = Searcher::new(2);

        let scored = searcher.score_moves(&board, A, B);
        let best = searcher.best_move(&board, A, B).expect("opening has moves");

        let top = scored
            .iter()
            .map(|&(_, s)| s)
            .fold(f64::NEG_INFINITY, f64::max);
        let winners: Vec<_> = scored.iter().filter(|&&(_, s)| s == top).map(|&(m, _)| m).collect();

        assert!(board.legal_moves(A).contains(&best));
        assert_eq!(Some(&best), winners.iter().min());
    }

    #[test]
    fn tie_break_prefers_smaller_location() {
        assert!(is_better_move(1.0, Location::new(5, 5), 0.0, Location::new(0, 0)));
        assert!(is_better_move(1.0, Location::new(2, 3), 1.0, Location::new(3, 2)));
        assert!(!is_better_move(1.0, Location::new(3, 2), 1.0, Location::new(2, 3)));
    }
}
