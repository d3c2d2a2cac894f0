use crate::board::Board;
use crate::types::{BOARD_SIZE, EMPTY, Location, PlayerId};

/// Positional value of each square. Corners are prized, the squares next
/// to them are penalised.
pub const DISK_SQUARE_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [20, -3, 11, 8, 8, 11, -3, 20],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [20, -3, 11, 8, 8, 11, -3, 20],
];

const PIECE_WEIGHT: f64 = 10.0;
const CORNER_WEIGHT: f64 = 801.724;
const CLOSENESS_WEIGHT: f64 = 382.026;
const MOBILITY_WEIGHT: f64 = 78.922;
const FRONTIER_WEIGHT: f64 = 74.396;
const DISK_SQUARE_WEIGHT: f64 = 10.0;

/// Each corner with the three squares that lead into it.
const CORNERS: [(Location, [Location; 3]); 4] = [
    (
        Location::new(0, 0),
        [Location::new(0, 1), Location::new(1, 1), Location::new(1, 0)],
    ),
    (
        Location::new(0, 7),
        [Location::new(0, 6), Location::new(1, 6), Location::new(1, 7)],
    ),
    (
        Location::new(7, 0),
        [Location::new(7, 1), Location::new(6, 1), Location::new(6, 0)],
    ),
    (
        Location::new(7, 7),
        [Location::new(6, 7), Location::new(6, 6), Location::new(7, 6)],
    ),
];

/// Sub-scores of a position, all from `current`'s perspective.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Features {
    /// Piece count ratio.
    pub piece: f64,
    /// Corners owned.
    pub corner: f64,
    /// Disks next to a still-empty corner.
    pub closeness: f64,
    /// Legal move count ratio.
    pub mobility: f64,
    /// Frontier disk ratio, negated.
    pub frontier: f64,
    /// Positional table sum.
    pub disk_square: f64,
}

impl Features {
    pub fn compute(board: &Board, current: PlayerId, enemy: PlayerId) -> Self {
        let mut my_tiles = 0u32;
        let mut enemy_tiles = 0u32;
        let mut my_front = 0u32;
        let mut enemy_front = 0u32;
        let mut disk_square = 0i32;

        for (loc, owner) in board.cells() {
            let weight = DISK_SQUARE_WEIGHTS[loc.row as usize][loc.col as usize];
            if owner == current {
                disk_square += weight;
                my_tiles += 1;
            } else if owner == enemy {
                disk_square -= weight;
                enemy_tiles += 1;
            }

            if owner != EMPTY && is_frontier(board, loc) {
                if owner == current {
                    my_front += 1;
                } else {
                    enemy_front += 1;
                }
            }
        }

        let mut my_corners = 0i32;
        let mut enemy_corners = 0i32;
        let mut my_close = 0i32;
        let mut enemy_close = 0i32;
        for (corner, approaches) in CORNERS {
            match board.get(corner) {
                owner if owner == current => my_corners += 1,
                owner if owner == enemy => enemy_corners += 1,
                EMPTY => {
                    for loc in approaches {
                        let owner = board.get(loc);
                        if owner == current {
                            my_close += 1;
                        } else if owner == enemy {
                            enemy_close += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        let my_moves = board.legal_moves(current).len() as u32;
        let enemy_moves = board.legal_moves(enemy).len() as u32;

        Self {
            piece: ratio(my_tiles, enemy_tiles),
            corner: 25.0 * f64::from(my_corners - enemy_corners),
            closeness: -12.5 * f64::from(my_close - enemy_close),
            mobility: ratio(my_moves, enemy_moves),
            frontier: -ratio(my_front, enemy_front),
            disk_square: f64::from(disk_square),
        }
    }

    /// Weighted sum of the sub-scores.
    pub fn score(&self) -> f64 {
        (PIECE_WEIGHT * self.piece)
            + (CORNER_WEIGHT * self.corner)
            + (CLOSENESS_WEIGHT * self.closeness)
            + (MOBILITY_WEIGHT * self.mobility)
            + (FRONTIER_WEIGHT * self.frontier)
            + (DISK_SQUARE_WEIGHT * self.disk_square)
    }
}

/// Scores `board` for `current` against `enemy`; positive favours `current`.
pub fn heuristic(board: &Board, current: PlayerId, enemy: PlayerId) -> f64 {
    Features::compute(board, current, enemy).score()
}

/// Share of the larger side in percent, signed towards the side that has it.
/// Equal counts (including 0 vs 0) score 0.
fn ratio(mine: u32, theirs: u32) -> f64 {
    let total = f64::from(mine + theirs);
    if mine > theirs {
        (100.0 * f64::from(mine)) / total
    } else if mine < theirs {
        -(100.0 * f64::from(theirs)) / total
    } else {
        0.0
    }
}

fn is_frontier(board: &Board, loc: Location) -> bool {
    !board.adjacent(loc, EMPTY).is_empty()
}
