use crate::types::{BOARD_SIZE, Direction, EMPTY, Location, NUM_SQUARES, PlayerId};

/// Othello board: an 8x8 grid of owner ids.
///
/// A board is a value. Moves never mutate it in place; they produce a new
/// board, so a single position can be shared between search branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[PlayerId; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the opening position:
    /// d4=second, e4=first, d5=first, e5=second. `first` moves first.
    pub fn opening(first: PlayerId, second: PlayerId) -> Self {
        let mut cells = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = second;
        cells[3][4] = first;
        cells[4][3] = first;
        cells[4][4] = second;
        Self { cells }
    }

    pub fn from_rows(cells: [[PlayerId; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[PlayerId; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, loc: Location) -> PlayerId {
        self.cells[loc.row as usize][loc.col as usize]
    }

    /// Every cell with its owner, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Location, PlayerId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &owner)| (Location::new(row as u8, col as u8), owner))
        })
    }

    /// Returns the number of cells owned by `id`.
    pub fn count(&self, id: PlayerId) -> u8 {
        self.cells().filter(|&(_, owner)| owner == id).count() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.count(EMPTY)
    }

    /// Flat row-major copy of the owner ids.
    pub fn to_array(&self) -> [PlayerId; NUM_SQUARES] {
        let mut out = [EMPTY; NUM_SQUARES];
        for (loc, owner) in self.cells() {
            out[loc.index()] = owner;
        }
        out
    }

    /// Returns a copy with every owner id passed through `f`.
    pub fn map_owners(&self, f: impl Fn(PlayerId) -> PlayerId) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut().flatten() {
            *cell = f(*cell);
        }
        Self { cells }
    }

    /// Neighbours of `anchor` owned by `target` (which may be `EMPTY`),
    /// each tagged with the direction from `anchor`. Scans in
    /// `Direction::ALL` order.
    pub fn adjacent(&self, anchor: Location, target: PlayerId) -> Vec<(Location, Direction)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| anchor.step(dir).map(|loc| (loc, dir)))
            .filter(|&(loc, _)| self.get(loc) == target)
            .collect()
    }

    /// Empty cells where `id` may place a disk, without duplicates.
    ///
    /// Works from the opponent's disks outward: for every empty neighbour of
    /// an opponent disk, the line is followed from that disk away from the
    /// empty cell. Reaching one of `id`'s disks before an empty cell or the
    /// edge makes the empty neighbour legal. An empty result means `id` has
    /// to skip.
    pub fn legal_moves(&self, id: PlayerId) -> Vec<Location> {
        let mut legal: Vec<Location> = Vec::new();

        let anchors = self
            .cells()
            .filter(|&(_, owner)| owner != EMPTY && owner != id);

        for (anchor, _) in anchors {
            for (candidate, dir) in self.adjacent(anchor, EMPTY) {
                if legal.contains(&candidate) {
                    continue;
                }

                let back = dir.opposite();
                let mut cursor = anchor.step(back);
                while let Some(loc) = cursor {
                    let owner = self.get(loc);
                    if owner == EMPTY {
                        break;
                    }
                    if owner == id {
                        legal.push(candidate);
                        break;
                    }
                    cursor = loc.step(back);
                }
            }
        }

        legal
    }

    pub fn has_legal_move(&self, id: PlayerId) -> bool {
        !self.legal_moves(id).is_empty()
    }

    /// Cells that turn to `mover` when it plays `mv`, `mv` itself first.
    ///
    /// Caller contract: `mv` is a legal move for `mover`; legality is not
    /// re-checked. A cell may be listed more than once when it is bracketed
    /// along several lines.
    pub fn changed_pieces(&self, mv: Location, mover: PlayerId, enemy: PlayerId) -> Vec<Location> {
        let mut changed = vec![mv];

        for (start, dir) in self.adjacent(mv, enemy) {
            let mut run = vec![start];
            let mut cursor = start.step(dir);

            while let Some(loc) = cursor {
                let owner = self.get(loc);
                if owner == enemy {
                    run.push(loc);
                } else {
                    if owner == mover {
                        changed.append(&mut run);
                    }
                    break;
                }
                cursor = loc.step(dir);
            }
        }

        changed
    }

    /// Returns a new board with every cell in `flips` owned by `id`.
    pub fn with_flips(&self, flips: &[Location], id: PlayerId) -> Self {
        let mut next = *self;
        for loc in flips {
            next.cells[loc.row as usize][loc.col as usize] = id;
        }
        next
    }

    /// Plays `mv` for `mover` and returns the resulting board.
    pub fn play(&self, mv: Location, mover: PlayerId, enemy: PlayerId) -> Self {
        self.with_flips(&self.changed_pieces(mv, mover, enemy), mover)
    }
}
