use rand::Rng;

use crate::snake::Position;

/// Upper bound on random draws before the free-cell search falls back to a scan.
pub const MAX_SPAWN_ATTEMPTS: usize = 5_000;

/// Square playfield geometry in pixel units.
///
/// Every entity coordinate is a multiple of `tile_size` inside
/// `[0, board_size)` on both axes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    pub board_size: i32,
    pub tile_size: i32,
}

impl Board {
    /// Returns the number of cells along one side.
    #[must_use]
    pub fn cells_per_side(self) -> i32 {
        self.board_size / self.tile_size
    }

    /// Returns the top-left corner of the cell at `(column, row)`.
    #[must_use]
    pub fn cell(self, column: i32, row: i32) -> Position {
        Position {
            x: column * self.tile_size,
            y: row * self.tile_size,
        }
    }

    /// Returns the cell at the middle of the board.
    #[must_use]
    pub fn center(self) -> Position {
        let middle = self.cells_per_side() / 2;
        self.cell(middle, middle)
    }

    /// Returns true when `position` lies on the board.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.is_within_bounds(self)
    }

    /// Draws a uniformly random cell.
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        let side = self.cells_per_side();
        self.cell(rng.gen_range(0..side), rng.gen_range(0..side))
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let side = self.cells_per_side();
        (0..side).flat_map(move |row| (0..side).map(move |column| self.cell(column, row)))
    }
}

/// Finds a cell for which `is_occupied` returns false.
///
/// Samples random cells up to [`MAX_SPAWN_ATTEMPTS`] times, then scans the
/// board in row-major order. When the board is completely full the origin is
/// returned so the caller always gets a cell back.
pub fn find_free_cell<R, F>(rng: &mut R, board: Board, is_occupied: F) -> Position
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = board.random_cell(rng);
        if !is_occupied(candidate) {
            return candidate;
        }
    }

    log::warn!(
        "free-cell search exhausted {MAX_SPAWN_ATTEMPTS} attempts on a {}x{} board, scanning",
        board.cells_per_side(),
        board.cells_per_side()
    );

    board.cells().find(|cell| !is_occupied(*cell)).unwrap_or_else(|| {
        log::warn!("board saturated, falling back to origin");
        Position { x: 0, y: 0 }
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Board, find_free_cell};
    use crate::snake::Position;

    const BOARD: Board = Board {
        board_size: 600,
        tile_size: 20,
    };

    #[test]
    fn geometry_matches_board_and_tile_size() {
        assert_eq!(BOARD.cells_per_side(), 30);
        assert_eq!(BOARD.center(), Position { x: 300, y: 300 });
        assert_eq!(BOARD.cells().count(), 900);
    }

    #[test]
    fn random_cells_are_tile_aligned_and_inside() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let cell = BOARD.random_cell(&mut rng);
            assert!(BOARD.contains(cell));
            assert_eq!(cell.x % BOARD.tile_size, 0);
            assert_eq!(cell.y % BOARD.tile_size, 0);
        }
    }

    #[test]
    fn free_cell_search_finds_the_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board {
            board_size: 60,
            tile_size: 20,
        };
        let free = Position { x: 40, y: 20 };

        let found = find_free_cell(&mut rng, board, |cell| cell != free);

        assert_eq!(found, free);
    }

    #[test]
    fn full_board_falls_back_to_origin() {
        let mut rng = StdRng::seed_from_u64(6);
        let board = Board {
            board_size: 40,
            tile_size: 20,
        };

        let found = find_free_cell(&mut rng, board, |_| true);

        assert_eq!(found, Position { x: 0, y: 0 });
    }
}
