//! The game grid.
//!
//! A 10x20 field of optional piece-kind cells in flat row-major storage.
//! Coordinates are (x, y) with x growing rightwards and y growing downwards;
//! pieces spawn near (3, 0).

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;
const CELLS: usize = W * H;

/// One player's playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= H {
            return None;
        }
        Some(y as usize * W + x as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y); `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell. Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        y < H && self.cells[y * W..(y + 1) * W].iter().all(Cell::is_some)
    }

    /// Remove every full row, shifting the rows above downwards.
    ///
    /// Returns the cleared row indices in ascending order. At most four rows can
    /// clear from a single lock, so the result is a fixed-capacity vec.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut write = H;

        for read in (0..H).rev() {
            if self.is_row_full(read) {
                cleared.push(read);
            } else {
                write -= 1;
                if write != read {
                    self.cells.copy_within(read * W..(read + 1) * W, write * W);
                }
            }
        }

        for cell in &mut self.cells[..write * W] {
            *cell = None;
        }

        cleared.reverse();
        cleared
    }

    /// Write a piece's minos into the grid.
    ///
    /// All four cells must be free; on any conflict nothing is written and
    /// false is returned.
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, kind: PieceKind) -> bool {
        if !shape.iter().all(|&(dx, dy)| self.is_free(x + dx, y + dy)) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
        true
    }

    /// Whether the spawn area is already blocked (top-out condition).
    pub fn is_spawn_blocked(&self) -> bool {
        !(self.is_free(3, 0) && self.is_free(4, 0) && self.is_free(5, 0))
    }

    /// Push `rows` garbage rows in from the bottom.
    ///
    /// Each garbage row is full except for the single `gap` column. Existing
    /// content shifts upwards; anything shifted past the top edge is lost.
    pub fn insert_garbage(&mut self, rows: usize, gap: usize) {
        let rows = rows.min(H);
        let gap = gap.min(W - 1);

        // Shift the surviving rows up.
        self.cells.copy_within(rows * W.., 0);

        for y in H - rows..H {
            for x in 0..W {
                let cell = if x == gap { None } else { Some(PieceKind::L) };
                self.cells[y * W + x] = cell;
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells = [None; CELLS];
    }

    /// Fill a whole row, leaving out the listed columns. Test setup helper.
    #[cfg(test)]
    pub fn fill_row_except(&mut self, y: i8, skip: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !skip.contains(&x) {
                self.set(x, y, Some(PieceKind::I));
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
