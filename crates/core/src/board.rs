//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is either empty or
//! occupied by a piece kind. Storage is a flat row-major vector allocated once
//! at construction; the grid never resizes.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{clamp_board_edge, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the reference 10x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with the given dimensions.
    ///
    /// Each edge is clamped into `MIN_BOARD_EDGE..=MAX_BOARD_EDGE`, so piece
    /// coordinates always fit in `i8` and no row is ever empty-width.
    pub fn with_size(width: u8, height: u8) -> Self {
        let width = clamp_board_edge(width);
        let height = clamp_board_edge(height);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Occupied(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x as i16 >= self.width as i16 || y < 0 || y as i16 >= self.height as i16
    }

    /// Check whether a single piece cell at (x, y) collides.
    ///
    /// Columns outside the board and rows at or below the floor collide.
    /// Rows above the top edge never collide on their own.
    pub fn collides_at(&self, x: i8, y: i8) -> bool {
        if x < 0 || x as i16 >= self.width as i16 || y as i16 >= self.height as i16 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(Cell::is_occupied))
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(Cell::is_empty))
    }

    /// Borrow one row of cells
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// Clear a row and shift all rows above down by one
    /// Returns the number of lines cleared (1 or 0)
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(Cell::Empty);

        1
    }

    /// Clear all full rows, scanning from the floor upwards.
    ///
    /// After a row is cleared the same index holds the row that was above it,
    /// so it is examined again before the scan moves up.
    /// Returns the number of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                cleared += self.clear_row(y - 1);
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Write a piece's cells onto the board.
    ///
    /// Cells outside the board (in particular rows above the top edge) are
    /// skipped. Returns the number of cells written.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> usize {
        cells
            .iter()
            .filter(|&&(x, y)| self.set(x, y, Cell::Occupied(kind)))
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a board from rows of text, top row first.
    ///
    /// `.` is an empty cell; a piece letter (`I`, `O`, `T`, `L`, `J`, `S`, `Z`)
    /// is an occupied cell, any other character is occupied by `I`. Rows
    /// shorter than the board are padded with empty cells, and the rows are
    /// bottom-aligned so callers only describe the stack.
    pub fn from_rows(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::with_size(width, height);
        let offset = (height as usize).saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().enumerate().take(width as usize) {
                if ch == '.' {
                    continue;
                }
                let kind = PieceKind::from_str(&ch.to_string()).unwrap_or(PieceKind::I);
                board.set(x as i8, y, Cell::Occupied(kind));
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
