// Fixed 9x9 occupancy grid: placement checks, placement, line clearing.

use serde::Serialize;

use super::pieces::{Color, Piece};

pub const GRID_SIZE: usize = 9;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    cells: [[Option<Color>; GRID_SIZE]; GRID_SIZE],
}

/// Which lines a clear removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cleared {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl Cleared {
    pub fn lines(&self) -> usize {
        self.rows.len() + self.cols.len()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub fn rows(&self) -> &[[Option<Color>; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    /// The bounding box must fit inside the grid at `(row, col)` and every
    /// filled shape cell must land on an empty grid cell.
    pub fn can_place(&self, piece: &Piece, row: usize, col: usize) -> bool {
        if row >= GRID_SIZE
            || col >= GRID_SIZE
            || piece.height() > GRID_SIZE - row
            || piece.width() > GRID_SIZE - col
        {
            return false;
        }
        piece
            .cells()
            .all(|(dr, dc)| self.cells[row + dr][col + dc].is_none())
    }

    /// Writes the piece's color into its cells. Returns false (grid untouched)
    /// when the placement is illegal.
    pub fn place(&mut self, piece: &Piece, row: usize, col: usize) -> bool {
        if !self.can_place(piece, row, col) {
            return false;
        }
        for (dr, dc) in piece.cells() {
            self.cells[row + dr][col + dc] = Some(piece.color);
        }
        true
    }

    /// True if the piece fits anywhere on the grid.
    pub fn fits_anywhere(&self, piece: &Piece) -> bool {
        (0..GRID_SIZE).any(|r| (0..GRID_SIZE).any(|c| self.can_place(piece, r, c)))
    }

    /// Empty every full row and column. Fullness is judged on the grid as it
    /// stood before any clearing, so a cell on both a full row and a full
    /// column counts toward both lines.
    pub fn clear_full_lines(&mut self) -> Cleared {
        let rows: Vec<usize> = (0..GRID_SIZE)
            .filter(|&r| self.cells[r].iter().all(Option::is_some))
            .collect();
        let cols: Vec<usize> = (0..GRID_SIZE)
            .filter(|&c| self.cells.iter().all(|row| row[c].is_some()))
            .collect();

        for &r in &rows {
            self.cells[r] = [None; GRID_SIZE];
        }
        for &c in &cols {
            for row in self.cells.iter_mut() {
                row[c] = None;
            }
        }
        Cleared { rows, cols }
    }
}
