//! Fixed-size puzzle grid
//!
//! Rows are stored top to bottom. Cells above row 0 are "off-board": a piece
//! may hang up there while it enters, but nothing can ever be stored there.

use glam::IVec2;
use serde::Serialize;

use super::piece::{Piece, PieceKind};

pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// A board cell: empty, or tagged with the kind that filled it
pub type Cell = Option<PieceKind>;
pub type Row = [Cell; BOARD_WIDTH as usize];

pub const EMPTY_ROW: Row = [None; BOARD_WIDTH as usize];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    rows: Vec<Row>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: vec![EMPTY_ROW; BOARD_HEIGHT as usize],
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Cell contents, `None` when outside the board
    pub fn get(&self, pos: IVec2) -> Option<Cell> {
        if pos.x < 0 || pos.x >= BOARD_WIDTH || pos.y < 0 || pos.y >= BOARD_HEIGHT {
            return None;
        }
        Some(self.rows[pos.y as usize][pos.x as usize])
    }

    /// Write a cell. Returns false (and writes nothing) when outside the board.
    pub fn set(&mut self, pos: IVec2, cell: Cell) -> bool {
        if pos.x < 0 || pos.x >= BOARD_WIDTH || pos.y < 0 || pos.y >= BOARD_HEIGHT {
            return false;
        }
        self.rows[pos.y as usize][pos.x as usize] = cell;
        true
    }

    pub fn is_occupied(&self, pos: IVec2) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Whether `piece` may occupy its position.
    ///
    /// Every cell must be inside the side walls and above the floor; cells
    /// above the top edge are allowed, on-board cells must be empty.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().all(|c| {
            c.x >= 0
                && c.x < BOARD_WIDTH
                && c.y < BOARD_HEIGHT
                && (c.y < 0 || !self.is_occupied(c))
        })
    }

    /// Commit a piece's cells. Returns how many cells were above the board
    /// and therefore could not be stored.
    pub fn lock(&mut self, piece: &Piece) -> usize {
        let mut hidden = 0;
        for cell in piece.cells() {
            if cell.y < 0 {
                hidden += 1;
                continue;
            }
            self.set(cell, Some(piece.kind));
        }
        hidden
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every complete row at once, shift the rest down and refill the
    /// top with empty rows. Returns the removed row indices, ascending.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let full: Vec<usize> = (0..self.rows.len())
            .filter(|&y| self.is_row_full(y))
            .collect();
        if full.is_empty() {
            return full;
        }

        self.rows.retain(|row| row.iter().any(|cell| cell.is_none()));
        let mut rows = vec![EMPTY_ROW; full.len()];
        rows.append(&mut self.rows);
        self.rows = rows;
        full
    }

    /// Copy of the rows with `piece` drawn over them (off-board cells skipped)
    pub fn with_piece(&self, piece: &Piece) -> Vec<Row> {
        let mut rows = self.rows.clone();
        for c in piece.cells() {
            if c.x >= 0 && c.x < BOARD_WIDTH && c.y >= 0 && c.y < BOARD_HEIGHT {
                rows[c.y as usize][c.x as usize] = Some(piece.kind);
            }
        }
        rows
    }

    pub fn filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }
}
