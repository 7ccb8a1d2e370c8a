//! Falling pieces and their rotation tables
//!
//! Each kind carries four pre-rotated shapes. Entry `r + 1` is entry `r`
//! turned 90° clockwise (transpose, then reverse each row), so rotating is a
//! table lookup and can never lose a cell.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Occupied cells in a shape's bounding box, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shape {
    pub width: i32,
    pub height: i32,
    pub cells: [IVec2; 4],
}

const fn shape(width: i32, height: i32, cells: [(i32, i32); 4]) -> Shape {
    Shape {
        width,
        height,
        cells: [
            IVec2::new(cells[0].0, cells[0].1),
            IVec2::new(cells[1].0, cells[1].1),
            IVec2::new(cells[2].0, cells[2].1),
            IVec2::new(cells[3].0, cells[3].1),
        ],
    }
}

impl Shape {
    /// Turn 90° clockwise by transposing and reversing each row
    pub fn rotated(&self) -> Shape {
        let mut cells = self.cells.map(|c| IVec2::new(self.height - 1 - c.y, c.x));
        cells.sort_by_key(|c| (c.y, c.x));
        Shape {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Rows of the bounding box as occupancy flags (debugging / rendering aid)
    pub fn matrix(&self) -> Vec<Vec<bool>> {
        let mut rows = vec![vec![false; self.width as usize]; self.height as usize];
        for c in self.cells {
            rows[c.y as usize][c.x as usize] = true;
        }
        rows
    }
}

const I_SHAPES: [Shape; 4] = [
    shape(4, 1, [(0, 0), (1, 0), (2, 0), (3, 0)]),
    shape(1, 4, [(0, 0), (0, 1), (0, 2), (0, 3)]),
    shape(4, 1, [(0, 0), (1, 0), (2, 0), (3, 0)]),
    shape(1, 4, [(0, 0), (0, 1), (0, 2), (0, 3)]),
];

const O_SHAPES: [Shape; 4] = [shape(2, 2, [(0, 0), (1, 0), (0, 1), (1, 1)]); 4];

const T_SHAPES: [Shape; 4] = [
    shape(3, 2, [(1, 0), (0, 1), (1, 1), (2, 1)]),
    shape(2, 3, [(0, 0), (0, 1), (1, 1), (0, 2)]),
    shape(3, 2, [(0, 0), (1, 0), (2, 0), (1, 1)]),
    shape(2, 3, [(1, 0), (0, 1), (1, 1), (1, 2)]),
];

const S_SHAPES: [Shape; 4] = [
    shape(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    shape(2, 3, [(1, 0), (0, 1), (1, 1), (0, 2)]),
    shape(3, 2, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    shape(2, 3, [(1, 0), (0, 1), (1, 1), (0, 2)]),
];

const Z_SHAPES: [Shape; 4] = [
    shape(3, 2, [(1, 0), (2, 0), (0, 1), (1, 1)]),
    shape(2, 3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
    shape(3, 2, [(1, 0), (2, 0), (0, 1), (1, 1)]),
    shape(2, 3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
];

/// Piece kinds, also used as the color tag of locked cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn shapes(&self) -> &'static [Shape; 4] {
        match self {
            PieceKind::I => &I_SHAPES,
            PieceKind::O => &O_SHAPES,
            PieceKind::T => &T_SHAPES,
            PieceKind::S => &S_SHAPES,
            PieceKind::Z => &Z_SHAPES,
        }
    }

    pub fn shape(&self, rotation: u8) -> &'static Shape {
        &self.shapes()[(rotation % 4) as usize]
    }

    /// Single-letter tag for text rendering
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// A piece in play: kind, rotation index and the top-left of its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub pos: IVec2,
}

impl Piece {
    pub fn new(kind: PieceKind, pos: IVec2) -> Self {
        Self {
            kind,
            rotation: 0,
            pos,
        }
    }

    /// Centered horizontally on a board `board_width` wide, top-aligned
    pub fn spawn(kind: PieceKind, board_width: i32) -> Self {
        let width = kind.shape(0).width;
        Self::new(kind, IVec2::new(board_width / 2 - width / 2, 0))
    }

    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Absolute board cells covered by this piece (may lie above the board)
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.shape().cells.iter().map(move |c| self.pos + *c)
    }

    pub fn shifted(&self, delta: IVec2) -> Self {
        Self {
            pos: self.pos + delta,
            ..*self
        }
    }

    /// Same anchor, next clockwise rotation
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }
}
