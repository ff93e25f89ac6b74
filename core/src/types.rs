use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single grid axis, used for rows and columns.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Millisecond timestamp supplied by the caller, the origin is irrelevant as long as it is monotonic.
pub type Millis = u64;

/// Points accumulated during one game.
pub type Score = u32;

/// Width and height of the board.
pub const GRID_SIDE: Coord = 3;

/// Number of cards on the board.
pub const CELL_COUNT: usize = (GRID_SIDE as usize) * (GRID_SIDE as usize);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Position of a card on the board, 0-based and row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex(u8);

impl CellIndex {
    const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    pub fn new(index: u8) -> Result<Self> {
        if usize::from(index) < CELL_COUNT {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidCell)
        }
    }

    /// Converts the 1-based card id used by the presentation layer.
    pub fn from_id(id: u8) -> Result<Self> {
        id.checked_sub(1)
            .ok_or(GameError::InvalidCell)
            .and_then(Self::new)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn id(self) -> u8 {
        self.0 + 1
    }

    pub const fn coords(self) -> Coord2 {
        (self.0 / GRID_SIDE, self.0 % GRID_SIDE)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT as u8).map(Self::new_unchecked)
    }
}

impl ToNdIndex for CellIndex {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        self.coords().to_nd_index()
    }
}

/// Three cells forming a row, a column or a diagonal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([CellIndex; 3]);

impl Line {
    const fn from_raw(cells: [u8; 3]) -> Self {
        Self([
            CellIndex::new_unchecked(cells[0]),
            CellIndex::new_unchecked(cells[1]),
            CellIndex::new_unchecked(cells[2]),
        ])
    }

    pub const fn cells(&self) -> [CellIndex; 3] {
        self.0
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        self.0.contains(&cell)
    }
}

/// Every scoring line: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    Line::from_raw([0, 1, 2]),
    Line::from_raw([3, 4, 5]),
    Line::from_raw([6, 7, 8]),
    Line::from_raw([0, 3, 6]),
    Line::from_raw([1, 4, 7]),
    Line::from_raw([2, 5, 8]),
    Line::from_raw([0, 4, 8]),
    Line::from_raw([2, 4, 6]),
];
