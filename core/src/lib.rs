#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use debounce::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use indicator::*;
pub use rules::*;
pub use types::*;

mod card;
mod debounce;
mod engine;
mod error;
mod generator;
mod indicator;
mod rules;
mod types;

/// Tunables of a single game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Points credited for each newly scored line.
    pub points_per_line: Score,
    /// Cooldown during which repeated flips of the same card are ignored.
    pub debounce_ms: Millis,
    /// Lifetime of a floating score indicator.
    pub indicator_ttl_ms: Millis,
    /// The game ends when this many cards have been flipped.
    pub end_at_flipped: usize,
    /// Lines are only evaluated once at least this many cards have been flipped.
    pub min_flips_to_evaluate: usize,
    /// Side of the square area (in pixels) in which score indicators are placed.
    pub indicator_area: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            points_per_line: 10,
            debounce_ms: 1000,
            indicator_ttl_ms: 1000,
            // XXX: ends one card short of a full board
            end_at_flipped: 8,
            min_flips_to_evaluate: 3,
            indicator_area: 280,
        }
    }
}

/// The nine cards of a game laid out on the 3x3 grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Array2<Card>,
}

impl Board {
    /// Builds a board from icons in row-major order, all cards hidden.
    pub fn from_icons(icons: [IconKind; CELL_COUNT]) -> Self {
        let side = GRID_SIDE as usize;
        let cards = Array2::from_shape_fn((side, side), |(row, col)| {
            Card::hidden(icons[row * side + col])
        });
        Self { cards }
    }

    pub fn card(&self, cell: CellIndex) -> Card {
        self[cell]
    }

    pub fn icon_at(&self, cell: CellIndex) -> IconKind {
        self[cell].icon
    }

    pub fn line_icons(&self, line: &Line) -> [IconKind; 3] {
        line.cells().map(|cell| self.icon_at(cell))
    }

    /// Icons in row-major order.
    pub fn icons(&self) -> impl Iterator<Item = IconKind> + '_ {
        self.cards.iter().map(|card| card.icon)
    }

    #[cfg(test)]
    pub(crate) fn count(&self, icon: IconKind) -> usize {
        self.icons().filter(|&other| other == icon).count()
    }

    pub(crate) fn reveal(&mut self, cell: CellIndex) {
        self.cards[cell.to_nd_index()].revealed = true;
    }
}

impl Index<CellIndex> for Board {
    type Output = Card;

    fn index(&self, cell: CellIndex) -> &Self::Output {
        &self.cards[cell.to_nd_index()]
    }
}
