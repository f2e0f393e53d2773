//! Boards and per-board selection state.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Board side length.
pub const SIDE: usize = 5;

/// Number of cells on a board.
pub const CELLS: usize = SIDE * SIDE;

/// The largest number that can appear on a board (numbers run 1..=25).
pub const MAX_NUMBER: u8 = CELLS as u8;

/// A player's 5×5 board: cell index 0..25 → one of the numbers 1..=25,
/// each exactly once.
///
/// Boards are immutable once generated. Two boards in the same game are
/// generated independently, so any given number sits at a different cell
/// on each (or, with fixture boards, on one board only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([u8; CELLS]);

impl Board {
    /// Generates a fresh board by shuffling 1..=25 in place
    /// (Fisher–Yates via `rand`).
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells: [u8; CELLS] = std::array::from_fn(|i| (i + 1) as u8);
        cells.shuffle(rng);
        Self(cells)
    }

    /// Builds a board from explicit cells. The caller owns the
    /// "distinct numbers" invariant; intended for fixtures and decoding.
    pub fn from_cells(cells: [u8; CELLS]) -> Self {
        Self(cells)
    }

    /// Cell index holding `number`, if the board has it.
    pub fn position_of(&self, number: u8) -> Option<usize> {
        self.0.iter().position(|&n| n == number)
    }

    /// The number at a cell index.
    ///
    /// # Panics
    /// Panics if `index >= CELLS`.
    pub fn number_at(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.0
    }
}

/// Which cells of one board have been marked. Index-aligned with the
/// board it belongs to; starts all-false.
///
/// Only the room mutates this, and only for numbers that actually sit
/// on the matching board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection([bool; CELLS]);

impl Selection {
    /// A fresh, all-unmarked selection.
    pub fn new() -> Self {
        Self([false; CELLS])
    }

    /// Marks one cell.
    ///
    /// # Panics
    /// Panics if `index >= CELLS`.
    pub fn mark(&mut self, index: usize) {
        self.0[index] = true;
    }

    /// Whether a cell is marked.
    pub fn is_marked(&self, index: usize) -> bool {
        self.0[index]
    }

    /// All marks in cell-index order.
    pub fn cells(&self) -> &[bool; CELLS] {
        &self.0
    }
}
