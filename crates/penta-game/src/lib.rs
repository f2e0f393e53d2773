//! Pure game rules for Penta: no I/O, no clocks, no channels.
//!
//! Everything in this crate is a function of its inputs (plus an injected
//! random source), which is what makes the room layer above it easy to
//! test deterministically.
//!
//! # Key items
//!
//! - [`Board`] — a 5×5 board holding a permutation of 1..=25
//! - [`Selection`] — which of a board's cells have been marked
//! - [`count_lines`] — completed rows/columns/diagonals for a selection
//! - [`choose_claim`] — the bot opponent's move policy

mod board;
mod lines;
mod policy;

pub use board::{Board, Selection, CELLS, MAX_NUMBER, SIDE};
pub use lines::count_lines;
pub use policy::choose_claim;
