//! Board engine for n-in-a-row on a 3D grid.
//!
//! The [`Board`] owns the grid, the set of legal moves, win/draw detection
//! along all 13 line directions of a 3D lattice, and the perspective-relative
//! [`Board::encode_state`] tensor consumed by a policy/value evaluator.

mod available;
mod board;
mod coord;
mod direction;
mod error;
mod player;

pub use board::{Board, DEFAULT_N_IN_ROW, DEFAULT_SIZE, NUM_PLANES};
pub use coord::Coord;
pub use direction::{Direction, DIRECTIONS};
pub use error::{BoardError, Result};
pub use player::Player;
