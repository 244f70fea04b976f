//! Board representation and game-state types.
//!
//! Contains the mark, coordinate, and grid types that define a tic-tac-toe
//! position and the rules for deriving new positions from it.

pub mod grid;
pub mod mark;
pub mod square;

pub use grid::{Grid, InvalidMove, LINES};
pub use mark::Mark;
pub use square::{Square, ALL_SQUARES, SQUARE_COUNT};
