//! Legal move generation.
//!
//! Enumerates the empty squares of a grid. Enumeration is row-major and the
//! order is part of the contract: search tie-breaks resolve to the first
//! move in this enumeration.

use rand::Rng;

use crate::board::{Grid, Square, ALL_SQUARES};

/// Returns every legal move on the grid, in row-major order.
///
/// Empty on a full grid; a won grid with empty squares still lists them,
/// callers gate on [`Grid::is_terminal`] first.
pub fn legal_moves(grid: &Grid) -> Vec<Square> {
    ALL_SQUARES
        .iter()
        .copied()
        .filter(|&sq| grid.get(sq).is_none())
        .collect()
}

/// Picks a uniformly random legal move, or `None` on a full grid.
pub fn random_move(grid: &Grid, rng: &mut impl Rng) -> Option<Square> {
    let legal = legal_moves(grid);
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}
